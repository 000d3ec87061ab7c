use std::path::PathBuf;

use clap::{Parser, Subcommand};

use acmetool_redirector::config::{DEFAULT_HOOKS_DIR, DEFAULT_STATE_DIR};

#[derive(Parser, Debug)]
#[command(version, about = "acmetool HTTP redirector")]
pub struct Args {
    /// Path to the state directory (env: ACME_STATE_DIR)
    #[arg(long, env = "ACME_STATE_DIR", default_value = DEFAULT_STATE_DIR, value_name = "DIR")]
    pub state: PathBuf,

    /// Path to the notification hooks directory (env: ACME_HOOKS_DIR)
    #[arg(long, env = "ACME_HOOKS_DIR", default_value = DEFAULT_HOOKS_DIR, value_name = "DIR")]
    pub hooks: PathBuf,

    /// Do not attempt interaction; useful for cron jobs
    #[arg(long)]
    pub batch: bool,

    /// Don't attempt to use console dialogs; fall back to stdio prompts
    #[arg(long)]
    pub stdio: bool,

    /// Read dialog responses from the given file
    #[arg(long, value_name = "FILE")]
    pub response_file: Option<PathBuf>,

    #[command(subcommand)]
    pub sub: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// HTTP to HTTPS redirector with challenge response support
    Run {
        /// Path to serve challenge files from
        #[arg(long)]
        path: Option<String>,

        /// GID to chgrp the challenge path to (optional)
        #[arg(long)]
        challenge_gid: Option<String>,

        /// Account to drop privileges to (set by the installed unit)
        #[arg(long = "service.uid", value_name = "USER")]
        service_uid: Option<String>,
    },
    /// Install the redirector as a systemd service (always exits 0)
    ///
    /// The installed unit starts `run`, which needs a challenge-serving
    /// engine. Builds without one make `run` exit 1, so systemd will keep
    /// restarting the unit every 30 seconds and install reports it as not
    /// started.
    Install,
}
