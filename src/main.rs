mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};

use acmetool_redirector::config::InstallerConfig;
use acmetool_redirector::interaction::{InteractionContext, ResponseStore};
use acmetool_redirector::redirector::{self, NoEngine, RunOptions};

fn main() {
    env_logger::Builder::new()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = real_main() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let args = cli::Args::parse();
    debug!("hooks directory: {}", args.hooks.display());

    let ctx = interaction_context(&args);

    match args.sub {
        cli::Cmd::Run {
            path,
            challenge_gid,
            service_uid,
        } => {
            let opts = RunOptions {
                path: path.as_deref(),
                challenge_gid: challenge_gid.as_deref(),
                service_uid: service_uid.as_deref(),
            };
            redirector::run(&NoEngine, &opts, &args.state)
        }
        cli::Cmd::Install => {
            handle_install(&ctx);
            Ok(())
        }
    }
}

/// Build the per-invocation prompt context from global flags.
fn interaction_context(args: &cli::Args) -> InteractionContext {
    let mut responses = ResponseStore::new();
    if let Some(path) = &args.response_file {
        if let Err(e) = responses.load_file(path) {
            error!("cannot load response file, continuing anyway: {e}");
        }
    }
    InteractionContext::new(
        responses,
        InteractionContext::mode_from_flags(args.batch, args.stdio),
    )
}

/// Self-install the redirector unit. Failures are logged, never returned.
fn handle_install(ctx: &InteractionContext) {
    let exec_path = match current_exe() {
        Ok(p) => p,
        Err(e) => {
            error!("{e:#}");
            return;
        }
    };

    cfg_if::cfg_if! {
        if #[cfg(target_os = "linux")] {
            use acmetool_redirector::install::{ServiceInstaller, Systemd, install_if_confirmed};

            let installer = ServiceInstaller::new(Systemd, InstallerConfig::system(exec_path));
            if let Some(report) = install_if_confirmed(ctx, &installer) {
                info!("{}: {}", installer.config().unit_name, report.outcome);
                for w in &report.warnings {
                    info!("  warning: {w}");
                }
            }
        } else {
            let _ = ctx;
            let cfg = InstallerConfig::system(exec_path);
            debug!("no supported init system on this platform, not installing {}", cfg.unit_name);
        }
    }
}

fn current_exe() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to determine executable path")?;
    Ok(exe.canonicalize().unwrap_or(exe))
}
