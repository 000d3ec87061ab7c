use std::path::PathBuf;

/// Default ACME state directory (overridable with `ACME_STATE_DIR`).
pub const DEFAULT_STATE_DIR: &str = "/var/lib/acme";

/// Default notification hooks directory (overridable with `ACME_HOOKS_DIR`).
pub const DEFAULT_HOOKS_DIR: &str = "/usr/lib/acme/hooks";

/// Challenge directory used when neither an override nor the state
/// directory names one.
pub const FALLBACK_WEBROOT: &str = "/var/run/acme/acme-challenge";

/// Address the redirector listens on.
pub const REDIRECTOR_BIND: &str = ":80";

/// Name of the systemd unit the installer manages.
pub const UNIT_NAME: &str = "acmetool-redirector.service";

/// Directory system units are written to.
pub const SYSTEM_UNIT_DIR: &str = "/etc/systemd/system";

/// Unprivileged accounts the service may run as, most preferred first.
pub const SERVICE_ACCOUNTS: &[&str] = &["daemon", "nobody"];

/// Response key consulted before self-installing the redirector.
pub const INSTALL_REDIRECTOR_KEY: &str = "acmetool-quickstart-install-redirector-systemd";

/// Settings handed to the challenge-serving engine by `run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectorConfig {
    pub bind: String,
    pub challenge_path: PathBuf,
    /// Group the challenge directory is chgrp'd to, if any
    pub challenge_gid: Option<String>,
    /// Account the service drops privileges to, if any
    pub service_uid: Option<String>,
}

impl RedirectorConfig {
    pub fn new(challenge_path: PathBuf) -> Self {
        Self {
            bind: REDIRECTOR_BIND.to_string(),
            challenge_path,
            challenge_gid: None,
            service_uid: None,
        }
    }
}

/// Where and how the installer writes the redirector unit.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    pub unit_dir: PathBuf,
    pub unit_name: String,
    /// Absolute path of the executable the unit starts
    pub exec_path: PathBuf,
    pub accounts: Vec<String>,
}

impl InstallerConfig {
    /// System-wide defaults for the given executable.
    pub fn system(exec_path: PathBuf) -> Self {
        Self {
            unit_dir: PathBuf::from(SYSTEM_UNIT_DIR),
            unit_name: UNIT_NAME.to_string(),
            exec_path,
            accounts: SERVICE_ACCOUNTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(&self.unit_name)
    }
}
