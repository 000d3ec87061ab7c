//! Self-installation of the redirector as a system service.
//!
//! The installer walks a fixed sequence against the init system:
//!
//! 1. probe for a running init system, skipping silently if there is none
//! 2. connect, and ask for the unit's load state; anything other than
//!    `not-found` means someone already installed it
//! 3. resolve the service account and write the unit file, create-exclusive
//! 4. reload the daemon and enable the unit (failures are warnings only)
//! 5. start the unit; this is the result that gets reported
//!
//! Nothing here aborts the process. Every failure ends up as a logged
//! [`ServiceInstallOutcome`].

mod account;
mod error;
mod file_ops;
mod unit;

#[cfg(target_os = "linux")]
mod systemd;

pub use account::{resolve_username, resolve_username_with};
pub use error::InstallerError;
pub use unit::{UnitDescriptor, UnitOption, redirector_unit};

#[cfg(target_os = "linux")]
pub use systemd::{Systemd, SystemctlConnection};

use std::fmt;

use crate::config::{INSTALL_REDIRECTOR_KEY, InstallerConfig};
use crate::interaction::{InteractionContext, Prompted};

/// Load state reported for units the init system has never heard of.
const LOAD_STATE_NOT_FOUND: &str = "not-found";

/// Job mode used when starting the unit.
const START_MODE_REPLACE: &str = "replace";

/// Capability to detect and talk to an init system.
pub trait InitSystem {
    type Connection: InitConnection;

    /// Whether this init system is managing the host.
    fn is_running(&self) -> bool;

    /// Open a control channel. The channel is released when dropped.
    fn connect(&self) -> Result<Self::Connection, InstallerError>;
}

/// Operations available over an open init-system channel.
pub trait InitConnection {
    /// Load state of `unit`, e.g. `loaded` or `not-found`.
    fn load_state(&self, unit: &str) -> Result<String, InstallerError>;
    fn reload(&self) -> Result<(), InstallerError>;
    fn enable_unit_files(&self, units: &[&str]) -> Result<(), InstallerError>;
    fn start_unit(&self, unit: &str, mode: &str) -> Result<(), InstallerError>;
}

/// Final state of an install attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceInstallOutcome {
    AlreadyInstalled,
    /// Written, and the service is running
    Installed,
    /// Written, but the start job failed
    InstalledButNotStarted,
    SkippedNoInitSystem,
    Failed(String),
}

impl fmt::Display for ServiceInstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInstalled => write!(f, "unit already installed, skipped"),
            Self::Installed => write!(f, "installed and started"),
            Self::InstalledButNotStarted => write!(f, "installed but not started"),
            Self::SkippedNoInitSystem => write!(f, "no init system, skipped"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Outcome of an install attempt plus the soft failures seen on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub outcome: ServiceInstallOutcome,
    pub warnings: Vec<String>,
}

/// Drives the redirector unit from "unknown" to "running".
pub struct ServiceInstaller<I> {
    init: I,
    config: InstallerConfig,
}

impl<I: InitSystem> ServiceInstaller<I> {
    pub fn new(init: I, config: InstallerConfig) -> Self {
        Self { init, config }
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// Run the install sequence. Never fails; see [`InstallReport`].
    pub fn install(&self) -> InstallReport {
        let mut warnings = Vec::new();
        let outcome = match self.run(&mut warnings) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("install {}: {}", self.config.unit_name, e);
                ServiceInstallOutcome::Failed(e.to_string())
            }
        };
        InstallReport { outcome, warnings }
    }

    fn run(&self, warnings: &mut Vec<String>) -> Result<ServiceInstallOutcome, InstallerError> {
        let unit_name = self.config.unit_name.as_str();

        if !self.init.is_running() {
            log::debug!("not running systemd");
            return Ok(ServiceInstallOutcome::SkippedNoInitSystem);
        }

        log::debug!("connecting to systemd");
        let conn = self.init.connect()?;
        log::debug!("connected");

        let load_state = conn.load_state(unit_name)?;
        if load_state != LOAD_STATE_NOT_FOUND {
            log::info!("{unit_name} unit already installed ({load_state}), skipping");
            return Ok(ServiceInstallOutcome::AlreadyInstalled);
        }

        let username = resolve_username(&self.config.accounts)?;
        let unit = redirector_unit(&self.config.exec_path, &username);
        let unit_path = self.config.unit_path();
        file_ops::write_file_exclusive(&unit_path, &unit.to_string())?;
        log::info!("wrote {}", unit_path.display());

        if let Err(e) = conn.reload() {
            soft_fail(warnings, format!("systemctl daemon-reload failed: {e}"));
        }

        if let Err(e) = conn.enable_unit_files(&[unit_name]) {
            soft_fail(warnings, format!("failed to enable unit {unit_name}: {e}"));
        }

        match conn.start_unit(unit_name, START_MODE_REPLACE) {
            Ok(()) => {
                log::info!("The {unit_name} service was successfully started.");
                Ok(ServiceInstallOutcome::Installed)
            }
            Err(e) => {
                log::error!("failed to start {unit_name}: {e}");
                log::error!(
                    "The {unit_name} service WAS NOT successfully started. You may have a web \
                     server listening on port 80. You will need to troubleshoot this yourself."
                );
                Ok(ServiceInstallOutcome::InstalledButNotStarted)
            }
        }
    }
}

/// Ask whether to install the redirector service, then do it.
///
/// Returns `None` when the answer was no or the question was cancelled.
pub fn install_if_confirmed<I: InitSystem>(
    ctx: &InteractionContext,
    installer: &ServiceInstaller<I>,
) -> Option<InstallReport> {
    let question = "Install the HTTP redirector as a systemd service?";
    match ctx.confirm(INSTALL_REDIRECTOR_KEY, question, true) {
        Ok(Prompted::Answered(true)) => Some(installer.install()),
        Ok(Prompted::Answered(false) | Prompted::Cancelled) => {
            log::info!("not installing {}", installer.config().unit_name);
            None
        }
        Err(e) => {
            log::error!("cannot ask about redirector installation: {e:#}");
            None
        }
    }
}

fn soft_fail(warnings: &mut Vec<String>, message: String) {
    log::warn!("{message}");
    warnings.push(message);
}
