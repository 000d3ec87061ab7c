//! Systemd control through `systemctl`.
//!
//! This module provides the production [`InitSystem`]: detection of a running
//! systemd, and unit queries, daemon reload, enable and start for system
//! services.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{InitConnection, InitSystem, InstallerError};

/// Directory that exists only when systemd is PID 1.
const SYSTEMD_RUNTIME_DIR: &str = "/run/systemd/system";

#[derive(Debug, Default, Clone, Copy)]
pub struct Systemd;

impl InitSystem for Systemd {
    type Connection = SystemctlConnection;

    fn is_running(&self) -> bool {
        Path::new(SYSTEMD_RUNTIME_DIR).is_dir()
    }

    fn connect(&self) -> Result<SystemctlConnection, InstallerError> {
        let systemctl = which::which("systemctl")
            .map_err(|e| InstallerError::Connect(format!("locate systemctl: {e}")))?;
        log::debug!("using {}", systemctl.display());
        Ok(SystemctlConnection { systemctl })
    }
}

/// Handle to the system manager, released when dropped.
#[derive(Debug)]
pub struct SystemctlConnection {
    systemctl: PathBuf,
}

impl SystemctlConnection {
    fn systemctl(&self, args: &[&str]) -> Result<String, InstallerError> {
        let output = Command::new(&self.systemctl)
            .args(args)
            .output()
            .map_err(|e| {
                InstallerError::System(format!("Failed to execute systemctl {}: {}", args[0], e))
            })?;

        if !output.status.success() {
            return Err(InstallerError::System(format!(
                "systemctl {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl InitConnection for SystemctlConnection {
    fn load_state(&self, unit: &str) -> Result<String, InstallerError> {
        let out = self
            .systemctl(&["show", "--property=LoadState", unit])
            .map_err(|e| InstallerError::QueryUnit {
                unit: unit.to_string(),
                reason: e.to_string(),
            })?;
        parse_load_state(&out).ok_or_else(|| InstallerError::QueryUnit {
            unit: unit.to_string(),
            reason: format!("no LoadState in {:?}", out.trim()),
        })
    }

    fn reload(&self) -> Result<(), InstallerError> {
        self.systemctl(&["daemon-reload"]).map(|_| ())
    }

    fn enable_unit_files(&self, units: &[&str]) -> Result<(), InstallerError> {
        let mut args = vec!["enable"];
        args.extend_from_slice(units);
        self.systemctl(&args).map(|_| ())
    }

    fn start_unit(&self, unit: &str, mode: &str) -> Result<(), InstallerError> {
        let job_mode = format!("--job-mode={mode}");
        self.systemctl(&["start", &job_mode, unit]).map(|_| ())
    }
}

impl Drop for SystemctlConnection {
    fn drop(&mut self) {
        log::debug!("closing systemd connection");
    }
}

/// Extract the value of a `LoadState=` line from `systemctl show` output.
fn parse_load_state(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("LoadState="))
        .map(|s| s.trim().to_string())
}
