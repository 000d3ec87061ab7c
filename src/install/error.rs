//! Error types for the service installer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Hard failures that end an install attempt.
///
/// Daemon reload and enable also return an `InstallerError`, but the
/// installer downgrades those to warnings on the report instead of
/// propagating them.
#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("cannot find appropriate username (tried: {})", .0.join(", "))]
    NoSuitableAccount(Vec<String>),

    #[error("connect to init system: {0}")]
    Connect(String),

    #[error("query unit {unit}: {reason}")]
    QueryUnit { unit: String, reason: String },

    #[error("{} unit file already exists?", .0.display())]
    UnitFileExists(PathBuf),

    #[error("cannot write unit file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("init system operation failed: {0}")]
    System(String),
}
