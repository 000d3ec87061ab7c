//! Exclusive creation of unit files.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use super::InstallerError;

/// Create `path` with mode 0644 and write `content` to it.
///
/// Fails with [`InstallerError::UnitFileExists`] if anything already exists
/// at `path`; an existing file is never truncated or replaced.
pub(super) fn write_file_exclusive(path: &Path, content: &str) -> Result<(), InstallerError> {
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }

    let mut file = opts.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => InstallerError::UnitFileExists(path.to_path_buf()),
        _ => InstallerError::Write {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let written = file.write_all(content.as_bytes()).and_then(|_| file.sync_all());
    drop(file);
    remove_on_error(path, written)
}

/// Remove the file we just created if filling it failed, so a later attempt
/// is not blocked by a partial unit.
fn remove_on_error(path: &Path, written: io::Result<()>) -> Result<(), InstallerError> {
    written.map_err(|e| {
        if let Err(rm) = fs::remove_file(path) {
            log::warn!("cannot remove partial unit file {}: {}", path.display(), rm);
        }
        InstallerError::Write {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.service");
        write_file_exclusive(&path, "[Unit]\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[Unit]\n");
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.service");
        std::fs::write(&path, "original").unwrap();

        let err = write_file_exclusive(&path, "replacement").unwrap_err();
        assert!(matches!(err, InstallerError::UnitFileExists(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn missing_parent_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("x.service");
        let err = write_file_exclusive(&path, "").unwrap_err();
        assert!(matches!(err, InstallerError::Write { .. }));
    }

    #[test]
    fn failed_fill_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.service");
        std::fs::write(&path, "[Unit]\nDescr").unwrap();

        let err = remove_on_error(&path, Err(io::Error::other("disk full"))).unwrap_err();
        assert!(matches!(err, InstallerError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn successful_fill_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.service");
        std::fs::write(&path, "[Unit]\n").unwrap();

        remove_on_error(&path, Ok(())).unwrap();
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn mode_is_0644_under_default_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.service");
        write_file_exclusive(&path, "").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask can only clear bits
        assert_eq!(mode & !0o644, 0);
    }
}
