//! Location of the HTTP challenge directory served by the redirector.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FALLBACK_WEBROOT;

/// Pick the challenge directory.
///
/// First non-empty wins: `override_path` as given, the first non-blank line of
/// `<state_dir>/conf/webroot-path`, then [`FALLBACK_WEBROOT`]. The result is
/// not checked for existence.
pub fn determine_webroot(override_path: Option<&str>, state_dir: &Path) -> PathBuf {
    if let Some(p) = override_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(p);
    }

    // The full state store is not needed for one file.
    let conf = webroot_conf_path(state_dir);
    match fs::read_to_string(&conf) {
        Ok(text) => {
            if let Some(line) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
                return PathBuf::from(line);
            }
        }
        Err(e) => log::debug!("no webroot configured in {}: {}", conf.display(), e),
    }

    PathBuf::from(FALLBACK_WEBROOT)
}

pub fn webroot_conf_path(state_dir: &Path) -> PathBuf {
    state_dir.join("conf").join("webroot-path")
}
