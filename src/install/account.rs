//! Selection of the unprivileged account the redirector runs as.

#[cfg(unix)]
use nix::unistd::User;

use super::InstallerError;

/// Return the first candidate that names an existing account.
pub fn resolve_username(candidates: &[String]) -> Result<String, InstallerError> {
    resolve_username_with(candidates, account_exists)
}

/// Same as [`resolve_username`], with the account lookup supplied by the caller.
pub fn resolve_username_with<F>(candidates: &[String], mut exists: F) -> Result<String, InstallerError>
where
    F: FnMut(&str) -> bool,
{
    candidates
        .iter()
        .find(|name| exists(name))
        .cloned()
        .ok_or_else(|| InstallerError::NoSuitableAccount(candidates.to_vec()))
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        fn account_exists(name: &str) -> bool {
            match User::from_name(name) {
                Ok(Some(_)) => true,
                Ok(None) => false,
                Err(e) => {
                    log::debug!("passwd lookup for {name} failed: {e}");
                    false
                }
            }
        }
    } else {
        fn account_exists(name: &str) -> bool {
            log::debug!("no passwd database on this platform, cannot use {name}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_existing_candidate_wins() {
        let mut tried = Vec::new();
        let got = resolve_username_with(&names(&["daemon", "nobody"]), |n| {
            tried.push(n.to_string());
            true
        })
        .unwrap();
        assert_eq!(got, "daemon");
        assert_eq!(tried, vec!["daemon"]);
    }

    #[test]
    fn falls_through_in_declared_order() {
        let mut tried = Vec::new();
        let got = resolve_username_with(&names(&["daemon", "nobody"]), |n| {
            tried.push(n.to_string());
            n == "nobody"
        })
        .unwrap();
        assert_eq!(got, "nobody");
        assert_eq!(tried, vec!["daemon", "nobody"]);
    }

    #[test]
    fn no_candidate_resolves() {
        let err = resolve_username_with(&names(&["daemon", "nobody"]), |_| false).unwrap_err();
        assert!(matches!(err, InstallerError::NoSuitableAccount(ref c) if c.len() == 2));
        assert!(err.to_string().contains("daemon, nobody"));
    }

    #[cfg(unix)]
    #[test]
    fn root_exists_on_unix_hosts() {
        assert_eq!(resolve_username(&names(&["root"])).unwrap(), "root");
    }
}
