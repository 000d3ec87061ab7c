//! Hand-off from the `run` command to the challenge-serving engine.

use std::path::Path;

use anyhow::{Result, bail};

use crate::config::RedirectorConfig;
use crate::webroot::determine_webroot;

/// Serves HTTP-to-HTTPS redirects and ACME challenge files.
pub trait ChallengeEngine {
    fn serve(&self, config: &RedirectorConfig) -> Result<()>;
}

/// Engine used when the binary is built without a challenge server.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEngine;

impl ChallengeEngine for NoEngine {
    fn serve(&self, config: &RedirectorConfig) -> Result<()> {
        bail!(
            "no challenge-serving engine linked into this build; cannot serve {} on {}",
            config.challenge_path.display(),
            config.bind
        )
    }
}

/// Options collected from the `run` command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions<'a> {
    pub path: Option<&'a str>,
    pub challenge_gid: Option<&'a str>,
    pub service_uid: Option<&'a str>,
}

/// Resolve the redirector configuration for a `run` invocation.
pub fn redirector_config(opts: &RunOptions<'_>, state_dir: &Path) -> RedirectorConfig {
    let mut config = RedirectorConfig::new(determine_webroot(opts.path, state_dir));
    config.challenge_gid = opts
        .challenge_gid
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    config.service_uid = opts
        .service_uid
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    config
}

pub fn run<E: ChallengeEngine>(engine: &E, opts: &RunOptions<'_>, state_dir: &Path) -> Result<()> {
    let config = redirector_config(opts, state_dir);
    log::info!(
        "redirector on {} serving challenges from {}",
        config.bind,
        config.challenge_path.display()
    );
    engine.serve(&config)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Capture(RefCell<Option<RedirectorConfig>>);

    impl ChallengeEngine for Capture {
        fn serve(&self, config: &RedirectorConfig) -> Result<()> {
            *self.0.borrow_mut() = Some(config.clone());
            Ok(())
        }
    }

    #[test]
    fn run_hands_resolved_config_to_engine() {
        let state = tempfile::tempdir().unwrap();
        let engine = Capture::default();
        let opts = RunOptions {
            path: Some("/srv/challenges"),
            challenge_gid: Some("www-data"),
            service_uid: Some("daemon"),
        };
        run(&engine, &opts, state.path()).unwrap();

        let got = engine.0.borrow().clone().unwrap();
        assert_eq!(got.bind, ":80");
        assert_eq!(got.challenge_path, Path::new("/srv/challenges"));
        assert_eq!(got.challenge_gid.as_deref(), Some("www-data"));
        assert_eq!(got.service_uid.as_deref(), Some("daemon"));
    }

    #[test]
    fn empty_flags_are_unset() {
        let state = tempfile::tempdir().unwrap();
        let opts = RunOptions {
            path: Some(""),
            challenge_gid: Some(""),
            service_uid: None,
        };
        let config = redirector_config(&opts, state.path());
        assert_eq!(config.challenge_path, Path::new("/var/run/acme/acme-challenge"));
        assert!(config.challenge_gid.is_none());
    }

    #[test]
    fn missing_engine_is_an_error() {
        let config = RedirectorConfig::new("/x".into());
        assert!(NoEngine.serve(&config).is_err());
    }
}
