//! Pre-recorded answers for interactive questions.
//!
//! A response file is a flat YAML (or JSON) mapping from question key to a
//! text, integer or boolean answer:
//!
//! ```yaml
//! acme-enter-email: "hostmaster@example.com"
//! acmetool-quickstart-key-type: rsa
//! acmetool-quickstart-rsa-key-size: 2048
//! acmetool-quickstart-install-redirector-systemd: true
//! ```
//!
//! Booleans answer yes/no questions: `true` accepts, `false` cancels.
//! Entries of any other shape are logged and skipped; they never prevent the
//! rest of the file from loading.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("response for {0} invalid: unknown response value")]
    Unsupported(String),

    #[error("read response file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse response file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Resolved answer to a named question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub value: String,
    pub cancelled: bool,
}

impl Response {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            cancelled: false,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            value: String::new(),
            cancelled: true,
        }
    }
}

/// Scalar shapes a response file entry may take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawResponse {
    Boolean(bool),
    Integer(i64),
    Text(String),
    Unsupported(IgnoredAny),
}

impl RawResponse {
    pub fn into_response(self, key: &str) -> Result<Response, ResponseError> {
        match self {
            Self::Text(s) => Ok(Response::value(s)),
            Self::Integer(n) => Ok(Response::value(n.to_string())),
            Self::Boolean(accepted) => Ok(Response {
                value: String::new(),
                cancelled: !accepted,
            }),
            Self::Unsupported(_) => Err(ResponseError::Unsupported(key.to_string())),
        }
    }
}

/// Answers keyed by question, consulted before prompting.
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    responses: HashMap<String, Response>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the answer for `key`.
    pub fn set_response(&mut self, key: impl Into<String>, response: Response) {
        self.responses.insert(key.into(), response);
    }

    pub fn get(&self, key: &str) -> Option<&Response> {
        self.responses.get(key)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Decode every entry of `raw`, skipping (and logging) invalid ones.
    ///
    /// Returns the number of entries stored.
    pub fn parse_responses(&mut self, raw: BTreeMap<String, RawResponse>) -> usize {
        let mut stored = 0;
        for (key, value) in raw {
            match value.into_response(&key) {
                Ok(response) => {
                    self.set_response(key, response);
                    stored += 1;
                }
                Err(e) => log::error!("{e}"),
            }
        }
        stored
    }

    /// Parse response file text and add its entries.
    pub fn load_str(&mut self, text: &str) -> Result<usize, ResponseError> {
        if text.trim().is_empty() {
            return Ok(0);
        }
        let raw: Option<BTreeMap<String, RawResponse>> = serde_yaml::from_str(text)?;
        Ok(self.parse_responses(raw.unwrap_or_default()))
    }

    pub fn load_file(&mut self, path: &Path) -> Result<usize, ResponseError> {
        let text = fs::read_to_string(path).map_err(|source| ResponseError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let stored = self.load_str(&text)?;
        log::debug!("loaded {stored} responses from {}", path.display());
        Ok(stored)
    }
}
