//! Systemd unit description for the redirector.
//!
//! A unit is kept as an ordered list of `(section, key, value)` options and
//! only turned into text when it is written out.

use std::fmt;
use std::path::Path;

/// One `Key=Value` line and the section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOption {
    pub section: String,
    pub key: String,
    pub value: String,
}

impl UnitOption {
    pub fn new(section: &str, key: &str, value: impl Into<String>) -> Self {
        Self {
            section: section.to_string(),
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// Ordered, immutable systemd unit description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    options: Vec<UnitOption>,
}

impl UnitDescriptor {
    pub fn new(options: Vec<UnitOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[UnitOption] {
        &self.options
    }

    /// Value of the first option matching `section` and `key`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.section == section && o.key == key)
            .map(|o| o.value.as_str())
    }
}

impl fmt::Display for UnitDescriptor {
    /// Writes a section header whenever the section changes, so options must
    /// already be grouped by section.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current: Option<&str> = None;
        for opt in &self.options {
            if current != Some(opt.section.as_str()) {
                if current.is_some() {
                    writeln!(f)?;
                }
                writeln!(f, "[{}]", opt.section)?;
                current = Some(&opt.section);
            }
            writeln!(f, "{}={}", opt.key, opt.value)?;
        }
        Ok(())
    }
}

/// Build the redirector unit for `exec_path`, running as `username`.
///
/// `username` is substituted as-is; callers resolve the account first.
pub fn redirector_unit(exec_path: &Path, username: &str) -> UnitDescriptor {
    UnitDescriptor::new(vec![
        UnitOption::new("Unit", "Description", "acmetool HTTP redirector"),
        UnitOption::new("Service", "Type", "notify"),
        UnitOption::new(
            "Service",
            "ExecStart",
            format!("{} run --service.uid={}", exec_path.display(), username),
        ),
        UnitOption::new("Service", "Restart", "always"),
        UnitOption::new("Service", "RestartSec", "30"),
        UnitOption::new("Install", "WantedBy", "multi-user.target"),
    ])
}
