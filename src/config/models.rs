use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::DEFAULT_REPLACEMENT;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_DIRECTORY: &str = ".";
/// Audit log file name, appended to on every run
pub const DEFAULT_LOG_FILE: &str = "rename_files.log";

#[inline]
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[inline]
fn default_log_directory() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIRECTORY)
}

#[inline]
fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

#[inline]
fn default_replacement() -> char {
    DEFAULT_REPLACEMENT
}

/// Main tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the audit log
    #[serde(default = "default_log_directory")]
    pub log_directory: PathBuf,

    /// Audit log file name
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Character substituted for disallowed characters
    #[serde(default = "default_replacement")]
    pub replacement: char,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_directory: default_log_directory(),
            log_file: default_log_file(),
            replacement: default_replacement(),
        }
    }
}

impl RenameConfig {
    pub fn validate(&self) -> Result<()> {
        // Any other replacement would itself produce invalid names
        if !(self.replacement.is_ascii_alphanumeric() || matches!(self.replacement, '_' | '-')) {
            bail!(
                "Invalid replacement character {:?}: must be an ASCII letter, digit, '_' or '-'",
                self.replacement
            );
        }

        if self.log_file.trim().is_empty() {
            bail!("log_file cannot be empty");
        }

        Ok(())
    }
}
