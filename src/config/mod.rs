pub mod models;

pub use models::{RenameConfig, DEFAULT_LOG_FILE};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "winrename_config.json";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "WINRENAME_CONFIG";

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load configuration, falling back to defaults when the file is absent
pub fn load_config(path: &Path) -> Result<RenameConfig> {
    if !path.exists() {
        return Ok(RenameConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: RenameConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config.validate()?;

    Ok(config)
}
