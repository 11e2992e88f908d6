use crate::error::{Result, VersionQueryError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Runtime configuration for version resolution.
///
/// All keys are optional in the file; missing keys fall back to defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Whether untracked files make the working tree dirty
    #[serde(default = "default_include_untracked")]
    pub include_untracked: bool,

    /// Abort the commit walk after this many commits without finding the
    /// latest release tag
    #[serde(default = "default_max_commit_distance")]
    pub max_commit_distance: usize,

    /// Label of the pre-release segment attached to derived versions
    #[serde(default = "default_pre_release_label")]
    pub pre_release_label: String,
}

fn default_include_untracked() -> bool {
    true
}

fn default_max_commit_distance() -> usize {
    999
}

fn default_pre_release_label() -> String {
    "dev".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            include_untracked: default_include_untracked(),
            max_commit_distance: default_max_commit_distance(),
            pre_release_label: default_pre_release_label(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `versionquery.toml` in the current directory
/// 3. `versionquery.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./versionquery.toml").exists() {
        fs::read_to_string("./versionquery.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("versionquery.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| VersionQueryError::config(e.to_string()))
}
