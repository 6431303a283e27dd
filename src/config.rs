use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::DEFAULT_STABLE_REF;
use crate::error::{NextVersionError, Result};

/// Project-local configuration file name
pub const CONFIG_FILE_NAME: &str = "nextversion.toml";

/// Represents the complete configuration for next-version.
///
/// Contains the stable ref, manifest discovery settings and the output name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_stable_ref")]
    pub stable_ref: String,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_stable_ref() -> String {
    DEFAULT_STABLE_REF.to_string()
}

fn default_follow_symlinks() -> bool {
    true
}

/// Returns the default glob patterns skipped during manifest discovery.
fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/.git/**".to_string()]
}

fn default_output_name() -> String {
    "next-version".to_string()
}

/// Configuration for locating the package manifest.
///
/// An explicit `path` is resolved against the workspace root and skips discovery.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default = "default_follow_symlinks")]
    pub follow_symlinks: bool,

    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: None,
            follow_symlinks: default_follow_symlinks(),
            exclude: default_exclude(),
        }
    }
}

/// Configuration for publishing the computed version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_name")]
    pub name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            name: default_output_name(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stable_ref: default_stable_ref(),
            manifest: ManifestConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `nextversion.toml` in current directory
/// 3. `.nextversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = format!("./{}", CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(&local).exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML configuration document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| NextVersionError::config(e.to_string()))?;

    if config.stable_ref.trim().is_empty() {
        return Err(NextVersionError::config("stable_ref must not be empty"));
    }
    if config.output.name.is_empty() {
        return Err(NextVersionError::config("output.name must not be empty"));
    }

    Ok(config)
}
