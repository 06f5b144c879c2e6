use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main configuration structure for diskwhy, read from `config.toml`.
///
/// Every field is optional; command-line flags take precedence over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiskwhyConfig {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Defaults for what gets walked and counted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Size string such as `"100M"`, parsed like `--min-size`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<String>,

    /// Days, like `--older-than`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub older_than: Option<u64>,
}

/// Defaults for how much of each rollup is shown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_dirs: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_types: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_large_files: Option<usize>,
}

/// Display configuration options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Whether to color terminal output when stdout is a terminal (default: true)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl DiskwhyConfig {
    /// Load config from an explicit path, or from the default location if there is one.
    ///
    /// A missing default file is not an error. A path given explicitly must exist.
    pub fn load(custom_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match custom_path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_config_path() {
                Ok(p) if p.exists() => p,
                Ok(_) => return Ok(Self::default()),
                Err(e) => {
                    log::warn!("{}; using built-in defaults", e);
                    return Ok(Self::default());
                }
            },
        };

        let contents =
            std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;

        log::debug!("loaded config from {}", path.display());
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Get default config path: `<config dir>/diskwhy/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;

        Ok(config_dir.join("diskwhy").join("config.toml"))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to read config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
