//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = ".ssa-parser.yml";

/// Main ssa-parser configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Template rendering configuration
    pub render: RenderConfig,
}

/// A loaded config plus the fallback files that were present but unusable
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub skipped: Vec<String>,
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must load. Otherwise the first usable file among
    /// `./.ssa-parser.yml` and `<config dir>/ssa-parser/ssa-parser.yml` wins;
    /// broken ones are recorded in [`LoadedConfig::skipped`] and passed over.
    pub fn load(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok(LoadedConfig {
                config,
                skipped: Vec::new(),
            });
        }

        let mut skipped = Vec::new();
        for path in fallback_paths().into_iter().filter(|p| p.exists()) {
            match Self::load_from_file(&path) {
                Ok(config) => return Ok(LoadedConfig { config, skipped }),
                Err(e) => skipped.push(format!("Ignoring config {}: {:#}", path.display(), e)),
            }
        }

        Ok(LoadedConfig {
            config: Self::default(),
            skipped,
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        serde_yaml::from_str(&content).context("Failed to parse config file")
    }
}

fn fallback_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    paths.extend(dirs::config_dir().map(|dir| dir.join("ssa-parser").join("ssa-parser.yml")));
    paths
}

/// Logging configuration as written in the config file
///
/// The `--verbose` flag and the `LOG_LEVEL` environment variable take
/// precedence over `level`; see [`crate::logging::LogSettings::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Directory for a plain-text log file, in addition to stderr
    #[serde(rename = "log-dir")]
    pub log_dir: Option<PathBuf>,
}

/// Template rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// HTML-escape `{{ }}` expressions; `{{{ }}}` is never escaped
    #[serde(rename = "escape-html")]
    pub escape_html: bool,

    /// Fail on access to missing fields instead of rendering them empty
    #[serde(rename = "strict-mode")]
    pub strict_mode: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            escape_html: true,
            strict_mode: false,
        }
    }
}
