//! Log subscriber setup
//!
//! The library only emits `tracing` events. Binaries build a [`LogSettings`]
//! value and hand it to [`init`]; nothing here reads the environment.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use eyre::{Context, Result, eyre};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::config::LoggingConfig;

/// Environment variable consulted by the binary for the log level
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Name of the log file written inside `log_dir`
pub const LOG_FILE_NAME: &str = "ssa-parser.log";

/// Resolved logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Level,
    pub log_dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_dir: None,
        }
    }
}

impl LogSettings {
    /// Pick the level with priority: verbose flag > environment value > config file > INFO
    ///
    /// Unknown level names fall back to INFO; the offending string is returned
    /// alongside so the caller can report it.
    pub fn resolve(verbose: bool, env_level: Option<&str>, config: &LoggingConfig) -> (Self, Option<String>) {
        let (level, unknown) = if verbose {
            (Level::DEBUG, None)
        } else {
            match env_level.or(config.level.as_deref()) {
                Some(s) => match parse_level(s) {
                    Some(level) => (level, None),
                    None => (Level::INFO, Some(s.to_string())),
                },
                None => (Level::INFO, None),
            }
        };

        let settings = Self {
            level,
            log_dir: config.log_dir.clone(),
        };
        (settings, unknown)
    }
}

/// Parse a level name, case-insensitively
pub fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" => Some(Level::ERROR),
        _ => None,
    }
}

/// Install the global subscriber: stderr always, plus a log file when `log_dir` is set
pub fn init(settings: &LogSettings) -> Result<()> {
    let filter = EnvFilter::new(settings.level.as_str());
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match &settings.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir).context("Failed to create log directory")?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE_NAME))
                .context("Failed to open log file")?;
            builder
                .with_ansi(false)
                .with_writer(std::io::stderr.and(Arc::new(file)))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| eyre!("Failed to install log subscriber: {}", e))?;
    tracing::debug!(level = %settings.level, "Logging initialized");
    Ok(())
}
