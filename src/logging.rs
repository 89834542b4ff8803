// Tracing setup
//
// The TUI owns stdout/stderr while it runs, so logs only go to a file there.

use crate::config::Config;
use crate::error::ConfigError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go when no log file is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Install nothing
    Silent,
    /// Write to stderr
    Stderr,
}

/// Install the global subscriber. Returns true if one was installed.
pub fn init(config: &Config, fallback: Fallback) -> Result<bool, ConfigError> {
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|source| {
        ConfigError::InvalidFilter {
            filter: config.log_filter.clone(),
            source,
        }
    })?;

    match (&config.log_file, fallback) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| ConfigError::LogFile {
                    path: path.clone(),
                    source,
                })?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|source| ConfigError::LoggingInit { source })?;
            Ok(true)
        }
        (None, Fallback::Stderr) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|source| ConfigError::LoggingInit { source })?;
            Ok(true)
        }
        (None, Fallback::Silent) => Ok(false),
    }
}
