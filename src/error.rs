//! Error types for the animal list.

use std::path::PathBuf;

/// Errors raised by repository mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A delete targeted a position outside `[0, len)`
    #[error("index {index} out of range for repository of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised while reading configuration or installing logging.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The log file could not be opened for appending
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// RUST_LOG could not be parsed as a tracing filter
    #[error("invalid log filter {filter:?}: {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A tracing subscriber was already installed
    #[error("logging already initialised: {source}")]
    LoggingInit {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
