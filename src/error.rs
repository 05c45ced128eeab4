//! Typed errors for configuration and table stores.

use std::path::PathBuf;

use thiserror::Error;

/// A spreadsheet column letter that cannot be mapped to an index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("column letter is empty")]
    Empty,

    #[error("invalid character '{found}' in column letter '{letter}'")]
    InvalidCharacter { letter: String, found: char },

    #[error("column letter '{0}' is out of range")]
    OutOfRange(String),
}

/// Failure to load a [`ProcessConfig`](crate::config::ProcessConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by a [`TableStore`](crate::store::TableStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("table source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("writing .{0} files is not supported")]
    ReadOnlyFormat(String),
}
