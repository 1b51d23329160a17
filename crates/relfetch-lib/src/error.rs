use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelFetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("CLI argument validation failed: {details}")]
    CliArgumentValidation { details: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}

/// Failures of the automated fetch. Every variant ends in the same fallback
/// message; the variants only exist so the cause can be logged precisely.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid download URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: opendal::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract {path}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive {archive} contains unsafe path: {entry}")]
    UnsafeEntry { archive: PathBuf, entry: PathBuf },
}
