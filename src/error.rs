//! Error handling for the document pipeline
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for pipeline stages
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {key}: {message}")]
    InvalidEnv { key: &'static str, message: String },

    #[error("document downloader exited with status {0}")]
    DownloaderFailed(String),

    #[error("nextcloud request failed: {0}")]
    Nextcloud(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = anyhow::Result<T>;
