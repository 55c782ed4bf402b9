// src/error.rs
// =============================================================================
// Error types for the sync pipeline.
//
// Every failure aborts the run, so these exist to give a clear message, not
// to drive recovery. The variants follow the four things that can go wrong:
// - Config: the manifest is missing or malformed
// - Network: the request failed or GitHub answered with an error status
// - Data: the response body is not what the contents API should return
// - Io: writing a file or directory failed
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

// Result alias used throughout the pipeline.
pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    // The manifest could not be read or parsed.
    #[error("invalid manifest {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("API base URL {0} cannot take path segments")]
    InvalidApiBase(String),

    // Transport failure (connect, timeout, TLS).
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // GitHub answered, but not with a 2xx.
    #[error("GitHub returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    // The response body did not contain decodable file contents.
    #[error("bad response for {url}: {message}")]
    Data { url: String, message: String },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize crowdin config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl SyncError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn data(url: impl Into<String>, message: impl Into<String>) -> Self {
        SyncError::Data {
            url: url.into(),
            message: message.into(),
        }
    }
}
