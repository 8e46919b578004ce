/// Error types for Caption Studio
///
/// Every failure of an analysis request is typed here for logging, but the
/// user only ever sees one generic message (see `state::controller`).

use std::path::PathBuf;

/// Failure of a single analysis request against the backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The HTTP client or the multipart body could not be built
    #[error("could not build request: {0}")]
    Client(String),

    /// Connection refused, reset, DNS failure, ...
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend took longer than the configured timeout
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The backend answered with a non-success status
    #[error("backend responded with HTTP {0}")]
    Status(u16),

    /// The response body was not valid JSON
    #[error("could not parse response body: {0}")]
    Parse(String),
}

/// Failure while loading the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while reading a file the user picked or dropped
#[derive(Debug, Clone, thiserror::Error)]
pub enum UploadError {
    #[error("could not read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// Refused from its metadata, before the contents were read
    #[error("{path} is {size} bytes, over the {limit} byte limit")]
    TooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
        /// Sniffed from the file header only
        media_type: String,
    },
}
