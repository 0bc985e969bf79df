//! Error types for policy synchronization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a synchronization failure, surfaced in invocation responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    FetchError,
    ParseError,
    ConfigurationError,
    ApplyError,
}

/// Errors that can occur while synchronizing bucket policies.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The CDN endpoint could not be reached or answered with a failure.
    #[error("Failed to fetch CDN IP ranges: {0}")]
    Fetch(String),

    /// The CDN response was not the expected JSON shape.
    #[error("Failed to parse CDN IP ranges response: {0}")]
    Parse(String),

    /// No bucket targets were configured.
    #[error("No buckets configured: {0}")]
    Configuration(String),

    /// The storage provider rejected a policy write.
    #[error("Failed to apply policy to bucket '{bucket}': {message}")]
    Apply { bucket: String, message: String },
}

impl SyncError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn apply(bucket: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Apply {
            bucket: bucket.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(_) => ErrorKind::FetchError,
            Self::Parse(_) => ErrorKind::ParseError,
            Self::Configuration(_) => ErrorKind::ConfigurationError,
            Self::Apply { .. } => ErrorKind::ApplyError,
        }
    }

    /// Status code reported when this error ends an invocation.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration(_) => 400,
            Self::Fetch(_) | Self::Parse(_) => 502,
            Self::Apply { .. } => 500,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
