//! Host error types.

use bgneur_shared::AppError;
use thiserror::Error;

/// Result type alias using `HostError`.
pub type HostResult<T> = Result<T, HostError>;

/// Errors raised while talking to the filesystem or the network.
#[derive(Debug, Error)]
pub enum HostError {
    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be encoded or decoded.
    #[error("Settings format error: {0}")]
    Json(#[from] serde_json::Error),

    /// No configuration directory could be determined.
    #[error("No configuration directory available")]
    NoConfigDir,

    /// Release metadata request failed.
    #[error("Update check failed: {0}")]
    Update(#[from] reqwest::Error),

    /// Release tag is not a semantic version.
    #[error("Invalid version '{0}'")]
    Version(String),
}

impl From<HostError> for AppError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Io(_) | HostError::NoConfigDir => Self::Io(err.to_string()),
            HostError::Json(_) => Self::Configuration(err.to_string()),
            HostError::Update(_) | HostError::Version(_) => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}
