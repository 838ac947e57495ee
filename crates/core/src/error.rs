//! Engine error types.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the engine.
///
/// Amount entry never fails; only exchange rate updates can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Rate text was not a number within the accepted range.
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    /// The rate is locked and cannot be edited.
    #[error("Exchange rate is locked")]
    RateLocked,
}

impl From<CoreError> for bgneur_shared::AppError {
    fn from(err: CoreError) -> Self {
        Self::Validation(err.to_string())
    }
}
