//! Error types for the generator and sampling layer.

use thiserror::Error;

/// Errors raised by generator draws and sampling helpers.
///
/// Empty inputs are not errors; they surface as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    /// The caller passed an argument outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RandomError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Convenience alias used across the crate.
pub type Result<T, E = RandomError> = std::result::Result<T, E>;
