//! Error types for Stripekit
//!
//! This module defines the common error type shared across components.

use thiserror::Error;

/// Common result type for Stripekit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for Stripekit
#[derive(Debug, Error)]
pub enum Error {
    #[error("erasure coding error: {0}")]
    ErasureCoding(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this is a configuration error
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert!(Error::configuration("bad factory").is_configuration());
        assert!(!Error::internal("oops").is_configuration());
    }
}
