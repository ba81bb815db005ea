//! Federation error types.
//!
//! Two failure families matter to callers: configuration failures,
//! which are hard errors that block provider activation, and
//! per-request store failures, which providers log and degrade to
//! empty/negative results at their API boundary.

use thiserror::Error;

/// Errors that can occur during federation operations.
#[derive(Debug, Error)]
pub enum FederationError {
    /// Configuration error (blocks provider activation).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection error to the external store.
    #[error("Connection error: {0}")]
    Connection(String),

    /// User lookup error against the external store.
    #[error("User lookup error: {0}")]
    UserLookup(String),

    /// Credential handling error (hash format, verification machinery).
    #[error("Credential error: {0}")]
    Credential(String),
}

impl FederationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Checks if this is a configuration error.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Checks if this is a connection error.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for federation operations.
pub type FederationResult<T> = Result<T, FederationError>;
