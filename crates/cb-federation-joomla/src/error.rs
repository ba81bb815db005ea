//! Joomla-specific error types.
//!
//! ## Security Note
//!
//! Error messages must not leak sensitive information like database
//! passwords or presented secrets. Query failures carry the driver
//! message and SQLSTATE so operators can diagnose connectivity issues
//! from the logs alone.

use cb_federation::FederationError;
use thiserror::Error;

/// Joomla provider errors.
#[derive(Debug, Error)]
pub enum JoomlaError {
    /// Invalid configuration.
    #[error("Joomla configuration error: {0}")]
    Configuration(String),

    /// Connection to the legacy database failed.
    #[error("Joomla connection failed: {0}")]
    Connection(String),

    /// A query against the legacy store failed.
    #[error("Joomla query failed (sqlstate {code:?}): {message}")]
    Query {
        /// Driver error message.
        message: String,
        /// Store-specific error code (SQLSTATE), when available.
        code: Option<String>,
    },

    /// A stored password hash could not be processed.
    #[error("Joomla password hash error: {0}")]
    Hash(String),
}

impl JoomlaError {
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

    /// Creates a hash error.
    #[must_use]
    pub fn hash(msg: impl Into<String>) -> Self {
        Self::Hash(msg.into())
    }

    /// Checks if this is a connection-related error.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for Joomla provider operations.
pub type JoomlaResult<T> = Result<T, JoomlaError>;

/// Converts a sqlx error, capturing the SQLSTATE for logging.
pub(crate) fn from_sqlx(err: sqlx::Error) -> JoomlaError {
    match err {
        sqlx::Error::Io(e) => JoomlaError::Connection(e.to_string()),
        sqlx::Error::Tls(e) => JoomlaError::Connection(e.to_string()),
        sqlx::Error::PoolTimedOut => {
            JoomlaError::Connection("connection pool timed out".to_string())
        }
        sqlx::Error::PoolClosed => JoomlaError::Connection("connection pool closed".to_string()),
        sqlx::Error::Database(db) => JoomlaError::Query {
            message: db.message().to_string(),
            code: db.code().map(|c| c.to_string()),
        },
        other => JoomlaError::Query {
            message: other.to_string(),
            code: None,
        },
    }
}

impl From<JoomlaError> for FederationError {
    fn from(err: JoomlaError) -> Self {
        match err {
            JoomlaError::Configuration(msg) => Self::Configuration(msg),
            JoomlaError::Connection(msg) => Self::Connection(msg),
            JoomlaError::Query { .. } => Self::UserLookup(err.to_string()),
            JoomlaError::Hash(msg) => Self::Credential(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_surfaces_sqlstate() {
        let err = JoomlaError::Query {
            message: "table missing".to_string(),
            code: Some("42S02".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("42S02"));
        assert!(msg.contains("table missing"));
    }

    #[test]
    fn maps_into_federation_taxonomy() {
        let config: FederationError = JoomlaError::config("no host").into();
        assert!(config.is_configuration_error());

        let conn: FederationError = JoomlaError::connection("refused").into();
        assert!(conn.is_connection_error());

        let query: FederationError = JoomlaError::Query {
            message: "boom".to_string(),
            code: None,
        }
        .into();
        assert!(matches!(query, FederationError::UserLookup(_)));
    }

    #[test]
    fn connection_predicate() {
        assert!(JoomlaError::connection("refused").is_connection_error());
        assert!(!JoomlaError::hash("bad prefix").is_connection_error());
    }
}
