//! Joomla provider configuration.
//!
//! Connection parameters for the legacy MySQL database plus the table
//! prefix the Joomla installation was deployed with. All values are
//! operator-supplied at provider construction and validated before the
//! provider activates.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{JoomlaError, JoomlaResult};

/// Column the user lookup filters on.
///
/// Legacy Joomla deployments log in by email address, so the lookup
/// filters on the `email` column even though the host passes the value
/// as a "username". The default preserves that behavior exactly; switch
/// to [`LookupColumn::Username`] for installations where accounts log
/// in with their Joomla username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupColumn {
    /// Filter on the `email` column (legacy behavior).
    #[default]
    Email,
    /// Filter on the `username` column.
    Username,
}

impl LookupColumn {
    /// Returns the column name used in the lookup predicate.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
        }
    }
}

/// Joomla provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoomlaConfig {
    // === Connection ===
    /// Database host.
    pub host: String,

    /// Database port.
    pub port: u16,

    /// Database user.
    pub username: String,

    /// Database password.
    #[serde(skip_serializing)]
    pub password: String,

    /// Database name.
    pub database: String,

    // === Schema ===
    /// Table prefix configured in the Joomla installation (e.g. `j3u0q_`).
    ///
    /// The prefix is substituted into the table-name position of every
    /// query, where parameter binding offers no protection. It is
    /// trusted operator configuration and must never be sourced from
    /// end-user input: a hostile prefix can inject arbitrary SQL.
    pub table_prefix: String,

    /// Column the user lookup filters on.
    pub lookup_column: LookupColumn,

    // === Pool ===
    /// Maximum connections in the pool.
    pub pool_max_size: u32,

    /// Timeout for the configuration-time connectivity probe. Does not
    /// apply to per-request queries or pool acquisition.
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl JoomlaConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> JoomlaConfigBuilder {
        JoomlaConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error that blocks provider activation if
    /// the host, database name, or credentials are missing.
    pub fn validate(&self) -> JoomlaResult<()> {
        if self.host.is_empty() || self.database.is_empty() {
            return Err(JoomlaError::config(
                "database host or database name not configured",
            ));
        }

        if self.username.is_empty() || self.password.is_empty() {
            return Err(JoomlaError::config("database credentials not set"));
        }

        Ok(())
    }

    /// Returns the prefixed name of the legacy `users` table.
    #[must_use]
    pub fn users_table(&self) -> String {
        format!("{}users", self.table_prefix)
    }
}

/// Builder for [`JoomlaConfig`].
#[derive(Debug, Default)]
pub struct JoomlaConfigBuilder {
    host: Option<String>,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    database: Option<String>,
    table_prefix: String,
    lookup_column: LookupColumn,
    pool_max_size: u32,
    connect_timeout: Duration,
}

impl JoomlaConfigBuilder {
    /// Creates a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            port: 3306,
            table_prefix: "j3u0q_".to_string(),
            pool_max_size: 5,
            connect_timeout: Duration::from_secs(1),
            ..Default::default()
        }
    }

    /// Sets the database host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the database port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database user.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the database password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the database name.
    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the Joomla table prefix.
    #[must_use]
    pub fn table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Sets the lookup column.
    #[must_use]
    pub const fn lookup_column(mut self, column: LookupColumn) -> Self {
        self.lookup_column = column;
        self
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn pool_max_size(mut self, max: u32) -> Self {
        self.pool_max_size = max;
        self
    }

    /// Sets the connectivity-probe timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if required fields are missing.
    pub fn build(self) -> JoomlaResult<JoomlaConfig> {
        let config = JoomlaConfig {
            host: self.host.unwrap_or_default(),
            port: self.port,
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            database: self.database.unwrap_or_default(),
            table_prefix: self.table_prefix,
            lookup_column: self.lookup_column,
            pool_max_size: self.pool_max_size,
            connect_timeout: self.connect_timeout,
        };

        config.validate()?;

        Ok(config)
    }
}
