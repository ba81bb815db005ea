//! Legacy user store access.
//!
//! Two parameterized read queries and a count, all against the prefixed
//! `users` table. The [`LegacyUserStore`] trait is the seam between the
//! provider and the database; [`MySqlUserStore`] is the production
//! implementation over a sqlx pool.
//!
//! Connections, statements, and row cursors are acquired and released
//! per call by the pool and driver on every exit path, including
//! errors. Nothing is cached between calls.

use std::sync::Arc;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tokio::time::timeout;

use crate::config::JoomlaConfig;
use crate::error::{from_sqlx, JoomlaError, JoomlaResult};

/// Transient image of a row in the legacy `users` table.
///
/// Read, mapped, and discarded per lookup; never persisted by this
/// system.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JoomlaUserRow {
    /// Account identifier in the legacy store.
    pub id: i64,
    /// Free-text full name ("first last", separated by the first space).
    pub name: String,
    /// Native Joomla login name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Stored password hash in modified-crypt format, if any.
    pub password: Option<String>,
    /// Blocked flag; the account is enabled iff this is zero.
    pub block: i8,
}

impl JoomlaUserRow {
    /// Checks whether the account is blocked.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.block != 0
    }
}

/// Read access to the legacy user store.
///
/// Implementations must consume at most the first row per lookup: the
/// store does not enforce uniqueness on the lookup column and imposes
/// no row ordering.
#[allow(async_fn_in_trait)]
pub trait LegacyUserStore: Send + Sync {
    /// Fetches the first user row matching the configured lookup column.
    ///
    /// ## Errors
    ///
    /// Returns a [`crate::JoomlaError`] on connectivity or query failure.
    async fn fetch_user(&self, login: &str) -> JoomlaResult<Option<JoomlaUserRow>>;

    /// Fetches the stored password hash for a login.
    ///
    /// Shares the same filtered statement as [`Self::fetch_user`]; a
    /// missing user and a user without a hash both yield `None`. Each
    /// call is a fresh round trip; validators never reuse a fetched
    /// hash.
    ///
    /// ## Errors
    ///
    /// Returns a [`crate::JoomlaError`] on connectivity or query failure.
    async fn fetch_password_hash(&self, login: &str) -> JoomlaResult<Option<String>> {
        Ok(self.fetch_user(login).await?.and_then(|row| row.password))
    }

    /// Counts the unblocked accounts in the store.
    ///
    /// ## Errors
    ///
    /// Returns a [`crate::JoomlaError`] on connectivity or query failure.
    async fn count_active_users(&self) -> JoomlaResult<u64>;

    /// Round-trips the connection as a health check.
    ///
    /// ## Errors
    ///
    /// Returns a [`crate::JoomlaError`] if the store is unreachable.
    async fn ping(&self) -> JoomlaResult<()>;
}

/// Legacy user store over a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlUserStore {
    pool: MySqlPool,
    config: Arc<JoomlaConfig>,
}

impl MySqlUserStore {
    /// Connects to the legacy database and probes connectivity.
    ///
    /// The configured timeout bounds only this bootstrap probe and
    /// later [`LegacyUserStore::ping`] calls. Per-request connection
    /// acquisition keeps the pool's own default, so a short probe
    /// timeout cannot fail logins under pool contention.
    ///
    /// ## Errors
    ///
    /// Returns a connection error if the probe fails or times out.
    pub async fn connect(config: Arc<JoomlaConfig>) -> JoomlaResult<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_max_size)
            .connect_lazy_with(options);

        let store = Self { pool, config };
        store.ping().await?;

        Ok(store)
    }

    /// Creates a store over an existing pool.
    #[must_use]
    pub const fn new(pool: MySqlPool, config: Arc<JoomlaConfig>) -> Self {
        Self { pool, config }
    }

    // The table name comes from trusted operator configuration (see
    // `JoomlaConfig::table_prefix`); only the filter value is bound.
    fn user_query(&self) -> String {
        format!(
            "SELECT id, name, username, email, password, block FROM {} WHERE {} = ?",
            self.config.users_table(),
            self.config.lookup_column.column(),
        )
    }

    fn count_query(&self) -> String {
        format!(
            "SELECT COUNT(id) FROM {} WHERE block = 0",
            self.config.users_table(),
        )
    }
}

impl LegacyUserStore for MySqlUserStore {
    async fn fetch_user(&self, login: &str) -> JoomlaResult<Option<JoomlaUserRow>> {
        sqlx::query_as::<_, JoomlaUserRow>(&self.user_query())
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx)
    }

    async fn count_active_users(&self) -> JoomlaResult<u64> {
        let count: i64 = sqlx::query_scalar(&self.count_query())
            .fetch_one(&self.pool)
            .await
            .map_err(from_sqlx)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn ping(&self) -> JoomlaResult<()> {
        let probe = sqlx::query("SELECT 1").execute(&self.pool);

        timeout(self.config.connect_timeout, probe)
            .await
            .map_err(|_| {
                JoomlaError::connection(format!(
                    "connectivity probe timed out after {:?}",
                    self.config.connect_timeout
                ))
            })?
            .map_err(from_sqlx)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LookupColumn;

    fn store_with(config: JoomlaConfig) -> MySqlUserStore {
        let pool = MySqlPoolOptions::new().connect_lazy_with(
            MySqlConnectOptions::new()
                .host(&config.host)
                .database(&config.database),
        );
        MySqlUserStore::new(pool, Arc::new(config))
    }

    fn config() -> JoomlaConfig {
        JoomlaConfig::builder()
            .host("joomla-db")
            .username("joomla")
            .password("joomla")
            .database("joomla")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn user_query_templates_prefix_and_lookup_column() {
        let store = store_with(config());
        assert_eq!(
            store.user_query(),
            "SELECT id, name, username, email, password, block FROM j3u0q_users WHERE email = ?"
        );
    }

    #[tokio::test]
    async fn user_query_respects_username_lookup() {
        let mut config = config();
        config.lookup_column = LookupColumn::Username;
        config.table_prefix = "abc_".to_string();

        let store = store_with(config);
        assert_eq!(
            store.user_query(),
            "SELECT id, name, username, email, password, block FROM abc_users WHERE username = ?"
        );
    }

    #[tokio::test]
    async fn count_query_filters_blocked_rows() {
        let store = store_with(config());
        assert_eq!(
            store.count_query(),
            "SELECT COUNT(id) FROM j3u0q_users WHERE block = 0"
        );
    }

    #[tokio::test]
    async fn probe_failure_is_a_connection_error() {
        // TEST-NET-1 address: the probe either blackholes (timeout
        // fires) or is rejected outright; both are connection errors.
        let mut config = config();
        config.host = "192.0.2.1".to_string();
        config.connect_timeout = std::time::Duration::from_millis(50);

        let store = store_with(config);
        let err = store.ping().await.unwrap_err();
        assert!(err.is_connection_error());
    }

    #[test]
    fn blocked_flag() {
        let row = JoomlaUserRow {
            id: 1,
            name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: None,
            block: 1,
        };
        assert!(row.is_blocked());
    }
}
