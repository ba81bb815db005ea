//! Joomla storage provider implementation.
//!
//! Implements both federation traits over the legacy store. This is
//! the soft-failure boundary of the bridge: every store error on a
//! lookup or validation path is logged with the driver message and
//! SQLSTATE, then degraded to `None` / `false` / zero. Only the
//! configuration-time checks surface hard errors.

use std::sync::Arc;

use cb_federation::config::{EditMode, FederationConfig};
use cb_federation::error::FederationResult;
use cb_federation::provider::{CredentialValidator, UserStorageProvider};
use cb_model::{CredentialInput, CredentialType, User};
use uuid::Uuid;

use crate::config::JoomlaConfig;
use crate::error::{JoomlaError, JoomlaResult};
use crate::hash::verify_password;
use crate::mapper::JoomlaUserMapper;
use crate::store::{LegacyUserStore, MySqlUserStore};

/// Provider type identifier.
pub const PROVIDER_TYPE: &str = "joomla";

/// Joomla storage provider.
///
/// Read-only user federation against a legacy Joomla MySQL database.
/// Generic over the store so the provider semantics can be exercised
/// without a live database.
pub struct JoomlaStorageProvider<S = MySqlUserStore> {
    /// Provider ID.
    id: Uuid,

    /// Federation configuration.
    federation_config: FederationConfig,

    /// Joomla-specific configuration.
    joomla_config: Arc<JoomlaConfig>,

    /// Legacy store access.
    store: S,

    /// Row mapper.
    mapper: JoomlaUserMapper,
}

impl JoomlaStorageProvider<MySqlUserStore> {
    /// Creates a provider connected to the legacy database.
    ///
    /// Validates the configuration and bootstraps the connection pool
    /// with the configured probe timeout.
    ///
    /// ## Errors
    ///
    /// Returns a hard error if the configuration is invalid or the
    /// database is unreachable.
    pub async fn connect(
        id: Uuid,
        realm_id: Uuid,
        name: impl Into<String>,
        joomla_config: JoomlaConfig,
    ) -> JoomlaResult<Self> {
        joomla_config.validate()?;

        let joomla_config = Arc::new(joomla_config);
        let store = MySqlUserStore::connect(Arc::clone(&joomla_config)).await?;

        Ok(Self::assemble(id, realm_id, name.into(), joomla_config, store))
    }
}

impl<S: LegacyUserStore> JoomlaStorageProvider<S> {
    /// Creates a provider over an existing store.
    ///
    /// ## Errors
    ///
    /// Returns a configuration error if the configuration is invalid.
    pub fn with_store(
        id: Uuid,
        realm_id: Uuid,
        name: impl Into<String>,
        joomla_config: JoomlaConfig,
        store: S,
    ) -> JoomlaResult<Self> {
        joomla_config.validate()?;

        Ok(Self::assemble(
            id,
            realm_id,
            name.into(),
            Arc::new(joomla_config),
            store,
        ))
    }

    fn assemble(
        id: Uuid,
        realm_id: Uuid,
        name: String,
        joomla_config: Arc<JoomlaConfig>,
        store: S,
    ) -> Self {
        let federation_config = FederationConfig::builder()
            .id(id)
            .realm_id(realm_id)
            .provider_type(PROVIDER_TYPE)
            .name(name)
            .edit_mode(EditMode::ReadOnly)
            .connection_timeout(joomla_config.connect_timeout)
            .build();

        let mapper = JoomlaUserMapper::new(Arc::clone(&joomla_config));

        Self {
            id,
            federation_config,
            joomla_config,
            store,
            mapper,
        }
    }

    /// Returns the provider ID.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the Joomla configuration.
    #[must_use]
    pub fn joomla_config(&self) -> &JoomlaConfig {
        &self.joomla_config
    }

    /// Fetches a non-empty stored hash, degrading failures to `None`.
    async fn stored_hash(&self, username: &str) -> Option<String> {
        match self.store.fetch_password_hash(username).await {
            Ok(Some(hash)) if !hash.is_empty() => Some(hash),
            Ok(_) => None,
            Err(err) => {
                log_store_failure("fetch password hash", &err);
                None
            }
        }
    }
}

/// Records a store failure with enough detail to diagnose; the error
/// display carries the driver message and SQLSTATE.
fn log_store_failure(operation: &'static str, err: &JoomlaError) {
    tracing::error!(operation, error = %err, "legacy store operation failed");
}

impl<S: LegacyUserStore> UserStorageProvider for JoomlaStorageProvider<S> {
    fn config(&self) -> &FederationConfig {
        &self.federation_config
    }

    fn provider_type(&self) -> &'static str {
        PROVIDER_TYPE
    }

    async fn validate_config(&self) -> FederationResult<()> {
        self.joomla_config.validate().map_err(Into::into)
    }

    async fn test_connection(&self) -> FederationResult<()> {
        self.store.ping().await.map_err(Into::into)
    }

    async fn get_user_by_username(&self, realm_id: Uuid, username: &str) -> Option<User> {
        match self.store.fetch_user(username).await {
            Ok(row) => row.map(|r| self.mapper.map_to_user(realm_id, &r, &self.id.to_string())),
            Err(err) => {
                log_store_failure("user lookup", &err);
                None
            }
        }
    }

    async fn get_user_by_external_id(&self, realm_id: Uuid, external_id: &str) -> Option<User> {
        // The external id embedded in storage ids is the login itself.
        self.get_user_by_username(realm_id, external_id).await
    }

    async fn get_user_by_email(&self, _realm_id: Uuid, _email: &str) -> Option<User> {
        // The legacy integration offers no working email lookup path.
        None
    }

    async fn count_users(&self, _realm_id: Uuid, _include_service_accounts: bool) -> usize {
        // The legacy schema has no service accounts; the flag has no
        // rows to include or exclude.
        match self.store.count_active_users().await {
            Ok(count) => usize::try_from(count).unwrap_or(usize::MAX),
            Err(err) => {
                log_store_failure("count users", &err);
                0
            }
        }
    }
}

impl<S: LegacyUserStore> CredentialValidator for JoomlaStorageProvider<S> {
    fn supports_credential_type(&self, credential_type: CredentialType) -> bool {
        credential_type.is_password()
    }

    async fn is_configured_for(
        &self,
        _realm_id: Uuid,
        username: &str,
        credential_type: CredentialType,
    ) -> bool {
        if !self.supports_credential_type(credential_type) {
            return false;
        }

        self.stored_hash(username).await.is_some()
    }

    async fn validate_credential(
        &self,
        _realm_id: Uuid,
        username: &str,
        input: &CredentialInput,
    ) -> bool {
        if !self.supports_credential_type(input.credential_type) {
            return false;
        }

        let Some(stored) = self.stored_hash(username).await else {
            return false;
        };

        match verify_password(&input.secret, &stored) {
            Ok(valid) => valid,
            Err(err) => {
                // A hash we cannot parse is an invalid credential,
                // never a valid one. Not a store failure: the row was
                // read fine, the stored hash itself is unusable.
                tracing::error!(error = %err, "stored password hash rejected");
                false
            }
        }
    }
}
