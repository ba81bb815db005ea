//! User storage provider traits.
//!
//! These traits are the contract between the host platform and a
//! federation backend: resolve user records by username/id/email, and
//! validate credentials against the external store.
//!
//! ## Failure semantics
//!
//! Lookup and validation methods deliberately return plain
//! `Option`/`bool`/`usize` values: a store failure is logged by the
//! provider and surfaced as "not found" / "invalid" / zero. The host
//! cannot distinguish a missing user from an unreachable store through
//! these calls; that is the accepted boundary of a legacy integration.
//! Hard errors are reserved for the configuration-time checks
//! (`validate_config`, `test_connection`), which block activation.

use cb_model::{CredentialInput, CredentialType, StorageId, User};
use uuid::Uuid;

use crate::config::FederationConfig;
use crate::error::FederationResult;

// ============================================================================
// User Storage Provider
// ============================================================================

/// Trait for user storage federation providers.
///
/// ## Implementation Notes
///
/// - Providers must be thread-safe (Send + Sync); the external store
///   connection is managed per request, never shared mutable state.
/// - Records are resolved fresh on every call; providers never cache.
#[allow(async_fn_in_trait)]
pub trait UserStorageProvider: Send + Sync {
    /// Returns the provider configuration.
    fn config(&self) -> &FederationConfig;

    /// Returns the provider type identifier.
    fn provider_type(&self) -> &'static str;

    /// Validates the provider configuration.
    ///
    /// ## Errors
    ///
    /// Returns a hard [`crate::FederationError`] that blocks activation
    /// if the configuration is incomplete or invalid.
    async fn validate_config(&self) -> FederationResult<()>;

    /// Tests the connection to the external store.
    ///
    /// A configuration-time health check with a short timeout; not a
    /// per-request guard.
    ///
    /// ## Errors
    ///
    /// Returns a hard error if the store is unreachable.
    async fn test_connection(&self) -> FederationResult<()>;

    // === User Lookup ===

    /// Gets a user by username.
    ///
    /// Returns `None` for both "no such user" and "store unreachable";
    /// failures are logged by the implementation.
    async fn get_user_by_username(&self, realm_id: Uuid, username: &str) -> Option<User>;

    /// Gets a user by their identifier in the external store.
    async fn get_user_by_external_id(&self, realm_id: Uuid, external_id: &str) -> Option<User>;

    /// Gets a user by email.
    async fn get_user_by_email(&self, realm_id: Uuid, email: &str) -> Option<User>;

    /// Gets a user by an opaque storage id.
    ///
    /// Decomposes the id into its embedded external component and
    /// delegates to [`Self::get_user_by_external_id`]. Malformed ids
    /// resolve to `None`.
    async fn get_user_by_id(&self, realm_id: Uuid, id: &str) -> Option<User> {
        let storage_id = StorageId::parse(id).ok()?;
        self.get_user_by_external_id(realm_id, storage_id.external_id())
            .await
    }

    // === Optional capabilities (degrade gracefully) ===

    /// Searches for users matching the given query.
    ///
    /// Optional capability; the default reports no results rather than
    /// erroring.
    async fn search_users(
        &self,
        _realm_id: Uuid,
        _query: &str,
        _first: usize,
        _max: usize,
    ) -> Vec<User> {
        Vec::new()
    }

    /// Lists the members of a group.
    ///
    /// Optional capability; the default reports no results.
    async fn group_members(&self, _realm_id: Uuid, _group_id: Uuid) -> Vec<User> {
        Vec::new()
    }

    /// Counts the enabled users in the external store.
    ///
    /// Failures are logged and reported as zero.
    async fn count_users(&self, realm_id: Uuid, include_service_accounts: bool) -> usize;

    /// Closes the provider, releasing any resources.
    async fn close(&self) -> FederationResult<()> {
        Ok(())
    }
}

// ============================================================================
// Credential Validator
// ============================================================================

/// Trait for validating credentials against external stores.
///
/// ## Security
///
/// - The presented secret must never be logged or stored.
/// - Every check re-fetches the stored credential; validators do not
///   trust cached copies.
/// - Any internal failure is reported as "not configured" / "invalid",
///   never as "valid" and never as a panic.
#[allow(async_fn_in_trait)]
pub trait CredentialValidator: Send + Sync {
    /// Checks whether this validator supports a credential kind.
    fn supports_credential_type(&self, credential_type: CredentialType) -> bool;

    /// Checks whether a credential of the given kind is configured for
    /// the user.
    ///
    /// Returns false for unsupported kinds, absent credentials, and any
    /// store failure.
    async fn is_configured_for(
        &self,
        realm_id: Uuid,
        username: &str,
        credential_type: CredentialType,
    ) -> bool;

    /// Validates a presented credential.
    ///
    /// Returns true only when the presented secret matches the stored
    /// credential. Unsupported kinds, missing credentials, store
    /// failures, and verification errors all return false.
    async fn validate_credential(
        &self,
        realm_id: Uuid,
        username: &str,
        input: &CredentialInput,
    ) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditMode;

    // Minimal in-memory provider exercising the provided methods.
    struct MockProvider {
        config: FederationConfig,
        known_external_id: String,
    }

    impl MockProvider {
        fn new() -> Self {
            let config = FederationConfig::builder()
                .realm_id(Uuid::now_v7())
                .provider_type("mock")
                .name("Mock Provider")
                .edit_mode(EditMode::ReadOnly)
                .build();
            Self {
                config,
                known_external_id: "alice@example.com".to_string(),
            }
        }
    }

    impl UserStorageProvider for MockProvider {
        fn config(&self) -> &FederationConfig {
            &self.config
        }

        fn provider_type(&self) -> &'static str {
            "mock"
        }

        async fn validate_config(&self) -> FederationResult<()> {
            Ok(())
        }

        async fn test_connection(&self) -> FederationResult<()> {
            Ok(())
        }

        async fn get_user_by_username(&self, realm_id: Uuid, username: &str) -> Option<User> {
            if username == self.known_external_id {
                Some(User::new(
                    StorageId::federated("mock", username).to_string(),
                    realm_id,
                    username,
                ))
            } else {
                None
            }
        }

        async fn get_user_by_external_id(
            &self,
            realm_id: Uuid,
            external_id: &str,
        ) -> Option<User> {
            self.get_user_by_username(realm_id, external_id).await
        }

        async fn get_user_by_email(&self, _realm_id: Uuid, _email: &str) -> Option<User> {
            None
        }

        async fn count_users(&self, _realm_id: Uuid, _include_service_accounts: bool) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn by_id_lookup_decomposes_storage_id() {
        let provider = MockProvider::new();
        let realm_id = Uuid::now_v7();

        let user = provider
            .get_user_by_id(realm_id, "f:mock:alice@example.com")
            .await;
        assert!(user.is_some());
        assert_eq!(user.unwrap().username, "alice@example.com");
    }

    #[tokio::test]
    async fn by_id_lookup_handles_malformed_ids() {
        let provider = MockProvider::new();
        let realm_id = Uuid::now_v7();

        assert!(provider.get_user_by_id(realm_id, "f:").await.is_none());
        assert!(provider.get_user_by_id(realm_id, "f:mock:").await.is_none());
    }

    #[tokio::test]
    async fn optional_capabilities_report_no_results() {
        let provider = MockProvider::new();
        let realm_id = Uuid::now_v7();

        assert!(provider.search_users(realm_id, "ali", 0, 10).await.is_empty());
        assert!(provider
            .group_members(realm_id, Uuid::now_v7())
            .await
            .is_empty());
    }
}
