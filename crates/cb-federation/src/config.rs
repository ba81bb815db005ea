//! Federation provider configuration.
//!
//! Base configuration shared by all federation providers. Backend
//! crates carry their own store-specific configuration alongside this.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Edit mode for federated users.
///
/// Controls whether changes to users are written back to the external
/// store. Legacy-store bridges are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditMode {
    /// Users are read-only. Changes in the host are not written back.
    #[default]
    ReadOnly,

    /// Users are writable. Changes are written back to the external store.
    Writable,
}

impl EditMode {
    /// Returns true if the mode allows writes to the external store.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self, Self::Writable)
    }

    /// Returns true if the mode is read-only.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly)
    }
}

/// Base configuration for all federation providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederationConfig {
    /// Unique identifier for this provider configuration.
    pub id: Uuid,

    /// Realm this provider belongs to.
    pub realm_id: Uuid,

    /// Provider type (e.g., "joomla").
    pub provider_type: String,

    /// Display name.
    pub name: String,

    /// Priority for user lookup (lower = higher priority).
    pub priority: i32,

    /// Edit mode.
    pub edit_mode: EditMode,

    /// Whether the provider is enabled.
    pub enabled: bool,

    /// Timeout applied to the configuration-time connectivity probe.
    /// This is a setup health check, not a per-request timeout.
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,
}

impl FederationConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> FederationConfigBuilder {
        FederationConfigBuilder::new()
    }
}

/// Builder for [`FederationConfig`].
#[derive(Debug, Default)]
pub struct FederationConfigBuilder {
    id: Option<Uuid>,
    realm_id: Option<Uuid>,
    provider_type: Option<String>,
    name: Option<String>,
    priority: i32,
    edit_mode: EditMode,
    enabled: bool,
    connection_timeout: Duration,
}

impl FederationConfigBuilder {
    /// Creates a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            connection_timeout: Duration::from_secs(1),
            ..Default::default()
        }
    }

    /// Sets the ID.
    #[must_use]
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the realm ID.
    #[must_use]
    pub fn realm_id(mut self, realm_id: Uuid) -> Self {
        self.realm_id = Some(realm_id);
        self
    }

    /// Sets the provider type.
    #[must_use]
    pub fn provider_type(mut self, provider_type: impl Into<String>) -> Self {
        self.provider_type = Some(provider_type.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the lookup priority.
    #[must_use]
    pub const fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the edit mode.
    #[must_use]
    pub const fn edit_mode(mut self, edit_mode: EditMode) -> Self {
        self.edit_mode = edit_mode;
        self
    }

    /// Sets whether the provider is enabled.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the connectivity-probe timeout.
    #[must_use]
    pub const fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Builds the configuration.
    ///
    /// Missing id/realm id fall back to fresh UUIDs; missing type/name
    /// fall back to empty strings (backends validate their own naming).
    #[must_use]
    pub fn build(self) -> FederationConfig {
        FederationConfig {
            id: self.id.unwrap_or_else(Uuid::now_v7),
            realm_id: self.realm_id.unwrap_or_else(Uuid::now_v7),
            provider_type: self.provider_type.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            priority: self.priority,
            edit_mode: self.edit_mode,
            enabled: self.enabled,
            connection_timeout: self.connection_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_read_only_and_enabled() {
        let config = FederationConfig::builder()
            .provider_type("joomla")
            .name("Joomla Users")
            .build();

        assert!(config.edit_mode.is_read_only());
        assert!(config.enabled);
        assert_eq!(config.connection_timeout, Duration::from_secs(1));
        assert_eq!(config.provider_type, "joomla");
    }

    #[test]
    fn builder_sets_fields() {
        let id = Uuid::now_v7();
        let realm_id = Uuid::now_v7();
        let config = FederationConfig::builder()
            .id(id)
            .realm_id(realm_id)
            .provider_type("joomla")
            .name("Legacy CMS")
            .priority(5)
            .edit_mode(EditMode::Writable)
            .enabled(false)
            .build();

        assert_eq!(config.id, id);
        assert_eq!(config.realm_id, realm_id);
        assert_eq!(config.priority, 5);
        assert!(config.edit_mode.is_writable());
        assert!(!config.enabled);
    }
}
