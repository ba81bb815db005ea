//! Federated user domain model.
//!
//! Users resolved through a federation provider are transient: a record
//! is built fresh from the external store on every lookup, handed to the
//! host, and discarded. It carries no identity beyond the call that
//! produced it and is never written back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user record resolved from an external identity store.
///
/// The record is immutable by convention once mapped: providers build it
/// with the `with_*` setters and hand it to the host as-is. There is no
/// caching layer; two lookups of the same account produce two
/// independent records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque storage identifier (see [`crate::StorageId`]).
    pub id: String,
    /// Realm this user was resolved for.
    pub realm_id: Uuid,
    /// Login handle surfaced to the host.
    pub username: String,
    /// Whether the account is enabled in the external store.
    pub enabled: bool,
    /// User's first name.
    pub first_name: Option<String>,
    /// User's last name.
    pub last_name: Option<String>,
    /// User's email address.
    pub email: Option<String>,
    /// Identifier of the federation provider that resolved this record.
    pub federation_link: Option<String>,
    /// Provider-specific attributes (e.g., the native store id).
    pub attributes: HashMap<String, Vec<String>>,
}

impl User {
    /// Creates a new user record.
    #[must_use]
    pub fn new(id: impl Into<String>, realm_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            realm_id,
            username: username.into(),
            enabled: true,
            first_name: None,
            last_name: None,
            email: None,
            federation_link: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the user's email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the user's first name.
    #[must_use]
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Sets the user's last name.
    #[must_use]
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Sets whether the user is enabled.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the federation link.
    #[must_use]
    pub fn with_federation_link(mut self, provider_id: impl Into<String>) -> Self {
        self.federation_link = Some(provider_id.into());
        self
    }

    /// Gets the user's full name.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }

    /// Checks if this is a federated user.
    #[must_use]
    pub const fn is_federated(&self) -> bool {
        self.federation_link.is_some()
    }

    /// Gets an attribute value.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Vec<String>> {
        self.attributes.get(name)
    }

    /// Gets the first value of an attribute.
    #[must_use]
    pub fn get_first_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Sets an attribute value.
    pub fn set_attribute(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.attributes.insert(name.into(), values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_defaults() {
        let realm_id = Uuid::now_v7();
        let user = User::new("f:p:42", realm_id, "testuser");

        assert_eq!(user.id, "f:p:42");
        assert_eq!(user.username, "testuser");
        assert_eq!(user.realm_id, realm_id);
        assert!(user.enabled);
        assert!(!user.is_federated());
        assert!(user.attributes.is_empty());
    }

    #[test]
    fn builder_pattern_works() {
        let realm_id = Uuid::now_v7();
        let user = User::new("f:p:1", realm_id, "ada")
            .with_email("ada@example.com")
            .with_first_name("Ada")
            .with_last_name("Lovelace")
            .with_enabled(false)
            .with_federation_link("joomla-users");

        assert_eq!(user.email, Some("ada@example.com".to_string()));
        assert_eq!(user.full_name(), Some("Ada Lovelace".to_string()));
        assert!(!user.enabled);
        assert!(user.is_federated());
    }

    #[test]
    fn full_name_handles_partial() {
        let realm_id = Uuid::now_v7();

        let first_only = User::new("1", realm_id, "u1").with_first_name("Ada");
        assert_eq!(first_only.full_name(), Some("Ada".to_string()));

        let last_only = User::new("2", realm_id, "u2").with_last_name("Lovelace");
        assert_eq!(last_only.full_name(), Some("Lovelace".to_string()));

        let neither = User::new("3", realm_id, "u3");
        assert_eq!(neither.full_name(), None);
    }

    #[test]
    fn attributes_work() {
        let realm_id = Uuid::now_v7();
        let mut user = User::new("1", realm_id, "testuser");

        user.set_attribute("JOOMLA_ID", vec!["42".to_string()]);

        assert_eq!(user.get_first_attribute("JOOMLA_ID"), Some("42"));
        assert_eq!(user.get_attribute("missing"), None);
    }
}
