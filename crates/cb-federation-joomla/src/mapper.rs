//! Row-to-user mapping.
//!
//! A pure mapping from legacy `users` rows to host user records. Each
//! lookup maps a fresh row; nothing is cached between calls.

use std::sync::Arc;

use cb_model::{StorageId, User};
use uuid::Uuid;

use crate::config::{JoomlaConfig, LookupColumn};
use crate::store::JoomlaUserRow;

/// Attribute holding the account id in the legacy store.
pub const JOOMLA_ID_ATTRIBUTE: &str = "JOOMLA_ID";

/// Attribute holding the native Joomla login name.
pub const JOOMLA_USERNAME_ATTRIBUTE: &str = "JOOMLA_USERNAME";

/// Maps legacy `users` rows to the host's user model.
#[derive(Debug, Clone)]
pub struct JoomlaUserMapper {
    config: Arc<JoomlaConfig>,
}

impl JoomlaUserMapper {
    /// Creates a new mapper.
    #[must_use]
    pub const fn new(config: Arc<JoomlaConfig>) -> Self {
        Self { config }
    }

    /// Maps a legacy row to a user record.
    ///
    /// The surfaced `username` is the value of the configured lookup
    /// column, so a record always round-trips through
    /// `get_user_by_username`. Under the default email lookup the email
    /// address is surfaced as the username, which is what legacy
    /// login-by-email deployments expect. The native Joomla login is
    /// preserved in the [`JOOMLA_USERNAME_ATTRIBUTE`] attribute.
    #[must_use]
    pub fn map_to_user(&self, realm_id: Uuid, row: &JoomlaUserRow, provider_id: &str) -> User {
        let login = match self.config.lookup_column {
            LookupColumn::Email => &row.email,
            LookupColumn::Username => &row.username,
        };

        let (first_name, last_name) = split_full_name(&row.name);

        let mut user = User::new(
            StorageId::federated(provider_id, login).to_string(),
            realm_id,
            login,
        )
        .with_email(&row.email)
        .with_enabled(!row.is_blocked())
        .with_federation_link(provider_id);

        user.first_name = first_name;
        user.last_name = last_name;

        user.set_attribute(JOOMLA_ID_ATTRIBUTE, vec![row.id.to_string()]);
        user.set_attribute(JOOMLA_USERNAME_ATTRIBUTE, vec![row.username.clone()]);

        user
    }
}

/// Splits a free-text full name on the first space.
///
/// A name without a space maps deterministically to (whole name, none);
/// empty components map to none.
#[must_use]
pub fn split_full_name(full_name: &str) -> (Option<String>, Option<String>) {
    match full_name.split_once(' ') {
        Some((first, last)) => (non_empty(first), non_empty(last)),
        None => (non_empty(full_name), None),
    }
}

fn non_empty(part: &str) -> Option<String> {
    if part.is_empty() {
        None
    } else {
        Some(part.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> JoomlaUserMapper {
        let config = JoomlaConfig::builder()
            .host("joomla-db")
            .username("joomla")
            .password("joomla")
            .database("joomla")
            .build()
            .unwrap();
        JoomlaUserMapper::new(Arc::new(config))
    }

    fn mapper_with_username_lookup() -> JoomlaUserMapper {
        let config = JoomlaConfig::builder()
            .host("joomla-db")
            .username("joomla")
            .password("joomla")
            .database("joomla")
            .lookup_column(LookupColumn::Username)
            .build()
            .unwrap();
        JoomlaUserMapper::new(Arc::new(config))
    }

    fn alice() -> JoomlaUserRow {
        JoomlaUserRow {
            id: 1,
            name: "Alice Smith".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: Some("$2y$10$hash".to_string()),
            block: 0,
        }
    }

    #[test]
    fn splits_on_first_space() {
        assert_eq!(
            split_full_name("Ada Lovelace"),
            (Some("Ada".to_string()), Some("Lovelace".to_string()))
        );
        assert_eq!(
            split_full_name("Ada King Lovelace"),
            (Some("Ada".to_string()), Some("King Lovelace".to_string()))
        );
    }

    #[test]
    fn name_without_space_becomes_first_name() {
        assert_eq!(split_full_name("Cher"), (Some("Cher".to_string()), None));
        assert_eq!(split_full_name(""), (None, None));
        assert_eq!(split_full_name("Ada "), (Some("Ada".to_string()), None));
        assert_eq!(split_full_name(" Ada"), (None, Some("Ada".to_string())));
    }

    #[test]
    fn maps_row_with_email_surfaced_as_username() {
        let realm_id = Uuid::now_v7();
        let user = mapper().map_to_user(realm_id, &alice(), "joomla-users");

        // Legacy display quirk: the email is the surfaced username.
        assert_eq!(user.username, "alice@example.com");
        assert_eq!(user.email, Some("alice@example.com".to_string()));
        assert_eq!(user.first_name, Some("Alice".to_string()));
        assert_eq!(user.last_name, Some("Smith".to_string()));
        assert!(user.enabled);
        assert_eq!(user.federation_link, Some("joomla-users".to_string()));
        assert_eq!(user.id, "f:joomla-users:alice@example.com");
        assert_eq!(user.get_first_attribute(JOOMLA_ID_ATTRIBUTE), Some("1"));
        assert_eq!(
            user.get_first_attribute(JOOMLA_USERNAME_ATTRIBUTE),
            Some("alice")
        );
    }

    #[test]
    fn username_lookup_surfaces_native_login() {
        let realm_id = Uuid::now_v7();
        let user = mapper_with_username_lookup().map_to_user(realm_id, &alice(), "joomla-users");

        assert_eq!(user.username, "alice");
        assert_eq!(user.id, "f:joomla-users:alice");
        assert_eq!(user.email, Some("alice@example.com".to_string()));
    }

    #[test]
    fn blocked_rows_are_disabled() {
        let realm_id = Uuid::now_v7();
        let mut row = alice();
        row.block = 1;

        let user = mapper().map_to_user(realm_id, &row, "joomla-users");
        assert!(!user.enabled);
    }
}
