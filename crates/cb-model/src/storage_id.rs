//! Opaque storage identifiers.
//!
//! The host platform addresses federated users with composite ids of the
//! form `f:<provider-id>:<external-id>`. Ids without the `f:` marker
//! belong to locally stored users and carry no provider component.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker prefix for federated storage ids.
const FEDERATED_PREFIX: &str = "f:";

/// Errors from parsing a storage id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageIdError {
    /// A federated id is missing its provider or external component.
    #[error("malformed federated storage id: {0}")]
    Malformed(String),
}

/// A decomposed storage identifier.
///
/// Federated ids embed the provider id and the identifier the user has
/// in the external store. The external component is what provider
/// lookups operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageId {
    /// Provider component, present only for federated ids.
    provider_id: Option<String>,
    /// Identifier of the user, local or in the external store.
    external_id: String,
}

impl StorageId {
    /// Creates a federated storage id.
    #[must_use]
    pub fn federated(provider_id: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            provider_id: Some(provider_id.into()),
            external_id: external_id.into(),
        }
    }

    /// Creates a local (non-federated) storage id.
    #[must_use]
    pub fn local(id: impl Into<String>) -> Self {
        Self {
            provider_id: None,
            external_id: id.into(),
        }
    }

    /// Parses an opaque id string.
    ///
    /// ## Errors
    ///
    /// Returns [`StorageIdError::Malformed`] if the id carries the
    /// federated marker but no provider/external components.
    pub fn parse(id: &str) -> Result<Self, StorageIdError> {
        let Some(rest) = id.strip_prefix(FEDERATED_PREFIX) else {
            return Ok(Self::local(id));
        };

        // External ids may themselves contain ':', so split only once.
        match rest.split_once(':') {
            Some((provider, external)) if !provider.is_empty() && !external.is_empty() => {
                Ok(Self::federated(provider, external))
            }
            _ => Err(StorageIdError::Malformed(id.to_string())),
        }
    }

    /// Returns the provider component, if federated.
    #[must_use]
    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    /// Returns the external (or local) identifier component.
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Checks whether this id addresses a federated user.
    #[must_use]
    pub const fn is_federated(&self) -> bool {
        self.provider_id.is_some()
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.provider_id {
            Some(provider) => write!(f, "{FEDERATED_PREFIX}{provider}:{}", self.external_id),
            None => write!(f, "{}", self.external_id),
        }
    }
}
