//! Credential domain model.
//!
//! Credential kinds a host can ask a provider about, and the input a
//! user presents during authentication. Validation itself lives with
//! the providers; this crate only names the shapes.

use serde::{Deserialize, Serialize};

/// Credential kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    /// Password credential.
    Password,
    /// TOTP (Time-based One-Time Password) credential.
    Totp,
}

impl CredentialType {
    /// Returns the string representation used in storage and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Totp => "otp",
        }
    }

    /// Checks if this is the password kind.
    #[must_use]
    pub const fn is_password(&self) -> bool {
        matches!(self, Self::Password)
    }
}

/// A credential presented by a user for validation.
///
/// ## Security Note
///
/// The `secret` field holds the plaintext the user typed. It must never
/// be logged or stored; providers only compare it against a stored hash.
#[derive(Debug, Clone)]
pub struct CredentialInput {
    /// Kind of credential being presented.
    pub credential_type: CredentialType,
    /// The presented secret (e.g., the plaintext password).
    pub secret: String,
}

impl CredentialInput {
    /// Creates a password input.
    #[must_use]
    pub fn password(secret: impl Into<String>) -> Self {
        Self {
            credential_type: CredentialType::Password,
            secret: secret.into(),
        }
    }

    /// Creates an input of an arbitrary kind.
    #[must_use]
    pub fn new(credential_type: CredentialType, secret: impl Into<String>) -> Self {
        Self {
            credential_type,
            secret: secret.into(),
        }
    }
}
