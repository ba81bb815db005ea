//! Legacy password hash compatibility.
//!
//! Joomla stores bcrypt hashes written by PHP's crypt, which marks them
//! with the `$2y$` prefix. Some bcrypt implementations refuse that
//! variant even though the underlying algorithm is identical to `$2a$`,
//! so the prefix is rewritten before verification.
//!
//! Verification always goes through the bcrypt library's verify path:
//! salt and cost are extracted from the stored hash string and the
//! comparison is constant time. Never compare a freshly computed hash
//! for equality.

use std::borrow::Cow;

use crate::error::{JoomlaError, JoomlaResult};

/// Bcrypt prefix historically produced by PHP's crypt.
pub const LEGACY_BCRYPT_PREFIX: &str = "$2y$";

/// Standard bcrypt prefix understood by all implementations.
pub const STANDARD_BCRYPT_PREFIX: &str = "$2a$";

/// Rewrites the legacy `$2y$` prefix to the standard `$2a$` prefix.
///
/// Hashes without the legacy prefix are returned unchanged.
#[must_use]
pub fn normalize_bcrypt_prefix(hash: &str) -> Cow<'_, str> {
    match hash.strip_prefix(LEGACY_BCRYPT_PREFIX) {
        Some(rest) => Cow::Owned(format!("{STANDARD_BCRYPT_PREFIX}{rest}")),
        None => Cow::Borrowed(hash),
    }
}

/// Verifies a plaintext password against a stored legacy hash.
///
/// The stored hash is prefix-normalized first; salt extraction and the
/// constant-time comparison are the bcrypt library's.
///
/// ## Errors
///
/// Returns [`JoomlaError::Hash`] if the stored hash is not a parseable
/// bcrypt string. Callers on the validation path treat this as
/// "invalid", never as "valid".
pub fn verify_password(password: &str, stored_hash: &str) -> JoomlaResult<bool> {
    let normalized = normalize_bcrypt_prefix(stored_hash);
    bcrypt::verify(password, &normalized).map_err(|e| JoomlaError::hash(e.to_string()))
}
