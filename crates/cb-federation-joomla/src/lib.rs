//! # cb-federation-joomla
//!
//! Joomla federation provider for cms-bridge.
//!
//! Resolves users from a legacy Joomla MySQL database and validates
//! their passwords against the stored bcrypt hashes, including the
//! historical `$2y$` prefix variant produced by PHP's crypt.
//!
//! The legacy store is strictly read-only and queried per request:
//! there is no caching, no write-back, and no bulk search.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod mapper;
pub mod provider;
pub mod store;

pub use config::{JoomlaConfig, LookupColumn};
pub use error::{JoomlaError, JoomlaResult};
pub use provider::JoomlaStorageProvider;
pub use store::{JoomlaUserRow, LegacyUserStore, MySqlUserStore};
