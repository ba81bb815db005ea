//! # cb-model
//!
//! Domain models for cms-bridge.
//!
//! This crate defines the value types shared across the workspace:
//! the federated user record, credential kinds and inputs, and the
//! opaque storage-identifier codec used by the host platform.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod credential;
pub mod storage_id;
pub mod user;

pub use credential::{CredentialInput, CredentialType};
pub use storage_id::{StorageId, StorageIdError};
pub use user::User;
