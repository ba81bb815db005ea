//! # cb-federation
//!
//! User federation framework for cms-bridge.
//!
//! This crate provides the base traits for user federation providers:
//! resolving user records from an external identity store and validating
//! credentials against it.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod provider;

pub use config::{EditMode, FederationConfig};
pub use error::{FederationError, FederationResult};
pub use provider::{CredentialValidator, UserStorageProvider};
