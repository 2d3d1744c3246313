// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity provider registries.
//!
//! A [`KeyRegistry`] holds one provider's RSA signing keys by key id. A
//! [`ProviderDirectory`] maps provider names ("Google", ...) to the address of
//! the registry that serves them. Accounts reference a directory, so rotating
//! a provider to a new registry is a single directory write.

pub mod directory;
pub mod key_registry;

use alloy::primitives::Address;
use thiserror::Error;

pub use directory::{ProviderDirectory, ProviderEntry, UnknownProvider};
pub use key_registry::{KeyRegistry, SigningKey};

/// Signature check exposed by a provider's key registry.
pub trait IdentityProvider {
    /// Verify an RS256 signature over `message` with the active key `key_id`.
    ///
    /// An unknown or removed key id yields `false`, never an error.
    fn verify(&self, key_id: &str, message: &[u8], signature: &[u8]) -> bool;
}

/// Errors raised by registry and directory writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Key registration attempted by someone other than the registry owner.
    #[error("Key registration rejected: {caller} does not own this registry")]
    DuplicateKeyRejected { caller: Address },

    /// Any other owner-only write attempted by a non-owner.
    #[error("Unauthorized write by {caller}")]
    UnauthorizedWrite { caller: Address },

    #[error("Malformed key list: {0}")]
    MalformedKeyList(String),
}

impl RegistryError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::DuplicateKeyRejected { .. } => "duplicate_key_rejected",
            RegistryError::UnauthorizedWrite { .. } => "unauthorized_write",
            RegistryError::MalformedKeyList(_) => "malformed_key_list",
        }
    }
}
