// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-provider RSA key registry.

use std::collections::HashMap;

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolValue;
use rsa::BigUint;
use serde::Serialize;
use tracing::{debug, info};

use super::{IdentityProvider, RegistryError};
use crate::auth::{verify_rs256, RSA_EXPONENT};

/// One registered provider signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningKey {
    pub key_id: String,
    pub modulus: Bytes,
    pub exponent: u32,
    /// `false` once the key has been removed. Removed keys never verify.
    pub active: bool,
    /// Registry revision at which the key was last written.
    pub revision: u64,
}

impl SigningKey {
    /// Bit length of the modulus, ignoring leading zero bytes.
    pub fn modulus_bits(&self) -> usize {
        BigUint::from_bytes_be(&self.modulus).bits() as usize
    }
}

/// Signing keys of a single identity provider, indexed by key id.
///
/// Several keys may be active at once so a provider can rotate without a
/// gap. Only the owner may write.
#[derive(Debug, Clone)]
pub struct KeyRegistry {
    owner: Address,
    keys: HashMap<String, SigningKey>,
    revision: u64,
}

impl KeyRegistry {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            keys: HashMap::new(),
            revision: 0,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Upsert `(key_id, modulus)` entries. A previously removed key id is
    /// reactivated with the new modulus.
    pub fn add_keys(
        &mut self,
        caller: Address,
        entries: impl IntoIterator<Item = (String, Bytes)>,
    ) -> Result<usize, RegistryError> {
        if caller != self.owner {
            return Err(RegistryError::DuplicateKeyRejected { caller });
        }

        self.revision += 1;
        let mut written = 0;
        for (key_id, modulus) in entries {
            debug!(key_id = %key_id, modulus_len = modulus.len(), "Registering signing key");
            self.keys.insert(
                key_id.clone(),
                SigningKey {
                    key_id,
                    modulus,
                    exponent: RSA_EXPONENT,
                    active: true,
                    revision: self.revision,
                },
            );
            written += 1;
        }

        info!(count = written, revision = self.revision, "Signing keys registered");
        Ok(written)
    }

    /// Upsert keys given as parallel id and modulus lists.
    pub fn add_key_lists(
        &mut self,
        caller: Address,
        key_ids: Vec<String>,
        moduli: Vec<Bytes>,
    ) -> Result<usize, RegistryError> {
        if key_ids.len() != moduli.len() {
            return Err(RegistryError::MalformedKeyList(format!(
                "{} key ids but {} moduli",
                key_ids.len(),
                moduli.len()
            )));
        }
        self.add_keys(caller, key_ids.into_iter().zip(moduli))
    }

    /// Upsert keys from the ABI encoding of `(string[] keyIds, bytes[] moduli)`.
    pub fn add_keys_encoded(&mut self, caller: Address, data: &[u8]) -> Result<usize, RegistryError> {
        let (key_ids, moduli) = <(Vec<String>, Vec<Bytes>)>::abi_decode_params(data)
            .map_err(|e| RegistryError::MalformedKeyList(e.to_string()))?;
        self.add_key_lists(caller, key_ids, moduli)
    }

    /// Tombstone a key. Returns whether an active key was removed.
    pub fn remove_key(&mut self, caller: Address, key_id: &str) -> Result<bool, RegistryError> {
        if caller != self.owner {
            return Err(RegistryError::UnauthorizedWrite { caller });
        }

        self.revision += 1;
        let revision = self.revision;
        let removed = match self.keys.get_mut(key_id) {
            Some(key) if key.active => {
                key.active = false;
                key.revision = revision;
                true
            }
            _ => false,
        };

        info!(key_id, removed, "Signing key removed");
        Ok(removed)
    }

    /// The active key for `key_id`, if any.
    pub fn active_key(&self, key_id: &str) -> Option<&SigningKey> {
        self.keys.get(key_id).filter(|k| k.active)
    }

    /// All keys, including removed ones, sorted by key id.
    pub fn keys(&self) -> Vec<&SigningKey> {
        let mut keys: Vec<_> = self.keys.values().collect();
        keys.sort_by(|a, b| a.key_id.cmp(&b.key_id));
        keys
    }
}

impl IdentityProvider for KeyRegistry {
    fn verify(&self, key_id: &str, message: &[u8], signature: &[u8]) -> bool {
        match self.active_key(key_id) {
            Some(key) => verify_rs256(&key.modulus, message, signature),
            None => false,
        }
    }
}
