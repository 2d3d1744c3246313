// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Provider name to key registry mapping.

use std::collections::HashMap;

use alloy::primitives::Address;
use thiserror::Error;
use tracing::info;

use super::RegistryError;

/// Lookup of a provider name that has no registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

/// A provider name's registry binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderEntry {
    pub registry: Address,
    /// `false` once the provider has been removed. Removed entries never
    /// resolve.
    pub active: bool,
}

/// Maps provider names to key registry addresses.
///
/// Lookups are total: a name that is not registered, or was removed,
/// resolves to [`UnknownProvider`], never to a fallback registry. Entries
/// are never deleted; removal leaves a tombstone.
#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    owner: Address,
    entries: HashMap<String, ProviderEntry>,
}

impl ProviderDirectory {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            entries: HashMap::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Register `name`, point it at a new registry, or revive a removed
    /// entry.
    ///
    /// Returns the registry that was active under `name`.
    pub fn add_provider(
        &mut self,
        caller: Address,
        name: &str,
        registry: Address,
    ) -> Result<Option<Address>, RegistryError> {
        self.ensure_owner(caller)?;
        let previous = self
            .entries
            .insert(name.to_string(), ProviderEntry { registry, active: true })
            .filter(|entry| entry.active)
            .map(|entry| entry.registry);
        info!(provider = name, %registry, rotated = previous.is_some(), "Provider registered");
        Ok(previous)
    }

    /// [`add_provider`](Self::add_provider) with the registry first.
    pub fn add_provider_simple(
        &mut self,
        caller: Address,
        registry: Address,
        name: &str,
    ) -> Result<Option<Address>, RegistryError> {
        self.add_provider(caller, name, registry)
    }

    pub fn resolve(&self, name: &str) -> Result<Address, UnknownProvider> {
        self.entries
            .get(name)
            .filter(|entry| entry.active)
            .map(|entry| entry.registry)
            .ok_or_else(|| UnknownProvider(name.to_string()))
    }

    /// The entry for `name`, including a removed one.
    pub fn entry(&self, name: &str) -> Option<&ProviderEntry> {
        self.entries.get(name)
    }

    /// Tombstone `name`. Returns whether an active entry was removed.
    pub fn remove_provider(&mut self, caller: Address, name: &str) -> Result<bool, RegistryError> {
        self.ensure_owner(caller)?;
        let removed = match self.entries.get_mut(name) {
            Some(entry) if entry.active => {
                entry.active = false;
                true
            }
            _ => false,
        };
        info!(provider = name, removed, "Provider removed");
        Ok(removed)
    }

    /// Active providers sorted by name.
    pub fn providers(&self) -> Vec<(&str, Address)> {
        let mut providers: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.active)
            .map(|(name, entry)| (name.as_str(), entry.registry))
            .collect();
        providers.sort_by(|a, b| a.0.cmp(b.0));
        providers
    }

    fn ensure_owner(&self, caller: Address) -> Result<(), RegistryError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(RegistryError::UnauthorizedWrite { caller })
        }
    }
}
