// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account factory: derives and deploys accounts at deterministic addresses.

use std::collections::HashSet;

use alloy::primitives::{Address, B256};
use thiserror::Error;
use tracing::info;

use super::address::{constructor_args, AddressScheme};
use super::Account;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("Account already exists at {0}")]
    AccountAlreadyExists(Address),
}

impl FactoryError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            FactoryError::AccountAlreadyExists(_) => "account_already_exists",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountFactory {
    address: Address,
    account_code_hash: B256,
    scheme: AddressScheme,
    deployed: HashSet<Address>,
}

impl AccountFactory {
    pub fn new(address: Address, account_code_hash: B256, scheme: AddressScheme) -> Self {
        Self {
            address,
            account_code_hash,
            scheme,
            deployed: HashSet::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn account_code_hash(&self) -> B256 {
        self.account_code_hash
    }

    pub fn scheme(&self) -> AddressScheme {
        self.scheme
    }

    /// Address of the account for `(user_id, provider_directory, salt)`.
    ///
    /// Pure: the same inputs always give the same address, whether or not
    /// the account has been deployed.
    pub fn account_address(&self, user_id: &str, provider_directory: Address, salt: B256) -> Address {
        self.scheme.derive(
            self.account_code_hash,
            self.address,
            salt,
            &constructor_args(user_id, provider_directory),
        )
    }

    /// Create a fresh account (nonce 0) at its derived address.
    ///
    /// The caller places the returned account at the returned address.
    pub fn deploy_account(
        &mut self,
        user_id: &str,
        provider_directory: Address,
        salt: B256,
    ) -> Result<(Address, Account), FactoryError> {
        let address = self.account_address(user_id, provider_directory, salt);
        if !self.deployed.insert(address) {
            return Err(FactoryError::AccountAlreadyExists(address));
        }

        info!(%address, user_id, %provider_directory, factory = %self.address, "Account deployed");
        Ok((address, Account::new(user_id, provider_directory)))
    }

    pub fn is_deployed(&self, address: Address) -> bool {
        self.deployed.contains(&address)
    }
}
