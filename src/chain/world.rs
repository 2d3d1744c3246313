// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! World state and transaction execution.

use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, U256};

use super::error::ChainError;
use super::types::{Call, Contract, ContractKind, Transaction};
use crate::account::{
    default_account_code_hash, Account, AccountFactory, AddressScheme, ProviderLookup, Validated,
};
use crate::auth::ValidationError;
use crate::registry::{IdentityProvider, KeyRegistry, ProviderDirectory};

/// Result of executing a transaction against a [`WorldState`].
#[derive(Debug, Clone, Default)]
pub struct Execution {
    pub contract_address: Option<Address>,
    /// Present when the sender is an account.
    pub validated: Option<Validated>,
}

/// Contracts, balances and EOA nonces.
///
/// `execute` mutates in place and may stop halfway on error; callers run it
/// on a copy and keep the copy only when it succeeds. That copy is a full
/// clone of every contract and balance, so the cost of a submission grows
/// with the total state. Fine for a devnet with a handful of accounts.
///
/// Only registered dev accounts may send without a signature. Any other
/// address holding no contract, such as a pre-funded counterfactual account
/// address, cannot originate transactions.
#[derive(Debug, Clone)]
pub struct WorldState {
    contracts: HashMap<Address, Contract>,
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    dev_accounts: HashSet<Address>,
    default_scheme: AddressScheme,
}

impl WorldState {
    pub fn new(default_scheme: AddressScheme) -> Self {
        Self {
            contracts: HashMap::new(),
            balances: HashMap::new(),
            nonces: HashMap::new(),
            dev_accounts: HashSet::new(),
            default_scheme,
        }
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    /// Next expected nonce: the account nonce for accounts, the EOA nonce otherwise.
    pub fn nonce(&self, address: Address) -> u64 {
        match self.contracts.get(&address) {
            Some(Contract::Account(account)) => account.nonce(),
            _ => self.nonces.get(&address).copied().unwrap_or_default(),
        }
    }

    pub fn contract(&self, address: Address) -> Option<&Contract> {
        self.contracts.get(&address)
    }

    pub fn default_scheme(&self) -> AddressScheme {
        self.default_scheme
    }

    /// Unlock `address` as a dev EOA that may send unsigned transactions.
    pub fn register_dev_account(&mut self, address: Address) {
        self.dev_accounts.insert(address);
    }

    pub fn is_dev_account(&self, address: Address) -> bool {
        self.dev_accounts.contains(&address)
    }

    /// Credit `amount` to `address`, returning the new balance.
    pub fn credit(&mut self, address: Address, amount: U256) -> U256 {
        let balance = self.balances.entry(address).or_default();
        *balance = balance.saturating_add(amount);
        *balance
    }

    /// Authenticate the sender, move value and apply the call.
    pub fn execute(&mut self, tx: &Transaction) -> Result<Execution, ChainError> {
        let validated = self.authenticate(tx)?;
        self.transfer_value(tx)?;
        let contract_address = self.apply_call(tx)?;
        Ok(Execution {
            contract_address,
            validated,
        })
    }

    fn authenticate(&mut self, tx: &Transaction) -> Result<Option<Validated>, ChainError> {
        match self.contracts.get(&tx.from) {
            Some(Contract::Account(account)) => {
                let signature = tx.custom_signature.as_deref().ok_or_else(|| {
                    ValidationError::malformed("account transaction has no custom signature")
                })?;
                let validated = account.validate(tx.nonce, signature, &*self)?;
                if let Some(Contract::Account(account)) = self.contracts.get_mut(&tx.from) {
                    account.increment_nonce();
                }
                Ok(Some(validated))
            }
            Some(_) => Err(ChainError::ContractOriginatedCall(tx.from)),
            None if !self.dev_accounts.contains(&tx.from) => {
                Err(ChainError::UnknownSender(tx.from))
            }
            None => {
                let nonce = self.nonces.entry(tx.from).or_default();
                if tx.nonce != *nonce {
                    return Err(ValidationError::NonceMismatch {
                        expected: *nonce,
                        actual: tx.nonce,
                    }
                    .into());
                }
                *nonce += 1;
                Ok(None)
            }
        }
    }

    fn transfer_value(&mut self, tx: &Transaction) -> Result<(), ChainError> {
        if tx.value.is_zero() {
            return Ok(());
        }
        let to = tx.to.ok_or(ChainError::MissingRecipient)?;

        let balance = self.balance(tx.from);
        if balance < tx.value {
            return Err(ChainError::InsufficientBalance {
                address: tx.from,
                balance,
                required: tx.value,
            });
        }
        self.balances.insert(tx.from, balance - tx.value);
        self.credit(to, tx.value);
        Ok(())
    }

    fn apply_call(&mut self, tx: &Transaction) -> Result<Option<Address>, ChainError> {
        let caller = tx.from;
        match &tx.call {
            Call::Transfer => {
                tx.to.ok_or(ChainError::MissingRecipient)?;
                Ok(None)
            }
            Call::CreateKeyRegistry => {
                self.create(tx, Contract::KeyRegistry(KeyRegistry::new(caller)))
            }
            Call::CreateProviderDirectory => {
                self.create(tx, Contract::ProviderDirectory(ProviderDirectory::new(caller)))
            }
            Call::CreateAccountFactory {
                account_code_hash,
                scheme,
            } => {
                let factory = AccountFactory::new(
                    caller.create(tx.nonce),
                    account_code_hash.unwrap_or_else(default_account_code_hash),
                    scheme.unwrap_or(self.default_scheme),
                );
                self.create(tx, Contract::AccountFactory(factory))
            }
            Call::AddKeys { key_ids, moduli } => {
                self.key_registry_mut(tx.to)?
                    .add_key_lists(caller, key_ids.clone(), moduli.clone())?;
                Ok(None)
            }
            Call::AddKeysEncoded { data } => {
                self.key_registry_mut(tx.to)?.add_keys_encoded(caller, data)?;
                Ok(None)
            }
            Call::RemoveKey { key_id } => {
                self.key_registry_mut(tx.to)?.remove_key(caller, key_id)?;
                Ok(None)
            }
            Call::AddProvider { name, registry } => {
                self.directory_mut(tx.to)?.add_provider(caller, name, *registry)?;
                Ok(None)
            }
            Call::RemoveProvider { name } => {
                self.directory_mut(tx.to)?.remove_provider(caller, name)?;
                Ok(None)
            }
            Call::DeployAccount {
                user_id,
                provider_directory,
                salt,
            } => {
                let (address, account) = self
                    .factory_mut(tx.to)?
                    .deploy_account(user_id, *provider_directory, *salt)?;
                self.place(address, Contract::Account(account))?;
                Ok(Some(address))
            }
        }
    }

    /// Deploy `contract` at the sender's CREATE address for this nonce.
    fn create(&mut self, tx: &Transaction, contract: Contract) -> Result<Option<Address>, ChainError> {
        let address = tx.from.create(tx.nonce);
        self.place(address, contract)?;
        Ok(Some(address))
    }

    fn place(&mut self, address: Address, contract: Contract) -> Result<(), ChainError> {
        if self.contracts.contains_key(&address) {
            return Err(ChainError::AddressOccupied(address));
        }
        self.contracts.insert(address, contract);
        Ok(())
    }

    fn key_registry_mut(&mut self, to: Option<Address>) -> Result<&mut KeyRegistry, ChainError> {
        let address = to.ok_or(ChainError::MissingRecipient)?;
        match self.contracts.get_mut(&address) {
            Some(Contract::KeyRegistry(registry)) => Ok(registry),
            _ => Err(ChainError::NotAContract {
                address,
                expected: ContractKind::KeyRegistry,
            }),
        }
    }

    fn directory_mut(&mut self, to: Option<Address>) -> Result<&mut ProviderDirectory, ChainError> {
        let address = to.ok_or(ChainError::MissingRecipient)?;
        match self.contracts.get_mut(&address) {
            Some(Contract::ProviderDirectory(directory)) => Ok(directory),
            _ => Err(ChainError::NotAContract {
                address,
                expected: ContractKind::ProviderDirectory,
            }),
        }
    }

    fn factory_mut(&mut self, to: Option<Address>) -> Result<&mut AccountFactory, ChainError> {
        let address = to.ok_or(ChainError::MissingRecipient)?;
        match self.contracts.get_mut(&address) {
            Some(Contract::AccountFactory(factory)) => Ok(factory),
            _ => Err(ChainError::NotAContract {
                address,
                expected: ContractKind::AccountFactory,
            }),
        }
    }

    pub fn key_registry(&self, address: Address) -> Result<&KeyRegistry, ChainError> {
        match self.contracts.get(&address) {
            Some(Contract::KeyRegistry(registry)) => Ok(registry),
            _ => Err(ChainError::NotAContract {
                address,
                expected: ContractKind::KeyRegistry,
            }),
        }
    }

    pub fn directory(&self, address: Address) -> Result<&ProviderDirectory, ChainError> {
        match self.contracts.get(&address) {
            Some(Contract::ProviderDirectory(directory)) => Ok(directory),
            _ => Err(ChainError::NotAContract {
                address,
                expected: ContractKind::ProviderDirectory,
            }),
        }
    }

    pub fn factory(&self, address: Address) -> Result<&AccountFactory, ChainError> {
        match self.contracts.get(&address) {
            Some(Contract::AccountFactory(factory)) => Ok(factory),
            _ => Err(ChainError::NotAContract {
                address,
                expected: ContractKind::AccountFactory,
            }),
        }
    }

    pub fn account(&self, address: Address) -> Result<&Account, ChainError> {
        match self.contracts.get(&address) {
            Some(Contract::Account(account)) => Ok(account),
            _ => Err(ChainError::NotAContract {
                address,
                expected: ContractKind::Account,
            }),
        }
    }
}

impl ProviderLookup for WorldState {
    fn provider_directory(&self, address: Address) -> Option<&ProviderDirectory> {
        self.directory(address).ok()
    }

    fn identity_provider(&self, address: Address) -> Option<&dyn IdentityProvider> {
        self.key_registry(address)
            .ok()
            .map(|registry| registry as &dyn IdentityProvider)
    }
}
