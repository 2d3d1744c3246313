// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Devnet transaction, receipt and contract types.

use std::fmt;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::account::{Account, AccountFactory, AddressScheme};
use crate::registry::{KeyRegistry, ProviderDirectory};

/// A transaction submitted to the devnet.
///
/// `from` is either a development EOA (unlocked, no signature) or a deployed
/// account, in which case `custom_signature` carries the JWT assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[schema(value_type = String, example = "0x36615Cf349d7F6344891B1e7CA7C72883F5dc049")]
    pub from: Address,
    /// Target contract or recipient. Absent for contract creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub to: Option<Address>,
    pub nonce: u64,
    /// Native value in wei.
    #[serde(default)]
    #[schema(value_type = String, example = "0x0")]
    pub value: U256,
    #[serde(default)]
    pub call: Call,
    /// ABI-encoded custom auth payload, required when `from` is an account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub custom_signature: Option<Bytes>,
}

impl Transaction {
    /// Plain value transfer from `from` to `to`.
    pub fn transfer(from: Address, to: Address, nonce: u64, value: U256) -> Self {
        Self {
            from,
            to: Some(to),
            nonce,
            value,
            call: Call::Transfer,
            custom_signature: None,
        }
    }

    /// Contract call or creation without value.
    pub fn call(from: Address, to: Option<Address>, nonce: u64, call: Call) -> Self {
        Self {
            from,
            to,
            nonce,
            value: U256::ZERO,
            call,
            custom_signature: None,
        }
    }

    pub fn with_custom_signature(mut self, custom_signature: impl Into<Bytes>) -> Self {
        self.custom_signature = Some(custom_signature.into());
        self
    }

    /// Keccak-256 of the canonical JSON encoding.
    pub fn hash(&self) -> Result<B256, serde_json::Error> {
        Ok(keccak256(serde_json::to_vec(self)?))
    }
}

/// What a transaction does besides moving `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Call {
    /// Value transfer only.
    #[default]
    Transfer,
    /// Deploy a key registry owned by the sender.
    CreateKeyRegistry,
    /// Deploy a provider directory owned by the sender.
    CreateProviderDirectory,
    /// Deploy an account factory.
    #[serde(rename_all = "camelCase")]
    CreateAccountFactory {
        #[serde(default)]
        #[schema(value_type = Option<String>)]
        account_code_hash: Option<B256>,
        #[serde(default)]
        scheme: Option<AddressScheme>,
    },
    /// Register keys in the registry at `to`.
    #[serde(rename_all = "camelCase")]
    AddKeys {
        key_ids: Vec<String>,
        #[schema(value_type = Vec<String>)]
        moduli: Vec<Bytes>,
    },
    /// Register keys from ABI-encoded `(string[], bytes[])`.
    #[serde(rename_all = "camelCase")]
    AddKeysEncoded {
        #[schema(value_type = String)]
        data: Bytes,
    },
    #[serde(rename_all = "camelCase")]
    RemoveKey { key_id: String },
    /// Register or rotate a provider in the directory at `to`.
    #[serde(rename_all = "camelCase")]
    AddProvider {
        name: String,
        #[schema(value_type = String)]
        registry: Address,
    },
    RemoveProvider { name: String },
    /// Deploy an account through the factory at `to`.
    #[serde(rename_all = "camelCase")]
    DeployAccount {
        user_id: String,
        #[schema(value_type = String)]
        provider_directory: Address,
        #[serde(default)]
        #[schema(value_type = String)]
        salt: B256,
    },
}

impl Call {
    /// Method name used in logs.
    pub fn method(&self) -> &'static str {
        match self {
            Call::Transfer => "transfer",
            Call::CreateKeyRegistry => "create_key_registry",
            Call::CreateProviderDirectory => "create_provider_directory",
            Call::CreateAccountFactory { .. } => "create_account_factory",
            Call::AddKeys { .. } => "add_keys",
            Call::AddKeysEncoded { .. } => "add_keys_encoded",
            Call::RemoveKey { .. } => "remove_key",
            Call::AddProvider { .. } => "add_provider",
            Call::RemoveProvider { .. } => "remove_provider",
            Call::DeployAccount { .. } => "deploy_account",
        }
    }
}

/// Record of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[schema(value_type = String)]
    pub tx_hash: B256,
    pub block_number: u64,
    #[schema(value_type = String)]
    pub from: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub to: Option<Address>,
    pub nonce: u64,
    pub method: String,
    /// Address of the contract or account the transaction created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub contract_address: Option<Address>,
    pub timestamp: DateTime<Utc>,
}

/// A contract instance held by the devnet.
#[derive(Debug, Clone)]
pub enum Contract {
    KeyRegistry(KeyRegistry),
    ProviderDirectory(ProviderDirectory),
    AccountFactory(AccountFactory),
    Account(Account),
}

impl Contract {
    pub fn kind(&self) -> ContractKind {
        match self {
            Contract::KeyRegistry(_) => ContractKind::KeyRegistry,
            Contract::ProviderDirectory(_) => ContractKind::ProviderDirectory,
            Contract::AccountFactory(_) => ContractKind::AccountFactory,
            Contract::Account(_) => ContractKind::Account,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    KeyRegistry,
    ProviderDirectory,
    AccountFactory,
    Account,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContractKind::KeyRegistry => "key registry",
            ContractKind::ProviderDirectory => "provider directory",
            ContractKind::AccountFactory => "account factory",
            ContractKind::Account => "account",
        };
        f.write_str(name)
    }
}
