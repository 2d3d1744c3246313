// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Deterministic account address derivation.
//!
//! An account's address depends only on the factory address, the account
//! code hash, the salt and the constructor arguments `(userId, directory)`,
//! so wallets can compute it (and fund it) before the account exists.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{keccak256, Address, B256};
use alloy::sol_types::SolValue;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Code hash used for accounts when a factory is created without one.
pub fn default_account_code_hash() -> B256 {
    keccak256(b"relational/JWTAccount/v1")
}

/// ABI encoding of the account constructor arguments `(string userId, address directory)`.
pub fn constructor_args(user_id: &str, provider_directory: Address) -> Vec<u8> {
    (user_id.to_string(), provider_directory).abi_encode_params()
}

/// EIP-1014 address: `keccak256(0xff ++ deployer ++ salt ++ keccak256(init_code))[12..]`.
pub fn create2_address(deployer: Address, salt: B256, init_code: &[u8]) -> Address {
    deployer.create2_from_code(salt, init_code)
}

/// Address derivation formula used by a factory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AddressScheme {
    /// Standard EVM CREATE2 with `initCode = codeHash ++ args`.
    #[default]
    Evm,
    /// zkSync Era CREATE2, as used by the local zkSync node.
    ZkSync,
}

impl AddressScheme {
    /// Derive the address an account with these inputs is deployed at.
    pub fn derive(
        self,
        code_hash: B256,
        deployer: Address,
        salt: B256,
        constructor_args: &[u8],
    ) -> Address {
        match self {
            AddressScheme::Evm => {
                let mut init_code = Vec::with_capacity(32 + constructor_args.len());
                init_code.extend_from_slice(code_hash.as_slice());
                init_code.extend_from_slice(constructor_args);
                create2_address(deployer, salt, &init_code)
            }
            AddressScheme::ZkSync => {
                let mut buf = Vec::with_capacity(5 * 32);
                buf.extend_from_slice(keccak256(b"zksyncCreate2").as_slice());
                buf.extend_from_slice(deployer.into_word().as_slice());
                buf.extend_from_slice(salt.as_slice());
                buf.extend_from_slice(code_hash.as_slice());
                buf.extend_from_slice(keccak256(constructor_args).as_slice());
                Address::from_word(keccak256(&buf))
            }
        }
    }
}

impl fmt::Display for AddressScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressScheme::Evm => write!(f, "evm"),
            AddressScheme::ZkSync => write!(f, "zksync"),
        }
    }
}

impl FromStr for AddressScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "evm" => Ok(AddressScheme::Evm),
            "zksync" => Ok(AddressScheme::ZkSync),
            other => Err(format!("unknown address scheme '{other}' (expected evm or zksync)")),
        }
    }
}
