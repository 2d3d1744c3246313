// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the devnet node. Addresses, hashes and
//! byte strings travel as `0x`-prefixed hex; wei amounts as `0x` hex
//! quantities.
//!
//! ## Model Categories
//!
//! - **Addresses**: balance, nonce and contract kind of any address
//! - **Accounts**: JWT account state and counterfactual address lookup
//! - **Providers**: directory lookups and registry key listings
//! - **Dev**: faucet requests

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::account::AddressScheme;
use crate::chain::ContractKind;
use crate::error::ApiError;

/// Parse a `0x`-prefixed address from a path segment.
pub fn parse_address(raw: &str) -> Result<Address, ApiError> {
    raw.parse::<Address>()
        .map_err(|e| ApiError::bad_request(format!("Invalid address '{raw}': {e}")))
}

/// Parse a 32-byte hash from a path segment.
pub fn parse_hash(raw: &str) -> Result<B256, ApiError> {
    raw.parse::<B256>()
        .map_err(|e| ApiError::bad_request(format!("Invalid hash '{raw}': {e}")))
}

// =============================================================================
// Addresses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    #[schema(value_type = String)]
    pub address: Address,
    /// Balance in wei
    #[schema(value_type = String, example = "0xde0b6b3a7640000")]
    pub balance: U256,
    /// Next expected nonce
    pub nonce: u64,
    /// Contract deployed at the address, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<ContractKind>,
}

// =============================================================================
// Accounts
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[schema(value_type = String)]
    pub address: Address,
    /// Provider user id the account is bound to
    pub user_id: String,
    #[schema(value_type = String)]
    pub provider_directory: Address,
    pub nonce: u64,
    #[schema(value_type = String)]
    pub balance: U256,
}

/// Inputs of the deterministic account address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountAddressRequest {
    pub user_id: String,
    #[schema(value_type = String)]
    pub provider_directory: Address,
    /// Defaults to the zero hash
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub salt: Option<B256>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountAddressResponse {
    #[schema(value_type = String)]
    pub factory: Address,
    #[schema(value_type = String)]
    pub address: Address,
    pub scheme: AddressScheme,
    /// Whether an account already lives at `address`
    pub deployed: bool,
}

// =============================================================================
// Providers
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    #[schema(value_type = String)]
    pub directory: Address,
    pub name: String,
    #[schema(value_type = String)]
    pub registry: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyInfo {
    pub key_id: String,
    /// Modulus size in bits
    pub modulus_bits: usize,
    pub exponent: u32,
    pub active: bool,
    pub revision: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryKeys {
    #[schema(value_type = String)]
    pub registry: Address,
    #[schema(value_type = String)]
    pub owner: Address,
    pub keys: Vec<KeyInfo>,
}

// =============================================================================
// Dev
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundRequest {
    #[schema(value_type = String)]
    pub address: Address,
    /// Amount in wei
    #[schema(value_type = String, example = "0xde0b6b3a7640000")]
    pub amount: U256,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundResponse {
    #[schema(value_type = String)]
    pub address: Address,
    /// Balance after funding, in wei
    #[schema(value_type = String)]
    pub balance: U256,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn parses_path_addresses() {
        let address = parse_address("0x36615Cf349d7F6344891B1e7CA7C72883F5dc049").unwrap();
        assert_eq!(
            address.to_string(),
            "0x36615Cf349d7F6344891B1e7CA7C72883F5dc049"
        );
        assert_eq!(parse_address("alice").unwrap_err().status, StatusCode::BAD_REQUEST);
        assert!(parse_hash("0x12").is_err());
    }

    #[test]
    fn fund_request_accepts_hex_amounts() {
        let request: FundRequest = serde_json::from_str(
            r#"{"address":"0x36615Cf349d7F6344891B1e7CA7C72883F5dc049","amount":"0x10"}"#,
        )
        .unwrap();
        assert_eq!(request.amount, U256::from(16));
    }

    #[test]
    fn address_info_omits_missing_contract() {
        let info = AddressInfo {
            address: Address::ZERO,
            balance: U256::from(1),
            nonce: 0,
            contract: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["balance"], "0x1");
        assert!(json.get("contract").is_none());
    }
}
