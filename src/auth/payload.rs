// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wire format of the account's custom signature field.
//!
//! The field is the ABI encoding of the parameter tuple
//! `(string providerName, string headerJson, string payloadJson, bytes authSignature)`.

use alloy::primitives::Bytes;
use alloy::sol_types::SolValue;

use super::error::ValidationError;

/// Decoded custom signature: which provider vouches for the caller, the raw
/// JWT header and payload JSON, and the provider's RS256 signature over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAuthPayload {
    pub provider_name: String,
    pub header_json: String,
    pub payload_json: String,
    pub auth_signature: Bytes,
}

type WireTuple = (String, String, String, Bytes);

impl CustomAuthPayload {
    /// Decode the ABI parameter tuple.
    pub fn decode(data: &[u8]) -> Result<Self, ValidationError> {
        let (provider_name, header_json, payload_json, auth_signature) =
            WireTuple::abi_decode_params(data).map_err(|e| {
                ValidationError::malformed(format!("custom signature is not a valid auth payload: {e}"))
            })?;

        Ok(Self {
            provider_name,
            header_json,
            payload_json,
            auth_signature,
        })
    }

    /// Encode as the ABI parameter tuple.
    pub fn encode(&self) -> Vec<u8> {
        let tuple: WireTuple = (
            self.provider_name.clone(),
            self.header_json.clone(),
            self.payload_json.clone(),
            self.auth_signature.clone(),
        );
        tuple.abi_encode_params()
    }
}
