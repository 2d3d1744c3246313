// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The account and its transaction validation.
//!
//! Validation runs in a fixed order and stops at the first failure:
//!
//! 1. decode the custom signature into a [`CustomAuthPayload`]
//! 2. parse the JWT header (`RS256`, `kid`) and claims (`sub`)
//! 3. `sub` must be the account's user id
//! 4. resolve the provider name in the account's directory
//! 5. verify the signature with the provider's registry
//! 6. the transaction nonce must be the account nonce
//!
//! Validation itself is read-only. The host increments the nonce when it
//! commits the transaction.

use alloy::primitives::Address;
use tracing::{debug, warn};

use crate::auth::{parse_claims, parse_header, signed_message, CustomAuthPayload, ValidationError};
use crate::registry::{IdentityProvider, ProviderDirectory};

/// Read access to the contracts an account consults during validation.
pub trait ProviderLookup {
    /// The provider directory deployed at `address`, if any.
    fn provider_directory(&self, address: Address) -> Option<&ProviderDirectory>;

    /// The identity provider registry deployed at `address`, if any.
    fn identity_provider(&self, address: Address) -> Option<&dyn IdentityProvider>;
}

/// A JWT-controlled smart account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    user_id: String,
    provider_directory: Address,
    nonce: u64,
}

/// What a successful validation established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub provider: String,
    pub registry: Address,
    pub key_id: String,
    pub subject: String,
    pub issued_at: Option<i64>,
    pub jwt_nonce: Option<String>,
}

impl Account {
    pub(crate) fn new(user_id: &str, provider_directory: Address) -> Self {
        Self {
            user_id: user_id.to_string(),
            provider_directory,
            nonce: 0,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn provider_directory(&self) -> Address {
        self.provider_directory
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Validate a transaction's custom signature and nonce.
    pub fn validate<L: ProviderLookup + ?Sized>(
        &self,
        tx_nonce: u64,
        custom_signature: &[u8],
        lookup: &L,
    ) -> Result<Validated, ValidationError> {
        let result = self.check(tx_nonce, custom_signature, lookup);
        match &result {
            Ok(validated) => debug!(
                user_id = %self.user_id,
                provider = %validated.provider,
                key_id = %validated.key_id,
                iat = ?validated.issued_at,
                nonce = tx_nonce,
                "Transaction validated"
            ),
            Err(e) => warn!(
                user_id = %self.user_id,
                error_code = e.error_code(),
                error = %e,
                "Transaction rejected"
            ),
        }
        result
    }

    fn check<L: ProviderLookup + ?Sized>(
        &self,
        tx_nonce: u64,
        custom_signature: &[u8],
        lookup: &L,
    ) -> Result<Validated, ValidationError> {
        let payload = CustomAuthPayload::decode(custom_signature)?;
        let header = parse_header(&payload.header_json)?;
        let claims = parse_claims(&payload.payload_json)?;

        if claims.sub != self.user_id {
            return Err(ValidationError::IdentityMismatch);
        }

        let registry = lookup
            .provider_directory(self.provider_directory)
            .ok_or_else(|| ValidationError::UnknownProvider(payload.provider_name.clone()))?
            .resolve(&payload.provider_name)
            .map_err(|e| ValidationError::UnknownProvider(e.0))?;

        let message = signed_message(&payload.header_json, &payload.payload_json);
        let verified = lookup.identity_provider(registry).is_some_and(|provider| {
            provider.verify(&header.key_id, message.as_bytes(), &payload.auth_signature)
        });
        if !verified {
            return Err(ValidationError::InvalidSignature);
        }

        if tx_nonce != self.nonce {
            return Err(ValidationError::NonceMismatch {
                expected: self.nonce,
                actual: tx_nonce,
            });
        }

        Ok(Validated {
            provider: payload.provider_name,
            registry,
            key_id: header.key_id,
            subject: claims.sub,
            issued_at: claims.iat,
            jwt_nonce: claims.nonce,
        })
    }

    pub(crate) fn increment_nonce(&mut self) {
        self.nonce += 1;
    }
}
