// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account validation errors.

use axum::http::StatusCode;

/// Reasons an account rejects a transaction during validation.
///
/// Every variant is terminal for the transaction that produced it. The host
/// discards all state touched by the transaction, so none of these can leave
/// a registry, a directory or another account half-updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The custom signature field could not be decoded, or the JWT header or
    /// payload inside it is not usable.
    MalformedAuthPayload(String),
    /// The JWT `sub` claim is not the user id the account was deployed for.
    IdentityMismatch,
    /// The provider name is not registered in the account's directory.
    UnknownProvider(String),
    /// The provider signature does not verify under an active key.
    InvalidSignature,
    /// The transaction nonce is not the account's current nonce.
    NonceMismatch { expected: u64, actual: u64 },
}

impl ValidationError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MalformedAuthPayload(_) => "malformed_auth_payload",
            ValidationError::IdentityMismatch => "identity_mismatch",
            ValidationError::UnknownProvider(_) => "unknown_provider",
            ValidationError::InvalidSignature => "invalid_signature",
            ValidationError::NonceMismatch { .. } => "nonce_mismatch",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ValidationError::MalformedAuthPayload(message.into())
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MalformedAuthPayload(msg) => {
                write!(f, "Malformed auth payload: {msg}")
            }
            ValidationError::IdentityMismatch => {
                write!(f, "JWT subject does not match the account's user id")
            }
            ValidationError::UnknownProvider(name) => write!(f, "Unknown provider: {name}"),
            ValidationError::InvalidSignature => write!(f, "Auth signature is invalid"),
            ValidationError::NonceMismatch { expected, actual } => {
                write!(f, "Nonce mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            ValidationError::malformed("x").error_code(),
            "malformed_auth_payload"
        );
        assert_eq!(ValidationError::IdentityMismatch.error_code(), "identity_mismatch");
        assert_eq!(
            ValidationError::UnknownProvider("Google".into()).error_code(),
            "unknown_provider"
        );
        assert_eq!(ValidationError::InvalidSignature.error_code(), "invalid_signature");
        assert_eq!(
            ValidationError::NonceMismatch { expected: 1, actual: 0 }.error_code(),
            "nonce_mismatch"
        );
    }

    #[test]
    fn nonce_mismatch_message_names_both_nonces() {
        let err = ValidationError::NonceMismatch { expected: 3, actual: 2 };
        assert_eq!(err.to_string(), "Nonce mismatch: expected 3, got 2");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
