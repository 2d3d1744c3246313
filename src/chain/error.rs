// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Devnet execution errors.

use alloy::primitives::{Address, U256};
use axum::http::StatusCode;
use thiserror::Error;

use super::types::ContractKind;
use crate::account::FactoryError;
use crate::auth::ValidationError;
use crate::registry::RegistryError;

/// Why a transaction was not committed.
///
/// Every variant leaves the world state exactly as it was before the
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Factory(#[from] FactoryError),

    #[error("Insufficient balance at {address}: have {balance}, need {required}")]
    InsufficientBalance {
        address: Address,
        balance: U256,
        required: U256,
    },

    #[error("{address} is not a {expected}")]
    NotAContract {
        address: Address,
        expected: ContractKind,
    },

    #[error("Contract {0} cannot originate transactions")]
    ContractOriginatedCall(Address),

    #[error("Sender {0} is neither an account nor a dev account")]
    UnknownSender(Address),

    #[error("Call requires a recipient")]
    MissingRecipient,

    #[error("Address {0} is already occupied by a contract")]
    AddressOccupied(Address),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl ChainError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChainError::Validation(e) => e.error_code(),
            ChainError::Registry(e) => e.error_code(),
            ChainError::Factory(e) => e.error_code(),
            ChainError::InsufficientBalance { .. } => "insufficient_balance",
            ChainError::NotAContract { .. } => "not_a_contract",
            ChainError::ContractOriginatedCall(_) => "contract_originated_call",
            ChainError::UnknownSender(_) => "unknown_sender",
            ChainError::MissingRecipient => "missing_recipient",
            ChainError::AddressOccupied(_) => "address_occupied",
            ChainError::Encoding(_) => "encoding_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChainError::Validation(e) => e.status_code(),
            ChainError::Registry(RegistryError::MalformedKeyList(_)) => StatusCode::BAD_REQUEST,
            ChainError::Registry(_) | ChainError::UnknownSender(_) => StatusCode::FORBIDDEN,
            ChainError::Factory(_) | ChainError::AddressOccupied(_) => StatusCode::CONFLICT,
            ChainError::NotAContract { .. } => StatusCode::NOT_FOUND,
            ChainError::MissingRecipient => StatusCode::BAD_REQUEST,
            ChainError::InsufficientBalance { .. } | ChainError::ContractOriginatedCall(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ChainError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
