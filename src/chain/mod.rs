// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Devnet
//!
//! An in-process chain hosting key registries, provider directories,
//! account factories and accounts.
//!
//! Transactions are applied one at a time. Each one runs against a copy of
//! the world state and the copy replaces the live state only when every
//! step succeeded, so a rejected transaction leaves no trace: no nonce bump,
//! no value moved, no contract written.

pub mod error;
pub mod types;
pub mod world;

use std::collections::HashMap;

use alloy::primitives::{Address, B256, U256};
use chrono::Utc;
use tracing::{info, warn};

pub use error::ChainError;
pub use types::{Call, Contract, ContractKind, Receipt, Transaction};
pub use world::{Execution, WorldState};

use crate::account::AddressScheme;

/// The devnet: world state plus committed receipts.
#[derive(Debug)]
pub struct Chain {
    chain_id: u64,
    state: WorldState,
    receipts: HashMap<B256, Receipt>,
    block_number: u64,
}

impl Chain {
    pub fn new(chain_id: u64, default_scheme: AddressScheme) -> Self {
        Self {
            chain_id,
            state: WorldState::new(default_scheme),
            receipts: HashMap::new(),
            block_number: 0,
        }
    }

    /// Credit initial balances and unlock each allocated address as a dev
    /// account.
    pub fn with_genesis(mut self, allocations: impl IntoIterator<Item = (Address, U256)>) -> Self {
        for (address, amount) in allocations {
            self.state.register_dev_account(address);
            self.state.credit(address, amount);
        }
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.state.balance(address)
    }

    pub fn nonce(&self, address: Address) -> u64 {
        self.state.nonce(address)
    }

    pub fn contract(&self, address: Address) -> Option<&Contract> {
        self.state.contract(address)
    }

    pub fn receipt(&self, tx_hash: &B256) -> Option<&Receipt> {
        self.receipts.get(tx_hash)
    }

    /// Development faucet: credit `amount` to `address`.
    ///
    /// Funding never unlocks the address as a sender.
    pub fn fund(&mut self, address: Address, amount: U256) -> U256 {
        let balance = self.state.credit(address, amount);
        info!(%address, %amount, %balance, "Address funded");
        balance
    }

    /// Execute and commit a transaction, or reject it without side effects.
    pub fn submit(&mut self, tx: Transaction) -> Result<Receipt, ChainError> {
        let tx_hash = tx.hash().map_err(|e| ChainError::Encoding(e.to_string()))?;

        let mut next = self.state.clone();
        let execution = match next.execute(&tx) {
            Ok(execution) => execution,
            Err(e) => {
                warn!(
                    %tx_hash,
                    from = %tx.from,
                    nonce = tx.nonce,
                    method = tx.call.method(),
                    error_code = e.error_code(),
                    error = %e,
                    "Transaction rejected"
                );
                return Err(e);
            }
        };

        self.state = next;
        self.block_number += 1;

        let receipt = Receipt {
            tx_hash,
            block_number: self.block_number,
            from: tx.from,
            to: tx.to,
            nonce: tx.nonce,
            method: tx.call.method().to_string(),
            contract_address: execution.contract_address,
            timestamp: Utc::now(),
        };
        self.receipts.insert(tx_hash, receipt.clone());

        info!(
            %tx_hash,
            block = self.block_number,
            from = %tx.from,
            nonce = tx.nonce,
            method = tx.call.method(),
            provider = execution.validated.as_ref().map(|v| v.provider.as_str()),
            contract = ?execution.contract_address,
            "Transaction committed"
        );
        Ok(receipt)
    }
}
