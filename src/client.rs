// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the devnet node.

use alloy::primitives::{Address, B256, U256};
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::chain::{Receipt, Transaction};
use crate::config::{NetworkConfig, ZKSYNC_LOCAL};
use crate::error::ErrorBody;
use crate::models::{
    AccountAddressRequest, AccountAddressResponse, AccountInfo, AddressInfo, FundRequest,
    FundResponse,
};

/// Devnet node client.
#[derive(Debug, Clone)]
pub struct DevnetClient {
    base_url: String,
    http: reqwest::Client,
}

impl DevnetClient {
    /// Create a client for the node at `base_url` (e.g. `http://127.0.0.1:3050`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client for a network preset.
    pub fn for_network(network: &NetworkConfig) -> Self {
        Self::new(network.rpc_url)
    }

    /// Create a client for the local node.
    pub fn local() -> Self {
        Self::for_network(&ZKSYNC_LOCAL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Balance, nonce and contract kind of `address`.
    pub async fn address_info(&self, address: Address) -> Result<AddressInfo, DevnetClientError> {
        self.get(&format!("/v1/addresses/{address}")).await
    }

    /// Native balance in wei.
    pub async fn balance(&self, address: Address) -> Result<U256, DevnetClientError> {
        Ok(self.address_info(address).await?.balance)
    }

    /// Next expected nonce.
    pub async fn nonce(&self, address: Address) -> Result<u64, DevnetClientError> {
        Ok(self.address_info(address).await?.nonce)
    }

    pub async fn account(&self, address: Address) -> Result<AccountInfo, DevnetClientError> {
        self.get(&format!("/v1/accounts/{address}")).await
    }

    /// Submit a transaction and wait for its receipt.
    pub async fn send_transaction(&self, tx: &Transaction) -> Result<Receipt, DevnetClientError> {
        self.post("/v1/transactions", tx).await
    }

    /// Receipt of a committed transaction, or `None` if the node has none.
    pub async fn receipt(&self, tx_hash: B256) -> Result<Option<Receipt>, DevnetClientError> {
        match self.get(&format!("/v1/transactions/{tx_hash}")).await {
            Ok(receipt) => Ok(Some(receipt)),
            Err(DevnetClientError::Rejected { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Precompute the address of `user_id`'s account under `factory`.
    pub async fn account_address(
        &self,
        factory: Address,
        user_id: &str,
        provider_directory: Address,
        salt: B256,
    ) -> Result<Address, DevnetClientError> {
        let request = AccountAddressRequest {
            user_id: user_id.to_string(),
            provider_directory,
            salt: Some(salt),
        };
        let response: AccountAddressResponse = self
            .post(&format!("/v1/factories/{factory}/address"), &request)
            .await?;
        Ok(response.address)
    }

    /// Credit `amount` wei through the dev faucet; returns the new balance.
    pub async fn fund(&self, address: Address, amount: U256) -> Result<U256, DevnetClientError> {
        let response: FundResponse = self
            .post("/v1/dev/fund", &FundRequest { address, amount })
            .await?;
        Ok(response.balance)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DevnetClientError> {
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| DevnetClientError::Http(e.to_string()))?;
        decode(response).await
    }

    async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DevnetClientError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| DevnetClientError::Http(e.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DevnetClientError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| DevnetClientError::Decode(e.to_string()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| DevnetClientError::Http(e.to_string()))?;
    let (error_code, message) = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(err) => (err.error_code, err.error),
        Err(_) => ("http_error".to_string(), body),
    };
    Err(DevnetClientError::Rejected {
        status: status.as_u16(),
        error_code,
        message,
    })
}

/// Devnet client errors.
#[derive(Debug, Error)]
pub enum DevnetClientError {
    #[error("HTTP error: {0}")]
    Http(String),

    /// The node answered with an error body.
    #[error("Rejected ({status} {error_code}): {message}")]
    Rejected {
        status: u16,
        error_code: String,
        message: String,
    },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl DevnetClientError {
    /// Machine-readable code of a node rejection.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            DevnetClientError::Rejected { error_code, .. } => Some(error_code),
            _ => None,
        }
    }
}
