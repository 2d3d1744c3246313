// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account state and counterfactual address endpoints.

use alloy::primitives::B256;
use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{ApiError, ErrorBody},
    models::{parse_address, AccountAddressRequest, AccountAddressResponse, AccountInfo},
    state::AppState,
};

/// Get a deployed account.
#[utoipa::path(
    get,
    path = "/v1/accounts/{address}",
    tag = "Accounts",
    params(("address" = String, Path, description = "Account address")),
    responses(
        (status = 200, description = "Account state", body = AccountInfo),
        (status = 404, description = "No account at this address", body = ErrorBody)
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AccountInfo>, ApiError> {
    let address = parse_address(&address)?;
    let chain = state.chain.read().await;
    let account = chain.state().account(address)?;

    Ok(Json(AccountInfo {
        address,
        user_id: account.user_id().to_string(),
        provider_directory: account.provider_directory(),
        nonce: account.nonce(),
        balance: chain.balance(address),
    }))
}

/// Compute the address an account would be deployed at.
///
/// The result does not depend on whether the account exists, so wallets can
/// fund the address before deployment.
#[utoipa::path(
    post,
    path = "/v1/factories/{factory}/address",
    tag = "Accounts",
    params(("factory" = String, Path, description = "Account factory address")),
    request_body = AccountAddressRequest,
    responses(
        (status = 200, description = "Derived address", body = AccountAddressResponse),
        (status = 404, description = "No factory at this address", body = ErrorBody)
    )
)]
pub async fn account_address(
    State(state): State<AppState>,
    Path(factory): Path<String>,
    Json(request): Json<AccountAddressRequest>,
) -> Result<Json<AccountAddressResponse>, ApiError> {
    let factory_address = parse_address(&factory)?;
    let chain = state.chain.read().await;
    let factory = chain.state().factory(factory_address)?;

    let address = factory.account_address(
        &request.user_id,
        request.provider_directory,
        request.salt.unwrap_or(B256::ZERO),
    );

    Ok(Json(AccountAddressResponse {
        factory: factory_address,
        address,
        scheme: factory.scheme(),
        deployed: factory.is_deployed(address),
    }))
}
