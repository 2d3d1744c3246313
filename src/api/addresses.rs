// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    chain::Contract,
    error::{ApiError, ErrorBody},
    models::{parse_address, AddressInfo},
    state::AppState,
};

/// Balance, nonce and contract kind of any address.
///
/// Unknown addresses are not an error: they have zero balance and nonce.
#[utoipa::path(
    get,
    path = "/v1/addresses/{address}",
    tag = "Addresses",
    params(("address" = String, Path, description = "0x-prefixed address")),
    responses(
        (status = 200, description = "Address state", body = AddressInfo),
        (status = 400, description = "Invalid address", body = ErrorBody)
    )
)]
pub async fn get_address(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AddressInfo>, ApiError> {
    let address = parse_address(&address)?;
    let chain = state.chain.read().await;
    Ok(Json(AddressInfo {
        address,
        balance: chain.balance(address),
        nonce: chain.nonce(address),
        contract: chain.contract(address).map(Contract::kind),
    }))
}
