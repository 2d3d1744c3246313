// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction submission and receipt lookup.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    chain::{Receipt, Transaction},
    error::{ApiError, ErrorBody},
    models::parse_hash,
    state::AppState,
};

/// Submit a transaction.
///
/// The transaction is validated and executed under the chain's write lock.
/// On success it is committed and its receipt returned; on failure nothing
/// it touched is kept.
#[utoipa::path(
    post,
    path = "/v1/transactions",
    tag = "Transactions",
    request_body = Transaction,
    responses(
        (status = 200, description = "Transaction committed", body = Receipt),
        (status = 400, description = "Malformed call", body = ErrorBody),
        (status = 403, description = "Caller does not own the target contract", body = ErrorBody),
        (status = 404, description = "Target is not the expected contract", body = ErrorBody),
        (status = 409, description = "Address already occupied", body = ErrorBody),
        (status = 422, description = "Validation rejected the transaction", body = ErrorBody)
    )
)]
pub async fn submit_transaction(
    State(state): State<AppState>,
    Json(tx): Json<Transaction>,
) -> Result<Json<Receipt>, ApiError> {
    let mut chain = state.chain.write().await;
    let receipt = chain.submit(tx)?;
    Ok(Json(receipt))
}

/// Get the receipt of a committed transaction.
#[utoipa::path(
    get,
    path = "/v1/transactions/{tx_hash}",
    tag = "Transactions",
    params(("tx_hash" = String, Path, description = "Transaction hash")),
    responses(
        (status = 200, description = "Receipt found", body = Receipt),
        (status = 404, description = "Unknown transaction", body = ErrorBody)
    )
)]
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(tx_hash): Path<String>,
) -> Result<Json<Receipt>, ApiError> {
    let hash = parse_hash(&tx_hash)?;
    let chain = state.chain.read().await;
    chain
        .receipt(&hash)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Transaction {tx_hash} not found")))
}
