// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    error::{ApiError, ErrorBody},
    models::{FundRequest, FundResponse},
    state::AppState,
};

/// Development faucet.
///
/// Credits any address, including counterfactual account addresses. Only
/// available when `DEV_FAUCET` is enabled.
#[utoipa::path(
    post,
    path = "/v1/dev/fund",
    tag = "Dev",
    request_body = FundRequest,
    responses(
        (status = 200, description = "Address funded", body = FundResponse),
        (status = 403, description = "Faucet disabled", body = ErrorBody)
    )
)]
pub async fn fund(
    State(state): State<AppState>,
    Json(request): Json<FundRequest>,
) -> Result<Json<FundResponse>, ApiError> {
    if !state.config.dev_faucet {
        return Err(ApiError::forbidden("Dev faucet is disabled"));
    }

    let mut chain = state.chain.write().await;
    let balance = chain.fund(request.address, request.amount);
    Ok(Json(FundResponse {
        address: request.address,
        balance,
    }))
}
