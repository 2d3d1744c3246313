// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    account::AddressScheme,
    chain::{Call, ContractKind, Receipt, Transaction},
    error::ErrorBody,
    models::{
        AccountAddressRequest, AccountAddressResponse, AccountInfo, AddressInfo, FundRequest,
        FundResponse, KeyInfo, ProviderInfo, RegistryKeys,
    },
    state::AppState,
};

pub mod accounts;
pub mod addresses;
pub mod dev;
pub mod health;
pub mod providers;
pub mod transactions;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/transactions", post(transactions::submit_transaction))
        .route("/transactions/{tx_hash}", get(transactions::get_receipt))
        .route("/addresses/{address}", get(addresses::get_address))
        .route("/accounts/{address}", get(accounts::get_account))
        .route("/factories/{factory}/address", post(accounts::account_address))
        .route(
            "/directories/{directory}/providers/{name}",
            get(providers::resolve_provider),
        )
        .route("/registries/{registry}/keys", get(providers::list_keys))
        .route("/dev/fund", post(dev::fund))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        transactions::submit_transaction,
        transactions::get_receipt,
        addresses::get_address,
        accounts::get_account,
        accounts::account_address,
        providers::resolve_provider,
        providers::list_keys,
        dev::fund,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            Transaction,
            Call,
            Receipt,
            ContractKind,
            AddressScheme,
            AddressInfo,
            AccountInfo,
            AccountAddressRequest,
            AccountAddressResponse,
            ProviderInfo,
            KeyInfo,
            RegistryKeys,
            FundRequest,
            FundResponse,
            ErrorBody
        )
    ),
    tags(
        (name = "Transactions", description = "Transaction submission and receipts"),
        (name = "Addresses", description = "Balances and nonces"),
        (name = "Accounts", description = "JWT accounts and address derivation"),
        (name = "Providers", description = "Provider directories and key registries"),
        (name = "Dev", description = "Development faucet"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;
