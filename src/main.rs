// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, process::ExitCode};

use relational_jwt_account::{
    api::router,
    chain::Chain,
    config::{NodeConfig, DEFAULT_LOG_FILTER, LOG_FORMAT_ENV},
    seed::bootstrap,
    state::AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match NodeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut chain = Chain::new(config.chain_id, config.address_scheme)
        .with_genesis([(config.operator, config.genesis_balance)]);
    info!(
        chain_id = config.chain_id,
        operator = %config.operator,
        scheme = %config.address_scheme,
        "Devnet initialized"
    );

    if config.seed_providers {
        match bootstrap(&mut chain, config.operator) {
            Ok(deployment) => info!(
                provider_directory = %deployment.provider_directory,
                google_registry = %deployment.google_registry,
                account_factory = %deployment.account_factory,
                "Seeded Google provider"
            ),
            Err(e) => {
                error!(error = %e, error_code = e.error_code(), "Provider seeding failed");
                return ExitCode::FAILURE;
            }
        }
    }

    if config.dev_faucet {
        warn!("Dev faucet enabled: POST /v1/dev/fund credits any address");
    }

    let bind_addr = config.bind_addr;
    let app = router(AppState::new(chain, config));

    let listener = match TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %bind_addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("Devnet node listening on http://{bind_addr} (docs at /docs)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
