// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Provider directory and key registry queries.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{ApiError, ErrorBody},
    models::{parse_address, KeyInfo, ProviderInfo, RegistryKeys},
    state::AppState,
};

/// Resolve a provider name in a directory.
#[utoipa::path(
    get,
    path = "/v1/directories/{directory}/providers/{name}",
    tag = "Providers",
    params(
        ("directory" = String, Path, description = "Provider directory address"),
        ("name" = String, Path, description = "Provider name, e.g. Google")
    ),
    responses(
        (status = 200, description = "Provider registry", body = ProviderInfo),
        (status = 404, description = "Unknown directory or provider", body = ErrorBody)
    )
)]
pub async fn resolve_provider(
    State(state): State<AppState>,
    Path((directory, name)): Path<(String, String)>,
) -> Result<Json<ProviderInfo>, ApiError> {
    let directory_address = parse_address(&directory)?;
    let chain = state.chain.read().await;
    let registry = chain
        .state()
        .directory(directory_address)?
        .resolve(&name)?;

    Ok(Json(ProviderInfo {
        directory: directory_address,
        name,
        registry,
    }))
}

/// List the keys of a registry, including removed ones.
#[utoipa::path(
    get,
    path = "/v1/registries/{registry}/keys",
    tag = "Providers",
    params(("registry" = String, Path, description = "Key registry address")),
    responses(
        (status = 200, description = "Registered keys", body = RegistryKeys),
        (status = 404, description = "No registry at this address", body = ErrorBody)
    )
)]
pub async fn list_keys(
    State(state): State<AppState>,
    Path(registry): Path<String>,
) -> Result<Json<RegistryKeys>, ApiError> {
    let registry_address = parse_address(&registry)?;
    let chain = state.chain.read().await;
    let registry = chain.state().key_registry(registry_address)?;

    let keys = registry
        .keys()
        .into_iter()
        .map(|key| KeyInfo {
            key_id: key.key_id.clone(),
            modulus_bits: key.modulus_bits(),
            exponent: key.exponent,
            active: key.active,
            revision: key.revision,
        })
        .collect();

    Ok(Json(RegistryKeys {
        registry: registry_address,
        owner: registry.owner(),
        keys,
    }))
}
