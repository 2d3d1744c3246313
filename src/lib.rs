// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational JWT Accounts - Account Abstraction Controlled by OIDC Identity
//!
//! Smart accounts whose transactions are authorized by an identity
//! provider's RS256 ID token instead of a private key, and a devnet node
//! that hosts them.
//!
//! ## Modules
//!
//! - `auth` - RS256 verification, JWT parsing, custom auth payload codec
//! - `registry` - Provider key registries and the provider directory
//! - `account` - Address derivation, account factory, account validation
//! - `chain` - Devnet world state with atomic transaction execution
//! - `api` - HTTP API handlers (Axum)
//! - `client` - HTTP client for the devnet node
//! - `seed` - Google provider bootstrap

pub mod account;
pub mod api;
pub mod auth;
pub mod chain;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod seed;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;
