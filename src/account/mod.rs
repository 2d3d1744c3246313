// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT-controlled accounts: address derivation, the factory and validation.

pub mod address;
pub mod factory;
pub mod validation;

pub use address::{
    constructor_args, create2_address, default_account_code_hash, AddressScheme,
};
pub use factory::{AccountFactory, FactoryError};
pub use validation::{Account, ProviderLookup, Validated};
