// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, default values and network presets for the
//! devnet node. Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `127.0.0.1` |
//! | `PORT` | Server bind port | `3050` |
//! | `CHAIN_ID` | Chain id reported by the node | `270` |
//! | `OPERATOR_ADDRESS` | Development EOA funded at genesis | `0x3661...c049` |
//! | `GENESIS_BALANCE_WEI` | Genesis balance of the operator | `10^21` |
//! | `SEED_PROVIDERS` | Deploy the Google provider setup at startup | `true` |
//! | `DEV_FAUCET` | Enable `POST /v1/dev/fund` | `true` |
//! | `ADDRESS_SCHEME` | Default account address scheme (`evm` or `zksync`) | `evm` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::net::SocketAddr;

use alloy::primitives::{address, Address, U256};
use thiserror::Error;

use crate::account::AddressScheme;

/// Server bind address.
pub const HOST_ENV: &str = "HOST";

/// Server bind port.
pub const PORT_ENV: &str = "PORT";

/// Chain id reported in `/health` and used by clients.
pub const CHAIN_ID_ENV: &str = "CHAIN_ID";

/// Development EOA that receives the genesis balance and deploys the seeded
/// provider contracts.
pub const OPERATOR_ADDRESS_ENV: &str = "OPERATOR_ADDRESS";

/// Genesis balance of the operator, in wei (decimal or `0x` hex).
pub const GENESIS_BALANCE_WEI_ENV: &str = "GENESIS_BALANCE_WEI";

/// When `true`, the node deploys a provider directory, a "Google" key
/// registry with Google's signing keys and an account factory at startup.
pub const SEED_PROVIDERS_ENV: &str = "SEED_PROVIDERS";

/// When `true`, `POST /v1/dev/fund` credits arbitrary addresses.
///
/// # Security
/// Development only. Never enable on a node reachable by untrusted clients.
pub const DEV_FAUCET_ENV: &str = "DEV_FAUCET";

/// Default address scheme for factories created without an explicit one.
pub const ADDRESS_SCHEME_ENV: &str = "ADDRESS_SCHEME";

/// Logging format: `json` for structured logs, anything else for pretty.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3050;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Well-known rich wallet of the local zkSync node.
pub const DEFAULT_OPERATOR: Address = address!("0x36615Cf349d7F6344891B1e7CA7C72883F5dc049");

/// 1000 ether.
pub const DEFAULT_GENESIS_BALANCE_WEI: u128 = 1_000_000_000_000_000_000_000;

/// Network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Node endpoint URL
    pub rpc_url: &'static str,
}

/// Local zkSync node used by the deployment scripts.
pub const ZKSYNC_LOCAL: NetworkConfig = NetworkConfig {
    name: "zkSync Local",
    chain_id: 270,
    rpc_url: "http://127.0.0.1:3050",
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Devnet node settings.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    pub chain_id: u64,
    pub operator: Address,
    pub genesis_balance: U256,
    pub seed_providers: bool,
    pub dev_faucet: bool,
    pub address_scheme: AddressScheme,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            chain_id: ZKSYNC_LOCAL.chain_id,
            operator: DEFAULT_OPERATOR,
            genesis_balance: U256::from(DEFAULT_GENESIS_BALANCE_WEI),
            seed_providers: true,
            dev_faucet: true,
            address_scheme: AddressScheme::default(),
        }
    }
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?;
        let bind_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e: std::net::AddrParseError| invalid(HOST_ENV, e))?;

        let genesis_balance = match lookup(GENESIS_BALANCE_WEI_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<U256>()
                .map_err(|e| invalid(GENESIS_BALANCE_WEI_ENV, e))?,
            None => defaults.genesis_balance,
        };

        let address_scheme = match lookup(ADDRESS_SCHEME_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<AddressScheme>()
                .map_err(|e| invalid(ADDRESS_SCHEME_ENV, e))?,
            None => defaults.address_scheme,
        };

        Ok(Self {
            bind_addr,
            chain_id: parse_or(&lookup, CHAIN_ID_ENV, defaults.chain_id)?,
            operator: parse_or(&lookup, OPERATOR_ADDRESS_ENV, defaults.operator)?,
            genesis_balance,
            seed_providers: parse_bool(&lookup, SEED_PROVIDERS_ENV, defaults.seed_providers)?,
            dev_faucet: parse_bool(&lookup, DEV_FAUCET_ENV, defaults.dev_faucet)?,
            address_scheme,
        })
    }
}

fn invalid(name: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.to_string(),
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| invalid(name, e)),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(invalid(name, format!("expected a boolean, got '{v}'"))),
    }
}
