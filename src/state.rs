// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::chain::Chain;
use crate::config::NodeConfig;

/// Shared node state. Queries take the read lock; submissions take the
/// write lock, which serializes transactions.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<RwLock<Chain>>,
    pub config: Arc<NodeConfig>,
}

impl AppState {
    pub fn new(chain: Chain, config: NodeConfig) -> Self {
        Self {
            chain: Arc::new(RwLock::new(chain)),
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        let config = NodeConfig::default();
        let chain = Chain::new(config.chain_id, config.address_scheme)
            .with_genesis([(config.operator, config.genesis_balance)]);
        Self::new(chain, config)
    }
}
