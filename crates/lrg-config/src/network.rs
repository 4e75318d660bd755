//! JSON-RPC node configuration.

use serde::{Deserialize, Serialize};

fn default_rpc_url() -> String {
    String::from("http://127.0.0.1:8545")
}

/// Default confirmations awaited per transaction.
const fn default_confirmations() -> usize {
    1
}

/// Default receipt polling interval in milliseconds.
const fn default_poll_interval_ms() -> u64 {
    250
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Node endpoint. The node must expose unlocked signing accounts
    /// (`eth_accounts`); the first one is the deployer.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Blocks to wait after inclusion before a transaction counts as confirmed.
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            confirmations: default_confirmations(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl NetworkConfig {
    pub fn is_configured(&self) -> bool {
        !self.rpc_url.is_empty() && self.confirmations > 0
    }
}
