use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use lrg_chain::RpcChain;
use lrg_config::LrgConfig;
use lrg_ledger::ArtifactStore;

/// Resolved project root and configuration, shared by every command.
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: LrgConfig,
}

impl AppContext {
    pub const fn new(project_root: PathBuf, config: LrgConfig) -> Self {
        Self {
            project_root,
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.project_root
    }

    pub fn artifacts(&self) -> ArtifactStore {
        ArtifactStore::new(self.config.paths.artifacts_dir_in(&self.project_root))
    }

    /// Chain client for the configured node.
    pub fn connect(&self) -> anyhow::Result<RpcChain> {
        let network = &self.config.network;
        RpcChain::connect(
            &network.rpc_url,
            self.artifacts(),
            network.confirmations,
            Duration::from_millis(network.poll_interval_ms),
        )
        .with_context(|| format!("failed to connect to {}", network.rpc_url))
    }
}
