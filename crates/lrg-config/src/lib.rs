//! # lrg-config
//!
//! Layered configuration loading for the LiteRide governance bootstrap using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LITERIDE_*` prefix, `__` as separator)
//! 2. Project-level `.literide/config.toml`
//! 3. User-level `~/.config/literide/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LITERIDE_NETWORK__RPC_URL` -> `network.rpc_url`,
//! `LITERIDE_GOVERNANCE__MIN_DELAY` -> `governance.min_delay`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use lrg_config::LrgConfig;
//!
//! let config = LrgConfig::load_with_dotenv(Path::new(".")).expect("config");
//! println!("node: {}", config.network.rpc_url);
//! ```

mod contracts;
mod distribution;
mod error;
mod governance;
mod network;
mod paths;
mod proposal;
mod schema;

pub use contracts::ContractsConfig;
pub use distribution::DistributionConfig;
pub use error::ConfigError;
pub use governance::GovernanceConfig;
pub use network::NetworkConfig;
pub use paths::PathsConfig;
pub use proposal::ProposalConfig;
pub use schema::SchemaConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LrgConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub governance: GovernanceConfig,
    #[serde(default)]
    pub distribution: DistributionConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub proposal: ProposalConfig,
}

impl LrgConfig {
    /// Load configuration for the project rooted at `root` (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `<root>/.env` (falling back to the current directory's `.env`)
    /// before building the figment. A malformed project `.env` is an error.
    pub fn load_with_dotenv(root: &Path) -> Result<Self, ConfigError> {
        Self::load_dotenv(root)?;
        Self::load(root)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = root.join(".literide").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LITERIDE_").split("__"))
    }

    /// Reject values that would only fail later, mid-bootstrap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.network.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "network".to_string(),
            });
        }
        if self.governance.voting_period == 0 {
            return Err(ConfigError::InvalidValue {
                field: "governance.voting_period".to_string(),
                reason: "must be at least one block".to_string(),
            });
        }
        for (field, value) in [
            ("distribution.utility_amount", &self.distribution.utility_amount),
            ("distribution.vote_amount", &self.distribution.vote_amount),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("literide").join("config.toml"))
    }

    /// Silently does nothing if no `.env` is found.
    fn load_dotenv(root: &Path) -> Result<(), ConfigError> {
        let env_path = root.join(".env");
        if env_path.exists() {
            return dotenvy::from_path(&env_path)
                .map_err(|source| ConfigError::Dotenv { path: env_path, source });
        }
        let _ = dotenvy::dotenv();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = LrgConfig::default();
        assert!(config.network.is_configured());
        assert!(!config.proposal.can_queue());
        assert_eq!(config.governance.voting_period, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let figment = LrgConfig::figment(dir.path());
        let config: LrgConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.paths.address_book, "scripts/addresses.json");
        assert_eq!(config.contracts.governor, "LiteRideGovernor");
    }

    #[test]
    fn zero_voting_period_is_rejected() {
        let mut config = LrgConfig::default();
        config.governance.voting_period = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("governance.voting_period"));
    }
}
