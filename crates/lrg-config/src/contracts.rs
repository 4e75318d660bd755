//! Build-artifact names and address-book keys.

use lrg_core::enums::ContractKind;
use serde::{Deserialize, Serialize};

fn default_utility_token() -> String {
    ContractKind::UtilityToken.default_artifact().to_string()
}

fn default_vote_token() -> String {
    ContractKind::VoteToken.default_artifact().to_string()
}

fn default_timelock() -> String {
    ContractKind::Timelock.default_artifact().to_string()
}

fn default_governor() -> String {
    ContractKind::Governor.default_artifact().to_string()
}

fn default_application() -> String {
    ContractKind::Application.default_artifact().to_string()
}

fn default_schema_registry() -> String {
    String::from("SchemaRegistry")
}

fn default_schema_registry_key() -> String {
    String::from("easSchemaRegistry")
}

fn default_eas_key() -> String {
    String::from("eas")
}

/// Artifact names double as address-book keys for the five bootstrap contracts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractsConfig {
    #[serde(default = "default_utility_token")]
    pub utility_token: String,

    #[serde(default = "default_vote_token")]
    pub vote_token: String,

    #[serde(default = "default_timelock")]
    pub timelock: String,

    #[serde(default = "default_governor")]
    pub governor: String,

    #[serde(default = "default_application")]
    pub application: String,

    /// Artifact describing the attestation schema registry.
    #[serde(default = "default_schema_registry")]
    pub schema_registry: String,

    /// Address-book key under which the schema registry is recorded.
    #[serde(default = "default_schema_registry_key")]
    pub schema_registry_key: String,

    /// Address-book key under which the attestation service is recorded.
    #[serde(default = "default_eas_key")]
    pub eas_key: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            utility_token: default_utility_token(),
            vote_token: default_vote_token(),
            timelock: default_timelock(),
            governor: default_governor(),
            application: default_application(),
            schema_registry: default_schema_registry(),
            schema_registry_key: default_schema_registry_key(),
            eas_key: default_eas_key(),
        }
    }
}

impl ContractsConfig {
    #[must_use]
    pub fn artifact(&self, kind: ContractKind) -> &str {
        match kind {
            ContractKind::UtilityToken => &self.utility_token,
            ContractKind::VoteToken => &self.vote_token,
            ContractKind::Timelock => &self.timelock,
            ContractKind::Governor => &self.governor,
            ContractKind::Application => &self.application,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_literide_artifacts() {
        let config = ContractsConfig::default();
        assert_eq!(config.artifact(ContractKind::UtilityToken), "LiteRideToken");
        assert_eq!(config.artifact(ContractKind::VoteToken), "LiteRideVoteToken");
        assert_eq!(config.artifact(ContractKind::Timelock), "LiteRideTimelock");
        assert_eq!(config.artifact(ContractKind::Governor), "LiteRideGovernor");
        assert_eq!(config.artifact(ContractKind::Application), "LiteRide");
        assert_eq!(config.schema_registry_key, "easSchemaRegistry");
    }
}
