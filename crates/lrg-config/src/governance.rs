//! Governance constants handed to the timelock and governor.

use serde::{Deserialize, Serialize};

/// Minimum timelock delay in seconds.
const fn default_min_delay() -> u64 {
    1
}

/// Voting delay in blocks.
const fn default_voting_delay() -> u64 {
    1
}

/// Voting period in blocks.
const fn default_voting_period() -> u64 {
    20
}

fn default_anyone() -> String {
    String::from("0x0000000000000000000000000000000000000000")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GovernanceConfig {
    #[serde(default = "default_min_delay")]
    pub min_delay: u64,

    /// Votes required to create a proposal, in token base units.
    #[serde(default)]
    pub proposal_threshold: u64,

    #[serde(default = "default_voting_delay")]
    pub voting_delay: u64,

    #[serde(default = "default_voting_period")]
    pub voting_period: u64,

    /// Append `(voting_delay, voting_period, proposal_threshold)` to the
    /// governor constructor. Off when the governor hard-codes its settings.
    #[serde(default)]
    pub governor_takes_settings: bool,

    /// Executor grantee meaning "anyone may execute".
    #[serde(default = "default_anyone")]
    pub anyone: String,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            min_delay: default_min_delay(),
            proposal_threshold: 0,
            voting_delay: default_voting_delay(),
            voting_period: default_voting_period(),
            governor_takes_settings: false,
            anyone: default_anyone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GovernanceConfig::default();
        assert_eq!(config.min_delay, 1);
        assert_eq!(config.proposal_threshold, 0);
        assert_eq!(config.voting_delay, 1);
        assert_eq!(config.voting_period, 20);
        assert!(!config.governor_takes_settings);
        assert_eq!(config.anyone, "0x0000000000000000000000000000000000000000");
    }
}
