//! Initial token distribution.

use serde::{Deserialize, Serialize};

fn default_utility_amount() -> String {
    String::from("10")
}

fn default_vote_amount() -> String {
    String::from("1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DistributionConfig {
    /// Utility tokens per participant, in whole tokens (18 decimals).
    #[serde(default = "default_utility_amount")]
    pub utility_amount: String,

    /// Vote tokens per participant, in whole tokens (18 decimals).
    #[serde(default = "default_vote_amount")]
    pub vote_amount: String,

    /// Explicit participant addresses. Empty means every node account.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            utility_amount: default_utility_amount(),
            vote_amount: default_vote_amount(),
            participants: Vec::new(),
        }
    }
}

impl DistributionConfig {
    /// Whether participants come from the node's account list.
    pub fn uses_node_accounts(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_ten_and_one() {
        let config = DistributionConfig::default();
        assert_eq!(config.utility_amount, "10");
        assert_eq!(config.vote_amount, "1");
        assert!(config.uses_node_accounts());
    }
}
