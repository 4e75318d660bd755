//! Proposal targeted by `lrg queue` and `lrg vote`.

use serde::{Deserialize, Serialize};

/// `castVote` support value for "for".
const fn default_support() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProposalConfig {
    /// Call targets, one per action.
    #[serde(default)]
    pub targets: Vec<String>,

    /// Wei sent with each action, as decimal strings.
    #[serde(default)]
    pub values: Vec<String>,

    /// ABI-encoded calldata for each action, hex.
    #[serde(default)]
    pub calldatas: Vec<String>,

    /// keccak256 of the proposal description.
    #[serde(default)]
    pub description_hash: String,

    /// Proposal id voted on by `lrg vote`.
    #[serde(default)]
    pub proposal_id: String,

    /// 0 = against, 1 = for, 2 = abstain.
    #[serde(default = "default_support")]
    pub support: u8,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            values: Vec::new(),
            calldatas: Vec::new(),
            description_hash: String::new(),
            proposal_id: String::new(),
            support: default_support(),
        }
    }
}

impl ProposalConfig {
    /// Whether enough is set to queue the proposal.
    pub fn can_queue(&self) -> bool {
        !self.targets.is_empty()
            && self.targets.len() == self.values.len()
            && self.targets.len() == self.calldatas.len()
            && !self.description_hash.is_empty()
    }

    /// Whether enough is set to vote on the proposal.
    pub fn can_vote(&self) -> bool {
        !self.proposal_id.is_empty() && self.support <= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_actionable() {
        let config = ProposalConfig::default();
        assert!(!config.can_queue());
        assert!(!config.can_vote());
        assert_eq!(config.support, 1);
    }

    #[test]
    fn mismatched_action_lists_cannot_queue() {
        let config = ProposalConfig {
            targets: vec!["0x9d4454B023096f34B160D6B654540c56A1F81688".into()],
            values: vec![],
            calldatas: vec!["0x60e4b226".into()],
            description_hash: "0xdcbd".into(),
            ..Default::default()
        };
        assert!(!config.can_queue());
    }

    #[test]
    fn out_of_range_support_cannot_vote() {
        let config = ProposalConfig {
            proposal_id: "42".into(),
            support: 3,
            ..Default::default()
        };
        assert!(!config.can_vote());
    }
}
