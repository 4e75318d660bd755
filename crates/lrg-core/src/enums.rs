//! Contract kinds, timelock roles, bootstrap phases, and journal events.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `Phase` is a strict total order: every phase has exactly one successor and
//! `can_transition_to()` enforces it at the application layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ContractKind
// ---------------------------------------------------------------------------

/// Logical role of a contract in the governance stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    UtilityToken,
    VoteToken,
    Timelock,
    Governor,
    Application,
}

impl ContractKind {
    /// Every kind, in deployment order.
    pub const ALL: [Self; 5] = [
        Self::VoteToken,
        Self::UtilityToken,
        Self::Timelock,
        Self::Governor,
        Self::Application,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UtilityToken => "utility_token",
            Self::VoteToken => "vote_token",
            Self::Timelock => "timelock",
            Self::Governor => "governor",
            Self::Application => "application",
        }
    }

    /// Build-artifact name used when no override is configured.
    #[must_use]
    pub const fn default_artifact(self) -> &'static str {
        match self {
            Self::UtilityToken => "LiteRideToken",
            Self::VoteToken => "LiteRideVoteToken",
            Self::Timelock => "LiteRideTimelock",
            Self::Governor => "LiteRideGovernor",
            Self::Application => "LiteRide",
        }
    }

    /// Phase in which this kind is deployed.
    #[must_use]
    pub const fn deploy_phase(self) -> Phase {
        match self {
            Self::UtilityToken | Self::VoteToken => Phase::DeployTokens,
            Self::Timelock | Self::Governor | Self::Application => Phase::DeployGovernance,
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TimelockRole
// ---------------------------------------------------------------------------

/// Access-control roles on the timelock that the hand-off touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelockRole {
    Proposer,
    Executor,
    TimelockAdmin,
}

impl TimelockRole {
    /// Name of the view function that returns this role's identifier.
    #[must_use]
    pub const fn accessor(self) -> &'static str {
        match self {
            Self::Proposer => "PROPOSER_ROLE",
            Self::Executor => "EXECUTOR_ROLE",
            Self::TimelockAdmin => "TIMELOCK_ADMIN_ROLE",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposer => "proposer",
            Self::Executor => "executor",
            Self::TimelockAdmin => "timelock_admin",
        }
    }
}

impl fmt::Display for TimelockRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Phase of a bootstrap run.
///
/// ```text
/// deploy_tokens → distribute → deploy_governance → wire_ownership
///   → sweep_residual_funds → grant_and_revoke_roles → persist_address_book → done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    DeployTokens,
    Distribute,
    DeployGovernance,
    WireOwnership,
    SweepResidualFunds,
    GrantAndRevokeRoles,
    PersistAddressBook,
    Done,
}

impl Phase {
    /// Every phase that performs work, in execution order.
    pub const SEQUENCE: [Self; 7] = [
        Self::DeployTokens,
        Self::Distribute,
        Self::DeployGovernance,
        Self::WireOwnership,
        Self::SweepResidualFunds,
        Self::GrantAndRevokeRoles,
        Self::PersistAddressBook,
    ];

    /// The single phase that may follow this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::DeployTokens => Some(Self::Distribute),
            Self::Distribute => Some(Self::DeployGovernance),
            Self::DeployGovernance => Some(Self::WireOwnership),
            Self::WireOwnership => Some(Self::SweepResidualFunds),
            Self::SweepResidualFunds => Some(Self::GrantAndRevokeRoles),
            Self::GrantAndRevokeRoles => Some(Self::PersistAddressBook),
            Self::PersistAddressBook => Some(Self::Done),
            Self::Done => None,
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.next() == Some(next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeployTokens => "deploy_tokens",
            Self::Distribute => "distribute",
            Self::DeployGovernance => "deploy_governance",
            Self::WireOwnership => "wire_ownership",
            Self::SweepResidualFunds => "sweep_residual_funds",
            Self::GrantAndRevokeRoles => "grant_and_revoke_roles",
            Self::PersistAddressBook => "persist_address_book",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// JournalEvent
// ---------------------------------------------------------------------------

/// What a journal record reports about its phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEvent {
    Started,
    ContractDeployed,
    Completed,
    Failed,
}

impl JournalEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::ContractDeployed => "contract_deployed",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JournalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn phase_sequence_is_a_chain_ending_in_done() {
        let mut phase = Phase::SEQUENCE[0];
        let mut visited = vec![phase];
        while let Some(next) = phase.next() {
            assert!(phase.can_transition_to(next));
            visited.push(next);
            phase = next;
        }
        assert_eq!(phase, Phase::Done);
        assert_eq!(&visited[..7], &Phase::SEQUENCE[..]);
    }

    #[rstest]
    #[case(Phase::DeployTokens, Phase::DeployGovernance)]
    #[case(Phase::Distribute, Phase::DeployTokens)]
    #[case(Phase::GrantAndRevokeRoles, Phase::WireOwnership)]
    #[case(Phase::PersistAddressBook, Phase::GrantAndRevokeRoles)]
    #[case(Phase::Done, Phase::DeployTokens)]
    fn phase_rejects_skips_and_loops(#[case] from: Phase, #[case] to: Phase) {
        assert!(!from.can_transition_to(to));
    }

    #[test]
    fn roles_are_revoked_only_after_ownership_is_wired() {
        assert!(Phase::WireOwnership < Phase::GrantAndRevokeRoles);
        assert!(Phase::GrantAndRevokeRoles < Phase::PersistAddressBook);
    }

    #[test]
    fn deploy_order_puts_tokens_before_governance() {
        let phases: Vec<Phase> = ContractKind::ALL.iter().map(|k| k.deploy_phase()).collect();
        let mut sorted = phases.clone();
        sorted.sort();
        assert_eq!(phases, sorted);
    }

    #[test]
    fn role_accessors_match_timelock_controller() {
        assert_eq!(TimelockRole::Proposer.accessor(), "PROPOSER_ROLE");
        assert_eq!(TimelockRole::Executor.accessor(), "EXECUTOR_ROLE");
        assert_eq!(TimelockRole::TimelockAdmin.accessor(), "TIMELOCK_ADMIN_ROLE");
    }

    #[test]
    fn phase_serializes_snake_case() {
        let json = serde_json::to_string(&Phase::SweepResidualFunds).unwrap();
        assert_eq!(json, "\"sweep_residual_funds\"");
        assert_eq!(Phase::SweepResidualFunds.to_string(), "sweep_residual_funds");
    }
}
