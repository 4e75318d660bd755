//! Response types printed by `lrg` commands.
//!
//! Addresses and amounts are pre-rendered strings (checksummed addresses,
//! decimal token amounts) so every output format shows the same values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::Phase;

/// One participant's share of the initial distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantAllocation {
    pub address: String,
    pub utility: String,
    pub vote: String,
    pub delegated: bool,
}

/// Amounts moved from the deployer to the timelock by the sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SweepSummary {
    pub utility: String,
    pub vote: String,
}

/// Response from `lrg deploy`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BootstrapReport {
    pub run: String,
    pub deployer: String,
    pub resumed: bool,
    pub dry_run: bool,
    /// Address-book key → checksummed address.
    pub contracts: BTreeMap<String, String>,
    pub participants: Vec<ParticipantAllocation>,
    pub swept: SweepSummary,
    pub phases: Vec<Phase>,
    pub address_book: String,
}

/// One row of `lrg balances`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountBalance {
    pub label: String,
    pub address: String,
    pub utility: String,
    /// `None` for contracts whose vote-token balance is not inspected.
    pub vote: Option<String>,
}

/// Response from `lrg balances`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceReport {
    pub balances: Vec<AccountBalance>,
    pub governor_functions: Vec<String>,
    pub timelock_functions: Vec<String>,
}

/// Response from `lrg create-token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenCreated {
    pub name: String,
    pub address: String,
    pub address_book: String,
}

/// Response from `lrg register-schema`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaRegistered {
    pub registry: String,
    pub schema: String,
    pub uid: String,
    pub tx_hash: String,
}

/// Response from `lrg queue`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProposalQueued {
    pub governor: String,
    pub description_hash: String,
    pub tx_hash: String,
}

/// One ballot cast by `lrg vote`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteCast {
    pub voter: String,
    pub support: u8,
    pub tx_hash: String,
}

/// Response from `lrg vote`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VotesCast {
    pub proposal_id: String,
    pub votes: Vec<VoteCast>,
}

/// Response from `lrg export-abis`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbiExported {
    pub path: String,
    pub contracts: Vec<String>,
}
