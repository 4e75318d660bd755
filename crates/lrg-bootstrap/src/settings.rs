//! Bootstrap settings derived from configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ethers::types::{Address, U256};
use lrg_config::LrgConfig;
use lrg_core::contracts::{parse_address, parse_token_amount};
use lrg_core::enums::ContractKind;

use crate::distribution::DistributionAmounts;
use crate::error::BootstrapError;

/// Everything the orchestrator needs, parsed and validated up front so that a
/// bad value fails before the first transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSettings {
    pub artifacts: BTreeMap<ContractKind, String>,
    pub min_delay: U256,
    pub voting_delay: U256,
    pub voting_period: U256,
    pub proposal_threshold: U256,
    /// Pass the three voting settings to the governor constructor.
    pub governor_takes_settings: bool,
    /// Executor grantee meaning "anyone may execute".
    pub anyone: Address,
    pub amounts: DistributionAmounts,
    /// `None` distributes to every node account.
    pub participants: Option<Vec<Address>>,
    pub address_book: PathBuf,
}

impl BootstrapSettings {
    /// # Errors
    ///
    /// `Config` naming the offending field when an address or amount does
    /// not parse.
    pub fn from_config(config: &LrgConfig, root: &Path) -> Result<Self, BootstrapError> {
        let governance = &config.governance;
        let distribution = &config.distribution;

        let participants = if distribution.uses_node_accounts() {
            None
        } else {
            Some(
                distribution
                    .participants
                    .iter()
                    .enumerate()
                    .map(|(i, value)| {
                        parse_address(&format!("distribution.participants[{i}]"), value)
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };

        Ok(Self {
            artifacts: ContractKind::ALL
                .iter()
                .map(|kind| (*kind, config.contracts.artifact(*kind).to_string()))
                .collect(),
            min_delay: U256::from(governance.min_delay),
            voting_delay: U256::from(governance.voting_delay),
            voting_period: U256::from(governance.voting_period),
            proposal_threshold: U256::from(governance.proposal_threshold),
            governor_takes_settings: governance.governor_takes_settings,
            anyone: parse_address("governance.anyone", &governance.anyone)?,
            amounts: DistributionAmounts {
                utility: parse_token_amount(
                    "distribution.utility_amount",
                    &distribution.utility_amount,
                )?,
                vote: parse_token_amount("distribution.vote_amount", &distribution.vote_amount)?,
            },
            participants,
            address_book: config.paths.address_book_in(root),
        })
    }

    /// Artifact name configured for `kind`.
    #[must_use]
    pub fn artifact(&self, kind: ContractKind) -> &str {
        self.artifacts
            .get(&kind)
            .map_or_else(|| kind.default_artifact(), String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_parse() {
        let settings = BootstrapSettings::from_config(&LrgConfig::default(), Path::new("/p")).unwrap();
        assert_eq!(settings.min_delay, U256::one());
        assert_eq!(settings.voting_period, U256::from(20));
        assert_eq!(settings.anyone, Address::zero());
        assert_eq!(settings.amounts.utility, U256::from(10) * U256::exp10(18));
        assert_eq!(settings.amounts.vote, U256::exp10(18));
        assert!(settings.participants.is_none());
        assert_eq!(settings.artifact(ContractKind::Application), "LiteRide");
        assert_eq!(settings.address_book, PathBuf::from("/p/scripts/addresses.json"));
    }

    #[test]
    fn bad_participant_names_its_index() {
        let mut config = LrgConfig::default();
        config.distribution.participants = vec![
            "0x0000000000000000000000000000000000000001".into(),
            "rider".into(),
        ];
        let err = BootstrapSettings::from_config(&config, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("distribution.participants[1]"));
    }

    #[test]
    fn artifact_overrides_are_honoured() {
        let mut config = LrgConfig::default();
        config.contracts.governor = "RideDao".into();
        let settings = BootstrapSettings::from_config(&config, Path::new(".")).unwrap();
        assert_eq!(settings.artifact(ContractKind::Governor), "RideDao");
    }
}
