//! `balances`: inspect token balances after a bootstrap.

use std::path::Path;

use lrg_chain::ChainClient;
use lrg_config::LrgConfig;
use lrg_core::contracts::{ContractRef, checksum, format_token_amount};
use lrg_core::enums::ContractKind;
use lrg_core::responses::{AccountBalance, BalanceReport};
use lrg_ledger::{AddressBook, ArtifactStore};

use super::rider_and_driver;
use crate::contracts::balance_of;
use crate::error::BootstrapError;

/// Utility and vote balances of the rider and driver, utility balances of the
/// application and timelock, and the functions the governor and timelock
/// expose.
///
/// # Errors
///
/// Fewer than two node accounts, a missing address-book entry or artifact,
/// or a failed balance read.
pub async fn inspect_balances<C: ChainClient>(
    chain: &C,
    config: &LrgConfig,
    root: &Path,
) -> Result<BalanceReport, BootstrapError> {
    let accounts = chain.accounts().await?;
    let (rider, driver) = rider_and_driver(&accounts)?;

    let path = config.paths.address_book_in(root);
    let book = AddressBook::read(&path)?;
    let lookup = |kind: ContractKind| -> Result<ContractRef, BootstrapError> {
        let artifact = config.contracts.artifact(kind);
        Ok(ContractRef::new(artifact, book.resolve(&path, artifact)?))
    };
    let utility = lookup(ContractKind::UtilityToken)?;
    let vote = lookup(ContractKind::VoteToken)?;
    let application = lookup(ContractKind::Application)?;
    let timelock = lookup(ContractKind::Timelock)?;

    let mut balances = Vec::with_capacity(4);
    for (label, account) in [("rider", rider), ("driver", driver)] {
        balances.push(AccountBalance {
            label: label.to_string(),
            address: checksum(account),
            utility: format_token_amount(balance_of(chain, &utility, account).await?),
            vote: Some(format_token_amount(balance_of(chain, &vote, account).await?)),
        });
    }
    for (label, contract) in [("application", &application), ("timelock", &timelock)] {
        balances.push(AccountBalance {
            label: label.to_string(),
            address: checksum(contract.address),
            utility: format_token_amount(balance_of(chain, &utility, contract.address).await?),
            vote: None,
        });
    }

    let store = ArtifactStore::new(config.paths.artifacts_dir_in(root));
    Ok(BalanceReport {
        balances,
        governor_functions: store
            .load(config.contracts.artifact(ContractKind::Governor))?
            .function_names(),
        timelock_functions: store
            .load(config.contracts.artifact(ContractKind::Timelock))?
            .function_names(),
    })
}
