//! `create-token`: deploy the utility token on its own.

use std::path::Path;

use lrg_chain::ChainClient;
use lrg_config::LrgConfig;
use lrg_core::contracts::checksum;
use lrg_core::enums::ContractKind;
use lrg_core::responses::TokenCreated;
use lrg_ledger::AddressBook;

use super::first_account;
use crate::deployer::ContractDeployer;
use crate::error::BootstrapError;

/// Deploy the utility token from the first account and overwrite the address
/// book with a single entry for it.
///
/// # Errors
///
/// A failed deployment or address-book write.
pub async fn create_token<C: ChainClient>(
    chain: &C,
    config: &LrgConfig,
    root: &Path,
) -> Result<TokenCreated, BootstrapError> {
    let deployer = first_account(chain).await?;
    let artifact = config.contracts.artifact(ContractKind::UtilityToken);
    let deployed = ContractDeployer::new(chain, deployer)
        .deploy(ContractKind::UtilityToken, artifact, vec![])
        .await?;

    let path = config.paths.address_book_in(root);
    let book: AddressBook = [(artifact.to_string(), deployed.address())]
        .into_iter()
        .collect();
    book.write(&path)?;

    Ok(TokenCreated {
        name: artifact.to_string(),
        address: checksum(deployed.address()),
        address_book: path.display().to_string(),
    })
}
