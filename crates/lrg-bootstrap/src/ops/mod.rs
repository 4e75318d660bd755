//! Auxiliary operations run outside the bootstrap: each one reads
//! configuration and the address book, talks to the chain, and returns a
//! response for the CLI to render.

mod balances;
mod export;
mod proposal;
mod schema;
mod token;

pub use balances::inspect_balances;
pub use export::export_abis;
pub use proposal::{cast_votes, parse_proposal_id, queue_proposal};
pub use schema::register_schema;
pub use token::create_token;

use ethers::types::Address;
use lrg_chain::ChainClient;

use crate::error::BootstrapError;

/// The account transactions are sent from unless a role says otherwise.
pub(crate) async fn first_account<C: ChainClient>(chain: &C) -> Result<Address, BootstrapError> {
    chain
        .accounts()
        .await?
        .first()
        .copied()
        .ok_or_else(|| BootstrapError::Config("the node exposes no accounts".to_string()))
}

/// `(rider, driver)`: the last and second-to-last node accounts.
pub(crate) fn rider_and_driver(accounts: &[Address]) -> Result<(Address, Address), BootstrapError> {
    match accounts {
        [.., driver, rider] => Ok((*rider, *driver)),
        _ => Err(BootstrapError::Config(format!(
            "need at least two node accounts for rider and driver, found {}",
            accounts.len()
        ))),
    }
}
