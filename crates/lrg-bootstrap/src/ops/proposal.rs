//! `queue` and `vote`: act on the configured proposal.

use std::path::Path;

use ethers::abi::Token;
use ethers::types::{Bytes, U256};
use lrg_chain::ChainClient;
use lrg_config::LrgConfig;
use lrg_core::contracts::{ContractRef, checksum, parse_address, parse_h256};
use lrg_core::enums::ContractKind;
use lrg_core::responses::{ProposalQueued, VoteCast, VotesCast};
use lrg_ledger::AddressBook;

use super::{first_account, rider_and_driver};
use crate::error::BootstrapError;

fn governor(config: &LrgConfig, root: &Path) -> Result<ContractRef, BootstrapError> {
    let path = config.paths.address_book_in(root);
    let book = AddressBook::read(&path)?;
    let artifact = config.contracts.artifact(ContractKind::Governor);
    Ok(ContractRef::new(artifact, book.resolve(&path, artifact)?))
}

/// Parse a proposal id given in decimal or as `0x` hex.
///
/// # Errors
///
/// `Config` naming `proposal.proposal_id` on malformed input.
pub fn parse_proposal_id(value: &str) -> Result<U256, BootstrapError> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|e| e.to_string()),
        None => U256::from_dec_str(value).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| {
        BootstrapError::Config(format!("proposal.proposal_id '{value}' is not a number ({reason})"))
    })
}

/// Queue the configured proposal on the governor, sent from the first account.
///
/// # Errors
///
/// `Config` when the proposal is incomplete or malformed; a revert when the
/// governor refuses (for example, the proposal has not succeeded).
pub async fn queue_proposal<C: ChainClient>(
    chain: &C,
    config: &LrgConfig,
    root: &Path,
) -> Result<ProposalQueued, BootstrapError> {
    let proposal = &config.proposal;
    if !proposal.can_queue() {
        return Err(BootstrapError::Config(
            "proposal.targets, values and calldatas must be non-empty and of equal length, \
             and proposal.description_hash must be set"
                .to_string(),
        ));
    }

    let targets = proposal
        .targets
        .iter()
        .enumerate()
        .map(|(i, v)| -> Result<Token, BootstrapError> {
            Ok(Token::Address(parse_address(&format!("proposal.targets[{i}]"), v)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let values = proposal
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            U256::from_dec_str(v.trim()).map(Token::Uint).map_err(|e| {
                BootstrapError::Config(format!("proposal.values[{i}] '{v}' is not a number ({e})"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let calldatas = proposal
        .calldatas
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.trim()
                .parse::<Bytes>()
                .map(|b| Token::Bytes(b.to_vec()))
                .map_err(|e| {
                    BootstrapError::Config(format!("proposal.calldatas[{i}] is not hex ({e})"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let description_hash = parse_h256("proposal.description_hash", &proposal.description_hash)?;

    let governor = governor(config, root)?;
    let from = first_account(chain).await?;
    let receipt = chain
        .send(
            from,
            &governor,
            "queue",
            vec![
                Token::Array(targets),
                Token::Array(values),
                Token::Array(calldatas),
                Token::FixedBytes(description_hash.as_bytes().to_vec()),
            ],
        )
        .await?;
    tracing::info!(governor = ?governor.address, "proposal queued");

    Ok(ProposalQueued {
        governor: checksum(governor.address),
        description_hash: format!("{description_hash:#x}"),
        tx_hash: format!("{:#x}", receipt.tx_hash),
    })
}

/// Cast the configured vote from the rider, then the driver.
///
/// # Errors
///
/// `Config` for a missing or malformed proposal id or support value; the
/// first reverted ballot.
pub async fn cast_votes<C: ChainClient>(
    chain: &C,
    config: &LrgConfig,
    root: &Path,
) -> Result<VotesCast, BootstrapError> {
    let proposal = &config.proposal;
    if !proposal.can_vote() {
        return Err(BootstrapError::Config(
            "proposal.proposal_id must be set and proposal.support must be 0, 1 or 2".to_string(),
        ));
    }
    let id = parse_proposal_id(&proposal.proposal_id)?;

    let governor = governor(config, root)?;
    let accounts = chain.accounts().await?;
    let (rider, driver) = rider_and_driver(&accounts)?;

    let mut votes = Vec::with_capacity(2);
    for voter in [rider, driver] {
        let receipt = chain
            .send(
                voter,
                &governor,
                "castVote",
                vec![Token::Uint(id), Token::Uint(U256::from(proposal.support))],
            )
            .await?;
        tracing::info!(voter = ?voter, support = proposal.support, "vote cast");
        votes.push(VoteCast {
            voter: checksum(voter),
            support: proposal.support,
            tx_hash: format!("{:#x}", receipt.tx_hash),
        });
    }

    Ok(VotesCast {
        proposal_id: id.to_string(),
        votes,
    })
}
