//! Initial token distribution and self-delegation.
//!
//! Every participant, in list order, receives the utility amount, then the
//! vote amount, then self-delegates. Delegation always follows the vote
//! transfer to the same participant. The first failure aborts the step.
//!
//! Transfers are skipped when the participant already holds exactly the
//! target amount and delegation is skipped when it is already in place, so
//! re-running the step after a partial failure does not double-pay.

use ethers::abi::Token;
use ethers::types::{Address, U256};
use lrg_chain::ChainClient;
use lrg_core::contracts::{ContractRef, checksum, format_token_amount};
use lrg_core::responses::ParticipantAllocation;

use crate::contracts::{balance_of, delegates};
use crate::error::BootstrapError;

/// Fixed per-participant amounts, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionAmounts {
    pub utility: U256,
    pub vote: U256,
}

/// Distribute both tokens from `deployer` to every participant and have each
/// participant delegate to itself.
///
/// # Errors
///
/// The first failed transfer or delegation, unchanged.
pub async fn distribute<C: ChainClient>(
    chain: &C,
    deployer: Address,
    participants: &[Address],
    utility_token: &ContractRef,
    vote_token: &ContractRef,
    amounts: DistributionAmounts,
) -> Result<Vec<ParticipantAllocation>, BootstrapError> {
    let mut allocations = Vec::with_capacity(participants.len());

    for &participant in participants {
        transfer_to_target(chain, deployer, utility_token, participant, amounts.utility).await?;
        transfer_to_target(chain, deployer, vote_token, participant, amounts.vote).await?;
        let delegated = self_delegate(chain, vote_token, participant).await?;

        tracing::debug!(participant = ?participant, "participant funded");
        allocations.push(ParticipantAllocation {
            address: checksum(participant),
            utility: format_token_amount(amounts.utility),
            vote: format_token_amount(amounts.vote),
            delegated,
        });
    }

    tracing::info!(participants = allocations.len(), "distribution complete");
    Ok(allocations)
}

async fn transfer_to_target<C: ChainClient>(
    chain: &C,
    from: Address,
    token: &ContractRef,
    to: Address,
    amount: U256,
) -> Result<(), BootstrapError> {
    if balance_of(chain, token, to).await? == amount {
        tracing::debug!(token = %token.artifact, to = ?to, "already funded, skipping transfer");
        return Ok(());
    }
    chain
        .send(
            from,
            token,
            "transfer",
            vec![Token::Address(to), Token::Uint(amount)],
        )
        .await?;
    Ok(())
}

/// Returns whether `delegates(participant) == participant` afterwards.
async fn self_delegate<C: ChainClient>(
    chain: &C,
    vote_token: &ContractRef,
    participant: Address,
) -> Result<bool, BootstrapError> {
    if delegates(chain, vote_token, participant).await? == participant {
        return Ok(true);
    }
    chain
        .send(
            participant,
            vote_token,
            "delegate",
            vec![Token::Address(participant)],
        )
        .await?;
    Ok(delegates(chain, vote_token, participant).await? == participant)
}
