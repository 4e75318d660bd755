//! Timelock permission hand-off.
//!
//! Order is fixed: proposer to the governor, executor to the open-execution
//! sentinel, then the deployer's admin role is revoked. Nothing here ever
//! grants the admin role, so once the revoke lands the deployer cannot undo
//! any of it, and a second hand-off is refused before anything is sent.

use ethers::abi::Token;
use ethers::types::{Address, H256};
use lrg_chain::ChainClient;
use lrg_core::contracts::{ContractRef, checksum};
use lrg_core::enums::TimelockRole;

use crate::contracts::{has_role, role_id, role_token};
use crate::error::BootstrapError;

/// Which grants this call actually sent. The admin revoke is always sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandOffOutcome {
    pub proposer_granted: bool,
    pub executor_granted: bool,
}

/// Hand timelock control from `deployer` to `governor`.
///
/// # Errors
///
/// `AdminRevoked` when the deployer no longer holds the admin role, which
/// means the hand-off already happened. Otherwise the first failed grant or
/// revoke.
pub async fn hand_off<C: ChainClient>(
    chain: &C,
    deployer: Address,
    timelock: &ContractRef,
    governor: Address,
    anyone: Address,
) -> Result<HandOffOutcome, BootstrapError> {
    let proposer = role_id(chain, timelock, TimelockRole::Proposer).await?;
    let executor = role_id(chain, timelock, TimelockRole::Executor).await?;
    let admin = role_id(chain, timelock, TimelockRole::TimelockAdmin).await?;

    if !has_role(chain, timelock, admin, deployer).await? {
        return Err(BootstrapError::AdminRevoked {
            deployer: checksum(deployer),
            timelock: checksum(timelock.address),
        });
    }

    let proposer_granted = grant(chain, deployer, timelock, proposer, governor).await?;
    let executor_granted = grant(chain, deployer, timelock, executor, anyone).await?;

    chain
        .send(
            deployer,
            timelock,
            "revokeRole",
            vec![role_token(admin), Token::Address(deployer)],
        )
        .await?;
    tracing::info!(deployer = ?deployer, "timelock admin revoked from deployer");

    Ok(HandOffOutcome {
        proposer_granted,
        executor_granted,
    })
}

async fn grant<C: ChainClient>(
    chain: &C,
    deployer: Address,
    timelock: &ContractRef,
    role: H256,
    account: Address,
) -> Result<bool, BootstrapError> {
    if has_role(chain, timelock, role, account).await? {
        tracing::debug!(role = ?role, account = ?account, "role already held");
        return Ok(false);
    }
    chain
        .send(
            deployer,
            timelock,
            "grantRole",
            vec![role_token(role), Token::Address(account)],
        )
        .await?;
    tracing::info!(role = ?role, account = ?account, "timelock role granted");
    Ok(true)
}
