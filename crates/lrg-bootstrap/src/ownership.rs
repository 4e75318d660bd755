//! Ownership transfer and residual-balance sweep.

use ethers::abi::Token;
use ethers::types::{Address, U256};
use lrg_chain::ChainClient;
use lrg_core::contracts::ContractRef;

use crate::contracts::{balance_of, owner};
use crate::error::BootstrapError;

/// Make `new_owner` the owner of `contract`. Returns `false` when it already was.
///
/// # Errors
///
/// A failed `owner()` read or a reverted transfer.
pub async fn transfer_ownership<C: ChainClient>(
    chain: &C,
    from: Address,
    contract: &ContractRef,
    new_owner: Address,
) -> Result<bool, BootstrapError> {
    if owner(chain, contract).await? == new_owner {
        tracing::debug!(contract = %contract.artifact, "ownership already transferred");
        return Ok(false);
    }
    chain
        .send(
            from,
            contract,
            "transferOwnership",
            vec![Token::Address(new_owner)],
        )
        .await?;
    tracing::info!(contract = %contract.artifact, owner = ?new_owner, "ownership transferred");
    Ok(true)
}

/// Move `from`'s entire `token` balance, as read at call time, to `to`.
///
/// Returns the amount moved; a zero balance sends nothing.
///
/// # Errors
///
/// A failed balance read or a reverted transfer.
pub async fn sweep<C: ChainClient>(
    chain: &C,
    token: &ContractRef,
    from: Address,
    to: Address,
) -> Result<U256, BootstrapError> {
    let balance = balance_of(chain, token, from).await?;
    if balance.is_zero() {
        return Ok(balance);
    }
    chain
        .send(
            from,
            token,
            "transfer",
            vec![Token::Address(to), Token::Uint(balance)],
        )
        .await?;
    tracing::info!(token = %token.artifact, amount = %balance, "residual balance swept");
    Ok(balance)
}
