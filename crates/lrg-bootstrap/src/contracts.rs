//! Typed reads against the governance contracts.
//!
//! The chain capability speaks raw ABI tokens; these helpers pin down the one
//! output each view is expected to return.

use ethers::abi::Token;
use ethers::types::{Address, H256, U256};
use lrg_chain::ChainClient;
use lrg_core::contracts::ContractRef;
use lrg_core::enums::TimelockRole;

use crate::error::BootstrapError;

fn single(method: &str, mut output: Vec<Token>) -> Result<Token, BootstrapError> {
    if output.len() == 1 {
        Ok(output.remove(0))
    } else {
        Err(BootstrapError::UnexpectedOutput {
            method: method.to_string(),
            reason: format!("expected one value, got {}", output.len()),
        })
    }
}

fn mismatch(method: &str, expected: &str, found: &Token) -> BootstrapError {
    BootstrapError::UnexpectedOutput {
        method: method.to_string(),
        reason: format!("expected {expected}, got {found:?}"),
    }
}

pub(crate) async fn call_uint<C: ChainClient>(
    chain: &C,
    contract: &ContractRef,
    method: &str,
    args: Vec<Token>,
) -> Result<U256, BootstrapError> {
    match single(method, chain.call(contract, method, args).await?)? {
        Token::Uint(value) => Ok(value),
        other => Err(mismatch(method, "uint256", &other)),
    }
}

pub(crate) async fn call_address<C: ChainClient>(
    chain: &C,
    contract: &ContractRef,
    method: &str,
    args: Vec<Token>,
) -> Result<Address, BootstrapError> {
    match single(method, chain.call(contract, method, args).await?)? {
        Token::Address(address) => Ok(address),
        other => Err(mismatch(method, "address", &other)),
    }
}

async fn call_bool<C: ChainClient>(
    chain: &C,
    contract: &ContractRef,
    method: &str,
    args: Vec<Token>,
) -> Result<bool, BootstrapError> {
    match single(method, chain.call(contract, method, args).await?)? {
        Token::Bool(value) => Ok(value),
        other => Err(mismatch(method, "bool", &other)),
    }
}

pub async fn balance_of<C: ChainClient>(
    chain: &C,
    token: &ContractRef,
    account: Address,
) -> Result<U256, BootstrapError> {
    call_uint(chain, token, "balanceOf", vec![Token::Address(account)]).await
}

/// Current delegate of `account` on an ERC-20Votes token.
pub async fn delegates<C: ChainClient>(
    chain: &C,
    token: &ContractRef,
    account: Address,
) -> Result<Address, BootstrapError> {
    call_address(chain, token, "delegates", vec![Token::Address(account)]).await
}

pub async fn owner<C: ChainClient>(
    chain: &C,
    contract: &ContractRef,
) -> Result<Address, BootstrapError> {
    call_address(chain, contract, "owner", vec![]).await
}

/// Role identifier as reported by the timelock itself.
pub async fn role_id<C: ChainClient>(
    chain: &C,
    timelock: &ContractRef,
    role: TimelockRole,
) -> Result<H256, BootstrapError> {
    let method = role.accessor();
    match single(method, chain.call(timelock, method, vec![]).await?)? {
        Token::FixedBytes(bytes) if bytes.len() == 32 => Ok(H256::from_slice(&bytes)),
        other => Err(mismatch(method, "bytes32", &other)),
    }
}

pub async fn has_role<C: ChainClient>(
    chain: &C,
    timelock: &ContractRef,
    role: H256,
    account: Address,
) -> Result<bool, BootstrapError> {
    call_bool(
        chain,
        timelock,
        "hasRole",
        vec![role_token(role), Token::Address(account)],
    )
    .await
}

pub(crate) fn role_token(role: H256) -> Token {
    Token::FixedBytes(role.as_bytes().to_vec())
}
