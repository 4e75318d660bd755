//! Error types for lrg-chain.

use ethers::types::{Address, H256};
use thiserror::Error;

/// Errors from chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The node rejected or failed a request.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// A transaction or call reverted.
    #[error("{method} reverted: {reason}")]
    Reverted { method: String, reason: String },

    /// A sent transaction never produced a receipt.
    #[error("Transaction {0:?} was dropped before confirmation")]
    Dropped(H256),

    /// A deployment receipt carried no contract address.
    #[error("Deployment of {artifact} (tx {tx_hash:?}) produced no contract address")]
    NoContractAddress { artifact: String, tx_hash: H256 },

    /// Argument encoding failed against the ABI.
    #[error("ABI error for {artifact}.{method}: {reason}")]
    Abi {
        artifact: String,
        method: String,
        reason: String,
    },

    /// No contract is known at the address.
    #[error("No contract at {0:?}")]
    UnknownContract(Address),

    /// The contract's ABI has no such method.
    #[error("{artifact} has no method '{method}'")]
    UnknownMethod { artifact: String, method: String },

    /// The sender is not an account the chain can sign for.
    #[error("Account {0:?} is not managed by the node")]
    UnknownAccount(Address),

    /// Return data did not match the ABI outputs.
    #[error("Could not decode {method} output: {reason}")]
    Decode { method: String, reason: String },

    /// The contract's build artifact is missing or unusable.
    #[error(transparent)]
    Artifact(#[from] lrg_ledger::LedgerError),
}

impl ChainError {
    pub(crate) fn reverted(method: &str, reason: impl Into<String>) -> Self {
        Self::Reverted {
            method: method.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the failure is an on-chain revert rather than a transport or
    /// encoding problem.
    #[must_use]
    pub const fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}
