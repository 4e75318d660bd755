//! # lrg-chain
//!
//! The chain-interaction capability the bootstrap runs against. Everything
//! above this crate sees a chain as four operations: list signing accounts,
//! deploy an artifact, send a state-changing call, and make a read-only call.
//!
//! Two implementations:
//!
//! - [`RpcChain`]: a JSON-RPC node with node-managed (unlocked) accounts,
//!   such as a local Hardhat or Anvil node.
//! - [`SimulatedChain`]: an in-process model of the governance contracts,
//!   used by tests and by `lrg deploy --dry-run`.

use std::future::Future;

use ethers::abi::Token;
use ethers::types::{Address, Bytes, H256};
use lrg_core::contracts::ContractRef;

pub mod error;
pub mod rpc;
pub mod simulated;

pub use error::ChainError;
pub use rpc::RpcChain;
pub use simulated::SimulatedChain;

/// One log emitted by a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub address: Address,
    pub topics: Vec<H256>,
    pub data: Bytes,
}

/// A confirmed, successful transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: H256,
    pub block_number: u64,
    pub logs: Vec<LogEntry>,
}

/// Deploy / send / call against a chain.
///
/// Every operation that changes state resolves only once the transaction is
/// confirmed; a revert or dropped transaction is an error, never a receipt.
pub trait ChainClient: Send + Sync {
    /// Accounts the chain can sign for, in node order.
    fn accounts(&self) -> impl Future<Output = Result<Vec<Address>, ChainError>> + Send;

    /// Deploy `artifact` from `from` with constructor `args`.
    fn deploy(
        &self,
        from: Address,
        artifact: &str,
        args: Vec<Token>,
    ) -> impl Future<Output = Result<Address, ChainError>> + Send;

    /// Send a transaction calling `method` on `contract`.
    fn send(
        &self,
        from: Address,
        contract: &ContractRef,
        method: &str,
        args: Vec<Token>,
    ) -> impl Future<Output = Result<TxReceipt, ChainError>> + Send;

    /// Read-only call of `method` on `contract`, returning decoded outputs.
    fn call(
        &self,
        contract: &ContractRef,
        method: &str,
        args: Vec<Token>,
    ) -> impl Future<Output = Result<Vec<Token>, ChainError>> + Send;
}
