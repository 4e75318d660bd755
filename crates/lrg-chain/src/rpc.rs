//! JSON-RPC backend.
//!
//! Transactions are sent with `eth_sendTransaction`, so the node signs for its
//! own unlocked accounts. ABIs come from the artifact store and are cached per
//! artifact name.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use ethers::abi::{Abi, Function, ParamType, Token};
use ethers::providers::{Http, Middleware, Provider, ProviderError};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TransactionReceipt, TransactionRequest, U64};
use lrg_core::contracts::ContractRef;
use lrg_ledger::ArtifactStore;

use crate::error::ChainError;
use crate::{ChainClient, LogEntry, TxReceipt};

pub struct RpcChain {
    provider: Provider<Http>,
    artifacts: ArtifactStore,
    abis: Mutex<HashMap<String, Arc<Abi>>>,
    confirmations: usize,
}

impl RpcChain {
    /// Connect to the node at `rpc_url`.
    ///
    /// No request is made here; an unreachable node surfaces on first use.
    ///
    /// # Errors
    ///
    /// `Rpc` if the URL does not parse.
    pub fn connect(
        rpc_url: &str,
        artifacts: ArtifactStore,
        confirmations: usize,
        poll_interval: Duration,
    ) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| ChainError::Rpc(format!("invalid RPC URL '{rpc_url}': {e}")))?
            .interval(poll_interval);
        Ok(Self {
            provider,
            artifacts,
            abis: Mutex::new(HashMap::new()),
            confirmations: confirmations.max(1),
        })
    }

    fn abi(&self, artifact: &str) -> Result<Arc<Abi>, ChainError> {
        let mut cache = self.abis.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(abi) = cache.get(artifact) {
            return Ok(Arc::clone(abi));
        }
        let abi = Arc::new(self.artifacts.load(artifact)?.abi()?);
        cache.insert(artifact.to_string(), Arc::clone(&abi));
        Ok(abi)
    }

    fn encode_call(
        &self,
        contract: &ContractRef,
        method: &str,
        args: &[Token],
    ) -> Result<Vec<u8>, ChainError> {
        let abi = self.abi(&contract.artifact)?;
        let function = select_function(&abi, &contract.artifact, method, args)?;
        function.encode_input(args).map_err(|e| ChainError::Abi {
            artifact: contract.artifact.clone(),
            method: method.to_string(),
            reason: e.to_string(),
        })
    }

    /// Send `tx` and wait for a successful receipt.
    async fn submit(
        &self,
        method: &str,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt, ChainError> {
        let pending = self
            .provider
            .send_transaction(tx, None)
            .await
            .map_err(|e| provider_error(method, &e))?;
        let tx_hash = *pending;
        tracing::debug!(method, ?tx_hash, "transaction sent");

        let receipt = pending
            .confirmations(self.confirmations)
            .await
            .map_err(|e| provider_error(method, &e))?
            .ok_or(ChainError::Dropped(tx_hash))?;

        if receipt.status != Some(U64::one()) {
            return Err(ChainError::reverted(
                method,
                format!("transaction {tx_hash:?} failed"),
            ));
        }
        Ok(receipt)
    }
}

impl ChainClient for RpcChain {
    async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.provider
            .get_accounts()
            .await
            .map_err(|e| provider_error("eth_accounts", &e))
    }

    async fn deploy(
        &self,
        from: Address,
        artifact: &str,
        args: Vec<Token>,
    ) -> Result<Address, ChainError> {
        let data = {
            let compiled = self.artifacts.load(artifact)?;
            let bytecode = compiled.bytecode()?.to_vec();
            let abi = compiled.abi()?;
            match abi.constructor() {
                Some(constructor) => {
                    constructor
                        .encode_input(bytecode, &args)
                        .map_err(|e| ChainError::Abi {
                            artifact: artifact.to_string(),
                            method: "constructor".to_string(),
                            reason: e.to_string(),
                        })?
                }
                None if args.is_empty() => bytecode,
                None => {
                    return Err(ChainError::Abi {
                        artifact: artifact.to_string(),
                        method: "constructor".to_string(),
                        reason: format!("no constructor, but {} arguments given", args.len()),
                    });
                }
            }
        };

        let tx = TransactionRequest::new().from(from).data(data);
        let receipt = self.submit("constructor", tx).await?;
        receipt
            .contract_address
            .ok_or_else(|| ChainError::NoContractAddress {
                artifact: artifact.to_string(),
                tx_hash: receipt.transaction_hash,
            })
    }

    async fn send(
        &self,
        from: Address,
        contract: &ContractRef,
        method: &str,
        args: Vec<Token>,
    ) -> Result<TxReceipt, ChainError> {
        let data = self.encode_call(contract, method, &args)?;
        let tx = TransactionRequest::new()
            .from(from)
            .to(contract.address)
            .data(data);
        let receipt = self.submit(method, tx).await?;

        Ok(TxReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map_or(0, |n| n.as_u64()),
            logs: receipt
                .logs
                .into_iter()
                .map(|log| LogEntry {
                    address: log.address,
                    topics: log.topics,
                    data: log.data,
                })
                .collect(),
        })
    }

    async fn call(
        &self,
        contract: &ContractRef,
        method: &str,
        args: Vec<Token>,
    ) -> Result<Vec<Token>, ChainError> {
        let data = self.encode_call(contract, method, &args)?;
        let tx: TypedTransaction = TransactionRequest::new()
            .to(contract.address)
            .data(data)
            .into();
        let output = self
            .provider
            .call(&tx, None)
            .await
            .map_err(|e| provider_error(method, &e))?;

        let abi = self.abi(&contract.artifact)?;
        let function = select_function(&abi, &contract.artifact, method, &args)?;
        function
            .decode_output(&output)
            .map_err(|e| ChainError::Decode {
                method: method.to_string(),
                reason: e.to_string(),
            })
    }
}

/// The overload of `method` whose parameters `args` fit.
fn select_function<'a>(
    abi: &'a Abi,
    artifact: &str,
    method: &str,
    args: &[Token],
) -> Result<&'a Function, ChainError> {
    let overloads = abi
        .functions_by_name(method)
        .map_err(|_| ChainError::UnknownMethod {
            artifact: artifact.to_string(),
            method: method.to_string(),
        })?;
    overloads
        .iter()
        .find(|function| {
            let params: Vec<ParamType> = function.inputs.iter().map(|p| p.kind.clone()).collect();
            Token::types_check(args, &params)
        })
        .ok_or_else(|| ChainError::Abi {
            artifact: artifact.to_string(),
            method: method.to_string(),
            reason: format!("no overload accepts the {} arguments given", args.len()),
        })
}

/// Node errors mentioning a revert become `Reverted`; everything else is `Rpc`.
fn provider_error(method: &str, error: &ProviderError) -> ChainError {
    let message = error.to_string();
    if message.contains("revert") {
        ChainError::reverted(method, message)
    } else {
        ChainError::Rpc(format!("{method}: {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_rejects_malformed_url() {
        let store = ArtifactStore::new("artifacts/contracts");
        let result = RpcChain::connect("not a url", store, 1, Duration::from_millis(10));
        assert!(matches!(result, Err(ChainError::Rpc(_))));
    }

    #[test]
    fn confirmations_never_drop_below_one() {
        let store = ArtifactStore::new("artifacts/contracts");
        let chain =
            RpcChain::connect("http://127.0.0.1:8545", store, 0, Duration::from_millis(10)).unwrap();
        assert_eq!(chain.confirmations, 1);
    }

    #[test]
    fn overloads_are_chosen_by_argument_types() {
        let abi = ethers::abi::parse_abi(&[
            "function queue(uint256 proposalId) returns (uint256)",
            "function queue(address[] targets, uint256[] values, bytes[] calldatas, bytes32 descriptionHash) returns (uint256)",
        ])
        .unwrap();

        let by_id = select_function(&abi, "LiteRideGovernor", "queue", &[Token::Uint(7.into())]).unwrap();
        assert_eq!(by_id.inputs.len(), 1);

        let actions = [
            Token::Array(vec![Token::Address(ethers::types::Address::zero())]),
            Token::Array(vec![Token::Uint(0.into())]),
            Token::Array(vec![Token::Bytes(vec![0x60])]),
            Token::FixedBytes(vec![0; 32]),
        ];
        let by_actions = select_function(&abi, "LiteRideGovernor", "queue", &actions).unwrap();
        assert_eq!(by_actions.inputs.len(), 4);

        let err = select_function(&abi, "LiteRideGovernor", "queue", &[Token::Bool(true)]).unwrap_err();
        assert!(matches!(err, ChainError::Abi { .. }));
        let err = select_function(&abi, "LiteRideGovernor", "execute", &[]).unwrap_err();
        assert!(matches!(err, ChainError::UnknownMethod { .. }));
    }

    #[test]
    fn revert_messages_are_classified() {
        let err = provider_error(
            "grantRole",
            &ProviderError::CustomError("execution reverted: AccessControl".to_string()),
        );
        assert!(err.is_revert());
        let err = provider_error("grantRole", &ProviderError::CustomError("timeout".to_string()));
        assert!(matches!(err, ChainError::Rpc(_)));
    }
}
