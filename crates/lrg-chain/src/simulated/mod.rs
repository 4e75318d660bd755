//! In-process simulated chain.
//!
//! Deterministic stand-in for a development node: accounts are fixed, contract
//! addresses follow `CREATE` address derivation from sender and nonce, and
//! every successful transaction mines one block. Artifacts are mapped to
//! behaviours through [`Blueprint`]s instead of bytecode.
//!
//! State lives behind a `std::sync::Mutex` that is never held across an
//! `.await`.

mod contracts;

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use ethers::abi::{Token, encode};
use ethers::types::{Address, Bytes, H256, U256};
use ethers::utils::{get_contract_address, keccak256};
use lrg_core::contracts::ContractRef;
use lrg_core::enums::ContractKind;
use lrg_ledger::LedgerError;

use crate::error::ChainError;
use crate::{ChainClient, LogEntry, TxReceipt};

use contracts::{
    Args, GovernorState, OwnableState, SchemaRegistryState, TimelockState, TokenState,
    address_topic, topic,
};

pub use contracts::schema_uid;

/// Initial supply minted to the deployer by each simulated token.
pub const DEFAULT_SUPPLY: u64 = 1_000_000;

/// Number of accounts a default simulated node exposes.
pub const DEFAULT_ACCOUNTS: usize = 10;

/// Behaviour a simulated deployment of an artifact gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blueprint {
    /// ERC-20 minting `supply` base units to the deployer. `votes` adds
    /// ERC-20Votes delegation.
    Token {
        name: String,
        symbol: String,
        supply: U256,
        votes: bool,
    },
    /// `TimelockController(minDelay, proposers, executors, admin)`.
    Timelock,
    /// Governor `(voteToken, utilityToken, timelock[, votingDelay, votingPeriod, proposalThreshold])`.
    Governor,
    /// Ownable application contract `([token])`, owned by its deployer.
    Application,
    /// EAS schema registry.
    SchemaRegistry,
}

impl Blueprint {
    #[must_use]
    pub fn for_kind(kind: ContractKind) -> Self {
        let supply = U256::from(DEFAULT_SUPPLY) * U256::exp10(18);
        match kind {
            ContractKind::UtilityToken => Self::Token {
                name: "LiteRideToken".to_string(),
                symbol: "LTR".to_string(),
                supply,
                votes: false,
            },
            ContractKind::VoteToken => Self::Token {
                name: "LiteRideVoteToken".to_string(),
                symbol: "LTRV".to_string(),
                supply,
                votes: true,
            },
            ContractKind::Timelock => Self::Timelock,
            ContractKind::Governor => Self::Governor,
            ContractKind::Application => Self::Application,
        }
    }
}

#[derive(Debug, Clone)]
enum SimContract {
    Token(TokenState),
    Timelock(TimelockState),
    Governor(GovernorState),
    Application(OwnableState),
    SchemaRegistry(SchemaRegistryState),
}

#[derive(Debug, Clone)]
struct Deployed {
    artifact: String,
    contract: SimContract,
}

#[derive(Debug, Default)]
struct SimState {
    accounts: Vec<Address>,
    nonces: HashMap<Address, u64>,
    block: u64,
    contracts: HashMap<Address, Deployed>,
    failures: HashSet<String>,
}

pub struct SimulatedChain {
    state: Mutex<SimState>,
    blueprints: HashMap<String, Blueprint>,
}

impl Default for SimulatedChain {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNTS)
    }
}

impl SimulatedChain {
    /// A chain with `accounts` funded signing accounts and blueprints for the
    /// default artifact names plus `SchemaRegistry`.
    #[must_use]
    pub fn new(accounts: usize) -> Self {
        let accounts = (0x1000_u64..)
            .take(accounts)
            .map(Address::from_low_u64_be)
            .collect();
        let mut blueprints: HashMap<String, Blueprint> = ContractKind::ALL
            .iter()
            .map(|kind| (kind.default_artifact().to_string(), Blueprint::for_kind(*kind)))
            .collect();
        blueprints.insert("SchemaRegistry".to_string(), Blueprint::SchemaRegistry);

        Self {
            state: Mutex::new(SimState {
                accounts,
                ..SimState::default()
            }),
            blueprints,
        }
    }

    /// Map `artifact` to `blueprint`, replacing any existing mapping.
    #[must_use]
    pub fn with_blueprint(mut self, artifact: impl Into<String>, blueprint: Blueprint) -> Self {
        self.blueprints.insert(artifact.into(), blueprint);
        self
    }

    /// Add signing accounts after the default ones, skipping any already present.
    #[must_use]
    pub fn with_accounts(self, extra: impl IntoIterator<Item = Address>) -> Self {
        {
            let mut state = self.lock();
            for account in extra {
                if !state.accounts.contains(&account) {
                    state.accounts.push(account);
                }
            }
        }
        self
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every later transaction calling `name` (a method name, or an
    /// artifact name for deployments) revert.
    pub fn fail_on(&self, name: impl Into<String>) {
        self.lock().failures.insert(name.into());
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Number of the latest mined block.
    #[must_use]
    pub fn block_number(&self) -> u64 {
        self.lock().block
    }

    /// Mine `blocks` empty blocks.
    pub fn mine(&self, blocks: u64) {
        self.lock().block += blocks;
    }

    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.lock().contracts.len()
    }
}

impl SimState {
    fn check_sender(&self, from: Address) -> Result<(), ChainError> {
        if self.accounts.contains(&from) {
            Ok(())
        } else {
            Err(ChainError::UnknownAccount(from))
        }
    }

    fn check_failure(&self, method: &str, name: &str) -> Result<(), ChainError> {
        if self.failures.contains(name) {
            Err(ChainError::reverted(method, "injected failure"))
        } else {
            Ok(())
        }
    }

    /// Consume `from`'s nonce and mine a block. Returns the transaction hash.
    fn commit(&mut self, from: Address) -> H256 {
        let nonce = self.nonces.entry(from).or_default();
        let tx_hash = H256::from(keccak256(encode(&[
            Token::Address(from),
            Token::Uint(U256::from(*nonce)),
        ])));
        *nonce += 1;
        self.block += 1;
        tx_hash
    }

    fn votes_of(&self, token: Address, account: Address) -> Result<U256, ChainError> {
        match self.contracts.get(&token).map(|d| &d.contract) {
            Some(SimContract::Token(t)) => Ok(t.votes_of(account)),
            _ => Err(ChainError::UnknownContract(token)),
        }
    }

    fn deploy(
        &mut self,
        from: Address,
        artifact: &str,
        blueprint: &Blueprint,
        values: &[Token],
    ) -> Result<Address, ChainError> {
        self.check_sender(from)?;
        self.check_failure("constructor", artifact)?;

        let nonce = self.nonces.get(&from).copied().unwrap_or_default();
        let address = get_contract_address(from, nonce);
        let args = Args::new(artifact, "constructor", values);

        let contract = match blueprint {
            Blueprint::Token {
                name,
                symbol,
                supply,
                votes,
            } => {
                args.expect_len(0)?;
                SimContract::Token(TokenState::mint(name, symbol, *supply, from, *votes))
            }
            Blueprint::Timelock => {
                args.expect_len(4)?;
                SimContract::Timelock(TimelockState::new(
                    address,
                    args.uint(0)?,
                    &args.addresses(1)?,
                    &args.addresses(2)?,
                    args.address(3)?,
                ))
            }
            Blueprint::Governor => {
                let (voting_delay, voting_period, proposal_threshold) = match values.len() {
                    3 => (1, 20, U256::zero()),
                    6 => (
                        small_uint(&args, 3)?,
                        small_uint(&args, 4)?,
                        args.uint(5)?,
                    ),
                    _ => {
                        return Err(ChainError::Abi {
                            artifact: artifact.to_string(),
                            method: "constructor".to_string(),
                            reason: format!("expected 3 or 6 arguments, got {}", values.len()),
                        });
                    }
                };
                SimContract::Governor(GovernorState {
                    vote_token: args.address(0)?,
                    utility_token: args.address(1)?,
                    timelock: args.address(2)?,
                    voting_delay,
                    voting_period,
                    proposal_threshold,
                    proposals: HashMap::new(),
                })
            }
            Blueprint::Application => {
                let token = if values.is_empty() {
                    Address::zero()
                } else {
                    args.expect_len(1)?;
                    args.address(0)?
                };
                SimContract::Application(OwnableState { owner: from, token })
            }
            Blueprint::SchemaRegistry => {
                args.expect_len(0)?;
                SimContract::SchemaRegistry(SchemaRegistryState::default())
            }
        };

        self.contracts.insert(
            address,
            Deployed {
                artifact: artifact.to_string(),
                contract,
            },
        );
        self.commit(from);
        Ok(address)
    }

    fn send(
        &mut self,
        from: Address,
        to: Address,
        method: &str,
        values: &[Token],
    ) -> Result<TxReceipt, ChainError> {
        self.check_sender(from)?;
        self.check_failure(method, method)?;

        let block = self.block + 1;
        let mut target = self
            .contracts
            .remove(&to)
            .ok_or(ChainError::UnknownContract(to))?;
        let result = self.dispatch(&mut target, to, from, method, values, block);
        self.contracts.insert(to, target);
        let logs = result?;

        let tx_hash = self.commit(from);
        Ok(TxReceipt {
            tx_hash,
            block_number: block,
            logs,
        })
    }

    fn dispatch(
        &mut self,
        target: &mut Deployed,
        this: Address,
        from: Address,
        method: &str,
        values: &[Token],
        block: u64,
    ) -> Result<Vec<LogEntry>, ChainError> {
        let args = Args::new(&target.artifact, method, values);
        match &mut target.contract {
            SimContract::Token(t) => t.execute(this, from, &args),
            SimContract::Timelock(t) => t.execute(this, from, &args),
            SimContract::Application(o) => o.execute(this, from, &args),
            SimContract::SchemaRegistry(r) => r.execute(this, from, &args),
            SimContract::Governor(g) => self.govern(g, this, from, &args, block),
        }
    }

    fn govern(
        &mut self,
        governor: &mut GovernorState,
        this: Address,
        from: Address,
        args: &Args<'_>,
        block: u64,
    ) -> Result<Vec<LogEntry>, ChainError> {
        match args.method {
            "propose" => {
                let weight = self.votes_of(governor.vote_token, from)?;
                let id = governor.propose(args, weight, block)?;
                Ok(vec![LogEntry {
                    address: this,
                    topics: vec![topic("ProposalCreated(uint256,address)"), address_topic(from)],
                    data: Bytes::from(encode(&[Token::Uint(id)])),
                }])
            }
            "castVote" => {
                let weight = self.votes_of(governor.vote_token, from)?;
                governor.cast_vote(args, from, weight, block)?;
                Ok(vec![LogEntry {
                    address: this,
                    topics: vec![topic("VoteCast(address,uint256,uint8,uint256)"), address_topic(from)],
                    data: Bytes::from(encode(&[args.values[0].clone(), Token::Uint(weight)])),
                }])
            }
            "queue" => {
                let id = governor.queueable(args, block)?;
                let operation =
                    H256::from(keccak256(encode(&[Token::Uint(id), Token::Address(this)])));
                match self.contracts.get_mut(&governor.timelock).map(|d| &mut d.contract) {
                    Some(SimContract::Timelock(timelock)) => {
                        timelock.schedule(args.method, this, operation)?;
                    }
                    _ => return Err(ChainError::UnknownContract(governor.timelock)),
                }
                governor.mark_queued(id);
                Ok(vec![LogEntry {
                    address: this,
                    topics: vec![topic("ProposalQueued(uint256,uint256)")],
                    data: Bytes::from(encode(&[Token::Uint(id)])),
                }])
            }
            _ => Err(ChainError::UnknownMethod {
                artifact: args.artifact.to_string(),
                method: args.method.to_string(),
            }),
        }
    }

    fn call(&self, to: Address, method: &str, values: &[Token]) -> Result<Vec<Token>, ChainError> {
        let deployed = self
            .contracts
            .get(&to)
            .ok_or(ChainError::UnknownContract(to))?;
        let args = Args::new(&deployed.artifact, method, values);
        match &deployed.contract {
            SimContract::Token(t) => t.view(&args),
            SimContract::Timelock(t) => t.view(&args),
            SimContract::Application(o) => o.view(&args),
            SimContract::SchemaRegistry(r) => r.view(&args),
            SimContract::Governor(g) => match method {
                "utilityToken" => Ok(vec![Token::Address(g.utility_token)]),
                _ => g.view(&args, self.block),
            },
        }
    }
}

fn small_uint(args: &Args<'_>, index: usize) -> Result<u64, ChainError> {
    let value = args.uint(index)?;
    if value > U256::from(u64::MAX) {
        return Err(ChainError::Abi {
            artifact: args.artifact.to_string(),
            method: args.method.to_string(),
            reason: format!("argument {index} does not fit in 64 bits"),
        });
    }
    Ok(value.low_u64())
}

impl ChainClient for SimulatedChain {
    async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        Ok(self.lock().accounts.clone())
    }

    async fn deploy(
        &self,
        from: Address,
        artifact: &str,
        args: Vec<Token>,
    ) -> Result<Address, ChainError> {
        let blueprint = self.blueprints.get(artifact).ok_or_else(|| {
            ChainError::Artifact(LedgerError::MissingArtifact {
                name: artifact.to_string(),
                path: format!("<simulated>/{artifact}").into(),
            })
        })?;
        let address = self.lock().deploy(from, artifact, blueprint, &args)?;
        tracing::debug!(artifact, ?address, "simulated deployment");
        Ok(address)
    }

    async fn send(
        &self,
        from: Address,
        contract: &ContractRef,
        method: &str,
        args: Vec<Token>,
    ) -> Result<TxReceipt, ChainError> {
        let receipt = self.lock().send(from, contract.address, method, &args)?;
        tracing::trace!(method, block = receipt.block_number, "simulated transaction");
        Ok(receipt)
    }

    async fn call(
        &self,
        contract: &ContractRef,
        method: &str,
        args: Vec<Token>,
    ) -> Result<Vec<Token>, ChainError> {
        self.lock().call(contract.address, method, &args)
    }
}
