//! Contract models for the simulated chain.
//!
//! Each model implements the subset of the OpenZeppelin / EAS surface the
//! bootstrap and its auxiliary commands use, with the same revert conditions.
//! Cross-contract reads (governor → vote token, governor → timelock) are
//! resolved by the caller in `super`.

use std::collections::{HashMap, HashSet};

use ethers::abi::{Token, encode};
use ethers::types::{Address, Bytes, H256, U256};
use ethers::utils::keccak256;

use crate::LogEntry;
use crate::error::ChainError;

/// Typed access to call arguments.
pub(crate) struct Args<'a> {
    pub artifact: &'a str,
    pub method: &'a str,
    pub values: &'a [Token],
}

impl<'a> Args<'a> {
    pub(crate) const fn new(artifact: &'a str, method: &'a str, values: &'a [Token]) -> Self {
        Self {
            artifact,
            method,
            values,
        }
    }

    fn invalid(&self, reason: String) -> ChainError {
        ChainError::Abi {
            artifact: self.artifact.to_string(),
            method: self.method.to_string(),
            reason,
        }
    }

    pub(crate) fn expect_len(&self, expected: usize) -> Result<(), ChainError> {
        if self.values.len() == expected {
            Ok(())
        } else {
            Err(self.invalid(format!(
                "expected {expected} arguments, got {}",
                self.values.len()
            )))
        }
    }

    fn get(&self, index: usize) -> Result<&'a Token, ChainError> {
        self.values
            .get(index)
            .ok_or_else(|| self.invalid(format!("missing argument {index}")))
    }

    fn mismatch(&self, index: usize, expected: &str, found: &Token) -> ChainError {
        self.invalid(format!("argument {index}: expected {expected}, got {found:?}"))
    }

    pub(crate) fn address(&self, index: usize) -> Result<Address, ChainError> {
        match self.get(index)? {
            Token::Address(a) => Ok(*a),
            other => Err(self.mismatch(index, "address", other)),
        }
    }

    pub(crate) fn uint(&self, index: usize) -> Result<U256, ChainError> {
        match self.get(index)? {
            Token::Uint(v) => Ok(*v),
            other => Err(self.mismatch(index, "uint256", other)),
        }
    }

    pub(crate) fn bytes32(&self, index: usize) -> Result<H256, ChainError> {
        match self.get(index)? {
            Token::FixedBytes(b) if b.len() == 32 => Ok(H256::from_slice(b)),
            other => Err(self.mismatch(index, "bytes32", other)),
        }
    }

    pub(crate) fn boolean(&self, index: usize) -> Result<bool, ChainError> {
        match self.get(index)? {
            Token::Bool(b) => Ok(*b),
            other => Err(self.mismatch(index, "bool", other)),
        }
    }

    pub(crate) fn string(&self, index: usize) -> Result<String, ChainError> {
        match self.get(index)? {
            Token::String(s) => Ok(s.clone()),
            other => Err(self.mismatch(index, "string", other)),
        }
    }

    pub(crate) fn array(&self, index: usize) -> Result<&'a [Token], ChainError> {
        match self.get(index)? {
            Token::Array(items) => Ok(items),
            other => Err(self.mismatch(index, "array", other)),
        }
    }

    pub(crate) fn addresses(&self, index: usize) -> Result<Vec<Address>, ChainError> {
        self.array(index)?
            .iter()
            .map(|t| match t {
                Token::Address(a) => Ok(*a),
                other => Err(self.mismatch(index, "address[]", other)),
            })
            .collect()
    }
}

/// `keccak256(signature)` as a log topic.
pub(crate) fn topic(signature: &str) -> H256 {
    H256::from(keccak256(signature.as_bytes()))
}

pub(crate) fn address_topic(address: Address) -> H256 {
    H256::from(address)
}

fn revert(method: &str, reason: impl Into<String>) -> ChainError {
    ChainError::reverted(method, reason)
}

fn uint(value: U256) -> Token {
    Token::Uint(value)
}

fn bytes32(value: H256) -> Token {
    Token::FixedBytes(value.as_bytes().to_vec())
}

// ---------------------------------------------------------------------------
// ERC-20 / ERC-20Votes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub(crate) struct TokenState {
    pub name: String,
    pub symbol: String,
    pub total_supply: U256,
    pub balances: HashMap<Address, U256>,
    pub votes_enabled: bool,
    pub delegates: HashMap<Address, Address>,
    pub votes: HashMap<Address, U256>,
}

impl TokenState {
    pub(crate) fn mint(
        name: &str,
        symbol: &str,
        supply: U256,
        holder: Address,
        votes_enabled: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            total_supply: supply,
            balances: HashMap::from([(holder, supply)]),
            votes_enabled,
            delegates: HashMap::new(),
            votes: HashMap::new(),
        }
    }

    pub(crate) fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    pub(crate) fn votes_of(&self, account: Address) -> U256 {
        self.votes.get(&account).copied().unwrap_or_default()
    }

    fn delegate_of(&self, account: Address) -> Address {
        self.delegates.get(&account).copied().unwrap_or_default()
    }

    fn move_votes(&mut self, src: Address, dst: Address, amount: U256) {
        if src == dst || amount.is_zero() {
            return;
        }
        if !src.is_zero() {
            let entry = self.votes.entry(src).or_default();
            *entry = entry.saturating_sub(amount);
        }
        if !dst.is_zero() {
            *self.votes.entry(dst).or_default() += amount;
        }
    }

    fn require_votes(&self, artifact: &str, method: &str) -> Result<(), ChainError> {
        if self.votes_enabled {
            Ok(())
        } else {
            Err(ChainError::UnknownMethod {
                artifact: artifact.to_string(),
                method: method.to_string(),
            })
        }
    }

    pub(crate) fn view(&self, args: &Args<'_>) -> Result<Vec<Token>, ChainError> {
        match args.method {
            "name" => Ok(vec![Token::String(self.name.clone())]),
            "symbol" => Ok(vec![Token::String(self.symbol.clone())]),
            "decimals" => Ok(vec![uint(U256::from(18))]),
            "totalSupply" => Ok(vec![uint(self.total_supply)]),
            "balanceOf" => Ok(vec![uint(self.balance_of(args.address(0)?))]),
            "delegates" => {
                self.require_votes(args.artifact, args.method)?;
                Ok(vec![Token::Address(self.delegate_of(args.address(0)?))])
            }
            "getVotes" => {
                self.require_votes(args.artifact, args.method)?;
                Ok(vec![uint(self.votes_of(args.address(0)?))])
            }
            _ => Err(ChainError::UnknownMethod {
                artifact: args.artifact.to_string(),
                method: args.method.to_string(),
            }),
        }
    }

    pub(crate) fn execute(
        &mut self,
        this: Address,
        from: Address,
        args: &Args<'_>,
    ) -> Result<Vec<LogEntry>, ChainError> {
        match args.method {
            "transfer" => {
                args.expect_len(2)?;
                let to = args.address(0)?;
                let amount = args.uint(1)?;
                if to.is_zero() {
                    return Err(revert(args.method, "ERC20: transfer to the zero address"));
                }
                let balance = self.balance_of(from);
                if balance < amount {
                    return Err(revert(
                        args.method,
                        "ERC20: transfer amount exceeds balance",
                    ));
                }
                self.balances.insert(from, balance - amount);
                *self.balances.entry(to).or_default() += amount;
                if self.votes_enabled {
                    let (src, dst) = (self.delegate_of(from), self.delegate_of(to));
                    self.move_votes(src, dst, amount);
                }
                Ok(vec![LogEntry {
                    address: this,
                    topics: vec![
                        topic("Transfer(address,address,uint256)"),
                        address_topic(from),
                        address_topic(to),
                    ],
                    data: Bytes::from(encode(&[uint(amount)])),
                }])
            }
            "delegate" => {
                self.require_votes(args.artifact, args.method)?;
                args.expect_len(1)?;
                let delegatee = args.address(0)?;
                let previous = self.delegate_of(from);
                self.delegates.insert(from, delegatee);
                let weight = self.balance_of(from);
                self.move_votes(previous, delegatee, weight);
                Ok(vec![LogEntry {
                    address: this,
                    topics: vec![
                        topic("DelegateChanged(address,address,address)"),
                        address_topic(from),
                        address_topic(previous),
                        address_topic(delegatee),
                    ],
                    data: Bytes::new(),
                }])
            }
            _ => Err(ChainError::UnknownMethod {
                artifact: args.artifact.to_string(),
                method: args.method.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// TimelockController
// ---------------------------------------------------------------------------

pub(crate) const ROLE_NAMES: [&str; 4] = [
    "TIMELOCK_ADMIN_ROLE",
    "PROPOSER_ROLE",
    "EXECUTOR_ROLE",
    "CANCELLER_ROLE",
];

pub(crate) fn role_id(name: &str) -> H256 {
    H256::from(keccak256(name.as_bytes()))
}

#[derive(Debug, Clone)]
pub(crate) struct TimelockState {
    pub min_delay: U256,
    pub roles: HashMap<H256, HashSet<Address>>,
    pub scheduled: HashSet<H256>,
}

impl TimelockState {
    /// Mirrors the `TimelockController` constructor: the timelock administers
    /// itself, `admin` (if non-zero) is an extra admin, proposers also become
    /// cancellers.
    pub(crate) fn new(
        this: Address,
        min_delay: U256,
        proposers: &[Address],
        executors: &[Address],
        admin: Address,
    ) -> Self {
        let mut state = Self {
            min_delay,
            roles: HashMap::new(),
            scheduled: HashSet::new(),
        };
        let admin_role = role_id("TIMELOCK_ADMIN_ROLE");
        state.grant(admin_role, this);
        if !admin.is_zero() {
            state.grant(admin_role, admin);
        }
        for proposer in proposers {
            state.grant(role_id("PROPOSER_ROLE"), *proposer);
            state.grant(role_id("CANCELLER_ROLE"), *proposer);
        }
        for executor in executors {
            state.grant(role_id("EXECUTOR_ROLE"), *executor);
        }
        state
    }

    pub(crate) fn has_role(&self, role: H256, account: Address) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|holders| holders.contains(&account))
    }

    fn grant(&mut self, role: H256, account: Address) -> bool {
        self.roles.entry(role).or_default().insert(account)
    }

    fn check_admin(&self, method: &str, account: Address) -> Result<(), ChainError> {
        let admin_role = role_id("TIMELOCK_ADMIN_ROLE");
        if self.has_role(admin_role, account) {
            Ok(())
        } else {
            Err(revert(
                method,
                format!("AccessControl: account {account:?} is missing role {admin_role:?}"),
            ))
        }
    }

    /// Record an operation scheduled by a proposer.
    pub(crate) fn schedule(
        &mut self,
        method: &str,
        caller: Address,
        operation: H256,
    ) -> Result<(), ChainError> {
        let proposer_role = role_id("PROPOSER_ROLE");
        if !self.has_role(proposer_role, caller) {
            return Err(revert(
                method,
                format!("AccessControl: account {caller:?} is missing role {proposer_role:?}"),
            ));
        }
        if !self.scheduled.insert(operation) {
            return Err(revert(method, "TimelockController: operation already scheduled"));
        }
        Ok(())
    }

    pub(crate) fn view(&self, args: &Args<'_>) -> Result<Vec<Token>, ChainError> {
        if ROLE_NAMES.contains(&args.method) {
            return Ok(vec![bytes32(role_id(args.method))]);
        }
        match args.method {
            "hasRole" => Ok(vec![Token::Bool(
                self.has_role(args.bytes32(0)?, args.address(1)?),
            )]),
            "getRoleAdmin" => Ok(vec![bytes32(role_id("TIMELOCK_ADMIN_ROLE"))]),
            "getMinDelay" => Ok(vec![uint(self.min_delay)]),
            "isOperation" => Ok(vec![Token::Bool(
                self.scheduled.contains(&args.bytes32(0)?),
            )]),
            _ => Err(ChainError::UnknownMethod {
                artifact: args.artifact.to_string(),
                method: args.method.to_string(),
            }),
        }
    }

    pub(crate) fn execute(
        &mut self,
        this: Address,
        from: Address,
        args: &Args<'_>,
    ) -> Result<Vec<LogEntry>, ChainError> {
        let (role, account) = match args.method {
            "grantRole" | "revokeRole" | "renounceRole" => {
                args.expect_len(2)?;
                (args.bytes32(0)?, args.address(1)?)
            }
            _ => {
                return Err(ChainError::UnknownMethod {
                    artifact: args.artifact.to_string(),
                    method: args.method.to_string(),
                });
            }
        };

        let changed = match args.method {
            "grantRole" => {
                self.check_admin(args.method, from)?;
                self.grant(role, account)
            }
            "revokeRole" => {
                self.check_admin(args.method, from)?;
                self.roles.get_mut(&role).is_some_and(|h| h.remove(&account))
            }
            _ => {
                if account != from {
                    return Err(revert(
                        args.method,
                        "AccessControl: can only renounce roles for self",
                    ));
                }
                self.roles.get_mut(&role).is_some_and(|h| h.remove(&account))
            }
        };

        if !changed {
            return Ok(Vec::new());
        }
        let event = if args.method == "grantRole" {
            "RoleGranted(bytes32,address,address)"
        } else {
            "RoleRevoked(bytes32,address,address)"
        };
        Ok(vec![LogEntry {
            address: this,
            topics: vec![topic(event), role, address_topic(account), address_topic(from)],
            data: Bytes::new(),
        }])
    }
}

// ---------------------------------------------------------------------------
// Ownable application contract
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub(crate) struct OwnableState {
    pub owner: Address,
    pub token: Address,
}

impl OwnableState {
    pub(crate) fn view(&self, args: &Args<'_>) -> Result<Vec<Token>, ChainError> {
        match args.method {
            "owner" => Ok(vec![Token::Address(self.owner)]),
            "token" => Ok(vec![Token::Address(self.token)]),
            _ => Err(ChainError::UnknownMethod {
                artifact: args.artifact.to_string(),
                method: args.method.to_string(),
            }),
        }
    }

    pub(crate) fn execute(
        &mut self,
        this: Address,
        from: Address,
        args: &Args<'_>,
    ) -> Result<Vec<LogEntry>, ChainError> {
        let new_owner = match args.method {
            "transferOwnership" => {
                args.expect_len(1)?;
                let new_owner = args.address(0)?;
                if new_owner.is_zero() {
                    return Err(revert(args.method, "Ownable: new owner is the zero address"));
                }
                new_owner
            }
            "renounceOwnership" => Address::zero(),
            _ => {
                return Err(ChainError::UnknownMethod {
                    artifact: args.artifact.to_string(),
                    method: args.method.to_string(),
                });
            }
        };
        if from != self.owner {
            return Err(revert(args.method, "Ownable: caller is not the owner"));
        }
        let previous = std::mem::replace(&mut self.owner, new_owner);
        Ok(vec![LogEntry {
            address: this,
            topics: vec![
                topic("OwnershipTransferred(address,address)"),
                address_topic(previous),
                address_topic(new_owner),
            ],
            data: Bytes::new(),
        }])
    }
}

// ---------------------------------------------------------------------------
// Governor
// ---------------------------------------------------------------------------

/// `ProposalState` discriminants as the governor returns them.
pub(crate) mod proposal_state {
    pub const PENDING: u8 = 0;
    pub const ACTIVE: u8 = 1;
    pub const DEFEATED: u8 = 3;
    pub const SUCCEEDED: u8 = 4;
    pub const QUEUED: u8 = 5;
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Proposal {
    pub snapshot: u64,
    pub deadline: u64,
    pub against: U256,
    pub for_votes: U256,
    pub abstain: U256,
    pub voters: HashSet<Address>,
    pub queued: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct GovernorState {
    pub vote_token: Address,
    pub utility_token: Address,
    pub timelock: Address,
    pub voting_delay: u64,
    pub voting_period: u64,
    pub proposal_threshold: U256,
    pub proposals: HashMap<U256, Proposal>,
}

/// `keccak256(abi.encode(targets, values, calldatas, descriptionHash))`.
pub(crate) fn hash_proposal(args: &Args<'_>) -> Result<U256, ChainError> {
    let encoded = encode(&[
        Token::Array(args.array(0)?.to_vec()),
        Token::Array(args.array(1)?.to_vec()),
        Token::Array(args.array(2)?.to_vec()),
        bytes32(args.bytes32(3)?),
    ]);
    Ok(U256::from_big_endian(&keccak256(encoded)))
}

impl GovernorState {
    pub(crate) fn state(&self, method: &str, id: U256, block: u64) -> Result<u8, ChainError> {
        let proposal = self
            .proposals
            .get(&id)
            .ok_or_else(|| revert(method, "Governor: unknown proposal id"))?;
        Ok(if proposal.queued {
            proposal_state::QUEUED
        } else if block <= proposal.snapshot {
            proposal_state::PENDING
        } else if block <= proposal.deadline {
            proposal_state::ACTIVE
        } else if proposal.for_votes > proposal.against {
            proposal_state::SUCCEEDED
        } else {
            proposal_state::DEFEATED
        })
    }

    pub(crate) fn view(&self, args: &Args<'_>, block: u64) -> Result<Vec<Token>, ChainError> {
        match args.method {
            "name" => Ok(vec![Token::String(args.artifact.to_string())]),
            "token" => Ok(vec![Token::Address(self.vote_token)]),
            "timelock" => Ok(vec![Token::Address(self.timelock)]),
            "votingDelay" => Ok(vec![uint(U256::from(self.voting_delay))]),
            "votingPeriod" => Ok(vec![uint(U256::from(self.voting_period))]),
            "proposalThreshold" => Ok(vec![uint(self.proposal_threshold)]),
            "hashProposal" => Ok(vec![uint(hash_proposal(args)?)]),
            "state" => Ok(vec![uint(U256::from(
                self.state(args.method, args.uint(0)?, block)?,
            ))]),
            "hasVoted" => {
                let id = args.uint(0)?;
                let voter = args.address(1)?;
                Ok(vec![Token::Bool(
                    self.proposals
                        .get(&id)
                        .is_some_and(|p| p.voters.contains(&voter)),
                )])
            }
            "proposalVotes" => {
                let proposal = self
                    .proposals
                    .get(&args.uint(0)?)
                    .cloned()
                    .unwrap_or_default();
                Ok(vec![
                    uint(proposal.against),
                    uint(proposal.for_votes),
                    uint(proposal.abstain),
                ])
            }
            _ => Err(ChainError::UnknownMethod {
                artifact: args.artifact.to_string(),
                method: args.method.to_string(),
            }),
        }
    }

    /// `propose(targets, values, calldatas, description)`; `weight` is the
    /// proposer's current voting power.
    pub(crate) fn propose(
        &mut self,
        args: &Args<'_>,
        weight: U256,
        block: u64,
    ) -> Result<U256, ChainError> {
        args.expect_len(4)?;
        if weight < self.proposal_threshold {
            return Err(revert(
                args.method,
                "Governor: proposer votes below proposal threshold",
            ));
        }
        let (targets, values, calldatas) = (args.array(0)?, args.array(1)?, args.array(2)?);
        if targets.is_empty() {
            return Err(revert(args.method, "Governor: empty proposal"));
        }
        if targets.len() != values.len() || targets.len() != calldatas.len() {
            return Err(revert(args.method, "Governor: invalid proposal length"));
        }
        let description_hash = H256::from(keccak256(args.string(3)?.as_bytes()));
        let hashed = [
            Token::Array(targets.to_vec()),
            Token::Array(values.to_vec()),
            Token::Array(calldatas.to_vec()),
            bytes32(description_hash),
        ];
        let id = hash_proposal(&Args::new(args.artifact, args.method, &hashed))?;
        if self.proposals.contains_key(&id) {
            return Err(revert(args.method, "Governor: proposal already exists"));
        }
        let snapshot = block + self.voting_delay;
        self.proposals.insert(
            id,
            Proposal {
                snapshot,
                deadline: snapshot + self.voting_period,
                ..Proposal::default()
            },
        );
        Ok(id)
    }

    /// `castVote(proposalId, support)`; `weight` is the voter's current
    /// voting power.
    pub(crate) fn cast_vote(
        &mut self,
        args: &Args<'_>,
        voter: Address,
        weight: U256,
        block: u64,
    ) -> Result<(), ChainError> {
        args.expect_len(2)?;
        let id = args.uint(0)?;
        let support = args.uint(1)?;
        if self.state(args.method, id, block)? != proposal_state::ACTIVE {
            return Err(revert(args.method, "Governor: vote not currently active"));
        }
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or_else(|| revert(args.method, "Governor: unknown proposal id"))?;
        if proposal.voters.contains(&voter) {
            return Err(revert(args.method, "GovernorVotingSimple: vote already cast"));
        }
        if support > U256::from(2) {
            return Err(revert(
                args.method,
                "GovernorVotingSimple: invalid value for enum VoteType",
            ));
        }
        match support.as_u64() {
            0 => proposal.against += weight,
            1 => proposal.for_votes += weight,
            _ => proposal.abstain += weight,
        }
        proposal.voters.insert(voter);
        Ok(())
    }

    /// Check that `queue(targets, values, calldatas, descriptionHash)` may
    /// proceed and return the proposal id.
    pub(crate) fn queueable(&self, args: &Args<'_>, block: u64) -> Result<U256, ChainError> {
        args.expect_len(4)?;
        let id = hash_proposal(args)?;
        if self.state(args.method, id, block)? != proposal_state::SUCCEEDED {
            return Err(revert(args.method, "Governor: proposal not successful"));
        }
        Ok(id)
    }

    pub(crate) fn mark_queued(&mut self, id: U256) {
        if let Some(proposal) = self.proposals.get_mut(&id) {
            proposal.queued = true;
        }
    }
}

// ---------------------------------------------------------------------------
// EAS SchemaRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub(crate) struct SchemaRegistryState {
    pub schemas: HashMap<H256, (String, Address, bool)>,
}

pub(crate) const REGISTERED_EVENT: &str = "Registered(bytes32,address,(bytes32,address,bool,string))";

/// `keccak256(abi.encodePacked(schema, resolver, revocable))`.
pub fn schema_uid(schema: &str, resolver: Address, revocable: bool) -> H256 {
    let mut packed = schema.as_bytes().to_vec();
    packed.extend_from_slice(resolver.as_bytes());
    packed.push(u8::from(revocable));
    H256::from(keccak256(packed))
}

impl SchemaRegistryState {
    pub(crate) fn view(&self, args: &Args<'_>) -> Result<Vec<Token>, ChainError> {
        match args.method {
            "getSchema" => {
                let uid = args.bytes32(0)?;
                let (schema, resolver, revocable) = self
                    .schemas
                    .get(&uid)
                    .cloned()
                    .unwrap_or_else(|| (String::new(), Address::zero(), false));
                let uid = if schema.is_empty() { H256::zero() } else { uid };
                Ok(vec![Token::Tuple(vec![
                    bytes32(uid),
                    Token::Address(resolver),
                    Token::Bool(revocable),
                    Token::String(schema),
                ])])
            }
            _ => Err(ChainError::UnknownMethod {
                artifact: args.artifact.to_string(),
                method: args.method.to_string(),
            }),
        }
    }

    pub(crate) fn execute(
        &mut self,
        this: Address,
        from: Address,
        args: &Args<'_>,
    ) -> Result<Vec<LogEntry>, ChainError> {
        if args.method != "register" {
            return Err(ChainError::UnknownMethod {
                artifact: args.artifact.to_string(),
                method: args.method.to_string(),
            });
        }
        args.expect_len(3)?;
        let schema = args.string(0)?;
        let resolver = args.address(1)?;
        let revocable = args.boolean(2)?;
        let uid = schema_uid(&schema, resolver, revocable);
        if self.schemas.contains_key(&uid) {
            return Err(revert(args.method, "AlreadyExists()"));
        }
        let data = encode(&[Token::Tuple(vec![
            bytes32(uid),
            Token::Address(resolver),
            Token::Bool(revocable),
            Token::String(schema.clone()),
        ])]);
        self.schemas.insert(uid, (schema, resolver, revocable));
        Ok(vec![LogEntry {
            address: this,
            topics: vec![topic(REGISTERED_EVENT), uid, address_topic(from)],
            data: Bytes::from(data),
        }])
    }
}
