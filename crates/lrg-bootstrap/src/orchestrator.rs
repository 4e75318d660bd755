//! Bootstrap orchestrator.
//!
//! Runs the phases in their fixed order, driven by [`Phase::next`]:
//!
//! ```text
//! deploy_tokens → distribute → deploy_governance → wire_ownership
//!   → sweep_residual_funds → grant_and_revoke_roles → persist_address_book → done
//! ```
//!
//! Every phase is bracketed by `started` / `completed` journal records and
//! every deployment gets a `contract_deployed` record. The first failure is
//! journaled, logged with its phase, and returned as
//! [`BootstrapError::Phase`]; nothing after it runs.
//!
//! A resumed run reuses contracts the journal recorded as deployed and skips
//! phases the journal recorded as completed.

use std::collections::BTreeMap;
use std::sync::Arc;

use ethers::abi::Token;
use ethers::types::Address;
use lrg_chain::ChainClient;
use lrg_core::contracts::{ContractRef, DeployedContract, checksum, format_token_amount};
use lrg_core::enums::{ContractKind, JournalEvent, Phase};
use lrg_core::errors::CoreError;
use lrg_core::responses::{BootstrapReport, ParticipantAllocation, SweepSummary};
use lrg_ledger::{AddressBook, Journal, RunHistory};
use serde_json::json;

use crate::deployer::ContractDeployer;
use crate::error::BootstrapError;
use crate::observer::{BootstrapObserver, NoopObserver};
use crate::settings::BootstrapSettings;
use crate::{distribution, handoff, ownership};

/// What the phases so far have produced.
struct RunState {
    deployer: Address,
    participants: Vec<Address>,
    contracts: BTreeMap<ContractKind, DeployedContract>,
    allocations: Vec<ParticipantAllocation>,
    swept: SweepSummary,
    phases: Vec<Phase>,
}

impl RunState {
    fn contract(&self, kind: ContractKind) -> Result<&ContractRef, BootstrapError> {
        self.contracts
            .get(&kind)
            .map(|deployed| &deployed.handle)
            .ok_or_else(|| BootstrapError::Resume(format!("no {kind} contract has been deployed")))
    }

    /// Recover a skipped phase's output from its `completed` summary.
    fn restore(&mut self, phase: Phase, summary: &serde_json::Value) -> Result<(), BootstrapError> {
        let unreadable = |reason: String| {
            BootstrapError::Resume(format!("completed record for {phase} is unreadable: {reason}"))
        };
        match phase {
            Phase::Distribute => {
                let participants = summary
                    .get("participants")
                    .ok_or_else(|| unreadable("no participants".to_string()))?;
                self.allocations = serde_json::from_value(participants.clone())
                    .map_err(|e| unreadable(e.to_string()))?;
            }
            Phase::SweepResidualFunds => {
                self.swept =
                    serde_json::from_value(summary.clone()).map_err(|e| unreadable(e.to_string()))?;
            }
            _ => {}
        }
        Ok(())
    }
}

pub struct Bootstrap<'a, C> {
    chain: &'a C,
    settings: BootstrapSettings,
    journal: Journal,
    recorded: BTreeMap<ContractKind, DeployedContract>,
    completed: BTreeMap<Phase, serde_json::Value>,
    resumed: bool,
    dry_run: bool,
    observer: Arc<dyn BootstrapObserver>,
}

impl<'a, C: ChainClient> Bootstrap<'a, C> {
    /// A fresh run recording into `journal`.
    #[must_use]
    pub fn new(chain: &'a C, settings: BootstrapSettings, journal: Journal) -> Self {
        Self {
            chain,
            settings,
            journal,
            recorded: BTreeMap::new(),
            completed: BTreeMap::new(),
            resumed: false,
            dry_run: false,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Continue the latest run journaled in `journal_dir`.
    ///
    /// # Errors
    ///
    /// `Resume` when there is no run to continue, the latest run already
    /// finished, or its completed phases are out of order; `Ledger` when the
    /// journal cannot be read.
    pub fn resume(
        chain: &'a C,
        settings: BootstrapSettings,
        journal_dir: &std::path::Path,
    ) -> Result<Self, BootstrapError> {
        let history = RunHistory::latest(journal_dir)?.ok_or_else(|| {
            BootstrapError::Resume(format!("no journaled run in {}", journal_dir.display()))
        })?;
        if history.is_finished() {
            return Err(BootstrapError::Resume(format!(
                "run {} already finished",
                history.run
            )));
        }

        let recorded = history
            .deployed()?
            .into_iter()
            .map(|(kind, handle)| (kind, DeployedContract { kind, handle }))
            .collect();
        let completed: Vec<_> = history
            .records
            .iter()
            .filter(|r| r.event == JournalEvent::Completed)
            .collect();
        let mut previous: Option<Phase> = None;
        for record in &completed {
            let legal = previous.map_or(record.phase == Phase::DeployTokens, |p| {
                p.can_transition_to(record.phase)
            });
            if !legal {
                let error = CoreError::InvalidTransition {
                    from: previous.map_or_else(|| "start".to_string(), |p| p.to_string()),
                    to: record.phase.to_string(),
                };
                return Err(BootstrapError::Resume(format!("run {}: {error}", history.run)));
            }
            previous = Some(record.phase);
        }
        let completed = completed
            .into_iter()
            .map(|r| (r.phase, r.data.clone()))
            .collect();
        if let Some(failure) = history.last_failure() {
            tracing::info!(run = %history.run, phase = %failure.phase, "resuming after failure");
        }

        Ok(Self {
            chain,
            settings,
            journal: Journal::resume(journal_dir, &history),
            recorded,
            completed,
            resumed: true,
            dry_run: false,
            observer: Arc::new(NoopObserver),
        })
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn BootstrapObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Mark the report as coming from a simulated run.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        self.journal.run()
    }

    /// Run every remaining phase.
    ///
    /// # Errors
    ///
    /// `Phase { phase, source }` for the first phase that fails. Account
    /// discovery failures, participants the node cannot sign for, and
    /// unreadable journal summaries are returned as-is.
    pub async fn run(mut self) -> Result<BootstrapReport, BootstrapError> {
        let accounts = self.chain.accounts().await?;
        let deployer = *accounts
            .first()
            .ok_or_else(|| BootstrapError::Config("the node exposes no accounts".to_string()))?;
        let participants = match &self.settings.participants {
            Some(configured) => {
                // Participants sign their own delegation, so the node must hold their keys.
                if let Some(stranger) = configured.iter().find(|p| !accounts.contains(*p)) {
                    return Err(BootstrapError::Config(format!(
                        "participant {} is not an account of the node",
                        checksum(*stranger)
                    )));
                }
                configured.clone()
            }
            None => accounts,
        };

        tracing::info!(
            run = %self.journal.run(),
            deployer = ?deployer,
            participants = participants.len(),
            resumed = self.resumed,
            "bootstrap starting"
        );

        let mut state = RunState {
            deployer,
            participants,
            contracts: std::mem::take(&mut self.recorded),
            allocations: Vec::new(),
            swept: SweepSummary::default(),
            phases: Vec::new(),
        };

        let mut phase = Phase::DeployTokens;
        while phase != Phase::Done {
            self.step(phase, &mut state).await?;
            let Some(next) = phase.next() else { break };
            phase = next;
        }
        self.journal.record(Phase::Done, JournalEvent::Completed, json!({}))?;
        tracing::info!(run = %self.journal.run(), "bootstrap complete");

        Ok(BootstrapReport {
            run: self.journal.run().to_string(),
            deployer: checksum(state.deployer),
            resumed: self.resumed,
            dry_run: self.dry_run,
            contracts: state
                .contracts
                .values()
                .map(|d| (d.artifact().to_string(), checksum(d.address())))
                .collect(),
            participants: state.allocations,
            swept: state.swept,
            phases: state.phases,
            address_book: self.settings.address_book.display().to_string(),
        })
    }

    async fn step(&self, phase: Phase, state: &mut RunState) -> Result<(), BootstrapError> {
        if let Some(summary) = self.completed.get(&phase) {
            tracing::info!(%phase, "phase already completed, skipping");
            state.restore(phase, summary)?;
            state.phases.push(phase);
            self.observer.phase_skipped(phase);
            return Ok(());
        }

        self.observer.phase_started(phase);
        match self.attempt(phase, state).await {
            Ok(()) => {
                state.phases.push(phase);
                self.observer.phase_completed(phase);
                Ok(())
            }
            Err(error) => {
                tracing::error!(%phase, error = %error, "bootstrap phase failed");
                if let Err(journal_error) = self.journal.record(
                    phase,
                    JournalEvent::Failed,
                    json!({ "error": error.to_string() }),
                ) {
                    tracing::warn!(%phase, error = %journal_error, "could not journal failure");
                }
                self.observer.phase_failed(phase, &error);
                Err(BootstrapError::Phase {
                    phase,
                    source: Box::new(error),
                })
            }
        }
    }

    async fn attempt(&self, phase: Phase, state: &mut RunState) -> Result<(), BootstrapError> {
        self.journal.record(phase, JournalEvent::Started, json!({}))?;
        tracing::info!(%phase, "phase started");
        let summary = self.execute(phase, state).await?;
        self.journal.record(phase, JournalEvent::Completed, summary)?;
        tracing::info!(%phase, "phase completed");
        Ok(())
    }

    async fn execute(
        &self,
        phase: Phase,
        state: &mut RunState,
    ) -> Result<serde_json::Value, BootstrapError> {
        match phase {
            Phase::DeployTokens => {
                let vote = self.deploy(state, ContractKind::VoteToken, vec![]).await?;
                let utility = self.deploy(state, ContractKind::UtilityToken, vec![]).await?;
                Ok(json!({
                    "vote_token": checksum(vote.address),
                    "utility_token": checksum(utility.address),
                }))
            }
            Phase::Distribute => {
                let utility = state.contract(ContractKind::UtilityToken)?.clone();
                let vote = state.contract(ContractKind::VoteToken)?.clone();
                state.allocations = distribution::distribute(
                    self.chain,
                    state.deployer,
                    &state.participants,
                    &utility,
                    &vote,
                    self.settings.amounts,
                )
                .await?;
                Ok(json!({ "participants": state.allocations }))
            }
            Phase::DeployGovernance => self.deploy_governance(state).await,
            Phase::WireOwnership => {
                let application = state.contract(ContractKind::Application)?.clone();
                let timelock = state.contract(ContractKind::Timelock)?.address;
                let transferred = ownership::transfer_ownership(
                    self.chain,
                    state.deployer,
                    &application,
                    timelock,
                )
                .await?;
                Ok(json!({ "owner": checksum(timelock), "transferred": transferred }))
            }
            Phase::SweepResidualFunds => {
                let timelock = state.contract(ContractKind::Timelock)?.address;
                let utility = state.contract(ContractKind::UtilityToken)?.clone();
                let vote = state.contract(ContractKind::VoteToken)?.clone();
                let utility_swept =
                    ownership::sweep(self.chain, &utility, state.deployer, timelock).await?;
                let vote_swept =
                    ownership::sweep(self.chain, &vote, state.deployer, timelock).await?;
                state.swept = SweepSummary {
                    utility: format_token_amount(utility_swept),
                    vote: format_token_amount(vote_swept),
                };
                Ok(json!(state.swept))
            }
            Phase::GrantAndRevokeRoles => {
                let timelock = state.contract(ContractKind::Timelock)?.clone();
                let governor = state.contract(ContractKind::Governor)?.address;
                let outcome = handoff::hand_off(
                    self.chain,
                    state.deployer,
                    &timelock,
                    governor,
                    self.settings.anyone,
                )
                .await?;
                Ok(json!({
                    "proposer_granted": outcome.proposer_granted,
                    "executor_granted": outcome.executor_granted,
                }))
            }
            Phase::PersistAddressBook => {
                let mut book = AddressBook::new();
                for kind in ContractKind::ALL {
                    let handle = state.contract(kind)?;
                    book.insert(handle.artifact.clone(), handle.address);
                }
                book.write(&self.settings.address_book)?;
                tracing::info!(
                    path = %self.settings.address_book.display(),
                    entries = book.len(),
                    "address book written"
                );
                Ok(json!({
                    "path": self.settings.address_book.display().to_string(),
                    "entries": book.len(),
                }))
            }
            Phase::Done => Ok(json!({})),
        }
    }

    async fn deploy_governance(
        &self,
        state: &mut RunState,
    ) -> Result<serde_json::Value, BootstrapError> {
        let settings = &self.settings;
        let deployer = state.deployer;
        let vote = state.contract(ContractKind::VoteToken)?.address;
        let utility = state.contract(ContractKind::UtilityToken)?.address;

        let timelock = self
            .deploy(
                state,
                ContractKind::Timelock,
                vec![
                    Token::Uint(settings.min_delay),
                    Token::Array(vec![]),
                    Token::Array(vec![]),
                    Token::Address(deployer),
                ],
            )
            .await?;

        let mut governor_args = vec![
            Token::Address(vote),
            Token::Address(utility),
            Token::Address(timelock.address),
        ];
        if settings.governor_takes_settings {
            governor_args.extend([
                Token::Uint(settings.voting_delay),
                Token::Uint(settings.voting_period),
                Token::Uint(settings.proposal_threshold),
            ]);
        }
        let governor = self
            .deploy(state, ContractKind::Governor, governor_args)
            .await?;

        let application = self
            .deploy(state, ContractKind::Application, vec![Token::Address(utility)])
            .await?;

        Ok(json!({
            "timelock": checksum(timelock.address),
            "governor": checksum(governor.address),
            "application": checksum(application.address),
        }))
    }

    /// Deploy `kind`, or reuse the contract an earlier attempt deployed.
    async fn deploy(
        &self,
        state: &mut RunState,
        kind: ContractKind,
        args: Vec<Token>,
    ) -> Result<ContractRef, BootstrapError> {
        if let Some(existing) = state.contracts.get(&kind) {
            tracing::info!(%kind, address = ?existing.address(), "reusing recorded deployment");
            return Ok(existing.handle.clone());
        }

        let deployed = ContractDeployer::new(self.chain, state.deployer)
            .deploy(kind, self.settings.artifact(kind), args)
            .await?;
        self.journal.record(
            kind.deploy_phase(),
            JournalEvent::ContractDeployed,
            json!({
                "kind": kind,
                "artifact": deployed.artifact(),
                "address": checksum(deployed.address()),
            }),
        )?;
        self.observer.contract_deployed(&deployed);

        let handle = deployed.handle.clone();
        state.contracts.insert(kind, deployed);
        Ok(handle)
    }
}
