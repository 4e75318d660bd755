//! Error types for lrg-bootstrap.

use lrg_chain::ChainError;
use lrg_config::ConfigError;
use lrg_core::enums::Phase;
use lrg_core::errors::CoreError;
use lrg_ledger::LedgerError;
use thiserror::Error;

/// Errors from bootstrap phases and auxiliary operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A chain operation failed (revert, dropped transaction, RPC failure).
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// An address book, artifact, or journal file could not be used.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A bootstrap phase failed; no later phase was started.
    #[error("Bootstrap failed during {phase}")]
    Phase {
        phase: Phase,
        #[source]
        source: Box<BootstrapError>,
    },

    /// Settings could not be derived from configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// `--resume` has nothing to continue.
    #[error("Cannot resume: {0}")]
    Resume(String),

    /// The timelock admin role was already handed off; repeating the
    /// hand-off cannot succeed.
    #[error("Timelock {timelock} admin role already revoked from {deployer}")]
    AdminRevoked { deployer: String, timelock: String },

    /// A view call returned something other than the expected single value.
    #[error("Unexpected output from {method}: {reason}")]
    UnexpectedOutput { method: String, reason: String },
}

impl BootstrapError {
    /// The phase a failure surfaced in, if it came from the orchestrator.
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        match self {
            Self::Phase { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

impl From<CoreError> for BootstrapError {
    fn from(error: CoreError) -> Self {
        Self::Config(error.to_string())
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}
