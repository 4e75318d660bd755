//! Progress callbacks for a bootstrap run.

use lrg_core::contracts::DeployedContract;
use lrg_core::enums::Phase;

use crate::error::BootstrapError;

/// Receives phase transitions as the orchestrator makes them.
///
/// All methods default to doing nothing.
pub trait BootstrapObserver: Send + Sync {
    fn phase_started(&self, _phase: Phase) {}

    fn phase_completed(&self, _phase: Phase) {}

    /// A resumed run found the phase already completed.
    fn phase_skipped(&self, _phase: Phase) {}

    fn phase_failed(&self, _phase: Phase, _error: &BootstrapError) {}

    fn contract_deployed(&self, _contract: &DeployedContract) {}
}

pub struct NoopObserver;

impl BootstrapObserver for NoopObserver {}
