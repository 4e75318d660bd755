use indicatif::{ProgressBar, ProgressStyle};
use lrg_bootstrap::{BootstrapError, BootstrapObserver};
use lrg_core::contracts::DeployedContract;
use lrg_core::enums::Phase;

use crate::ui;

/// Progress bar over the bootstrap phases. Hidden unless stdout is a
/// terminal and the output format is not JSON.
pub struct PhaseProgress {
    bar: Option<ProgressBar>,
}

fn bar_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl PhaseProgress {
    #[must_use]
    pub fn new() -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(u64::try_from(Phase::SEQUENCE.len()).unwrap_or(u64::MAX));
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar: Some(bar) }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Default for PhaseProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapObserver for PhaseProgress {
    fn phase_started(&self, phase: Phase) {
        if let Some(bar) = &self.bar {
            bar.set_message(phase.to_string());
        }
    }

    fn phase_completed(&self, _phase: Phase) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn phase_skipped(&self, phase: Phase) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{phase} (already done)"));
            bar.inc(1);
        }
    }

    fn phase_failed(&self, phase: Phase, _error: &BootstrapError) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(format!("{phase} failed"));
        }
    }

    fn contract_deployed(&self, contract: &DeployedContract) {
        if let Some(bar) = &self.bar {
            bar.println(format!("deployed {} at {:?}", contract.artifact(), contract.address()));
        }
    }
}
