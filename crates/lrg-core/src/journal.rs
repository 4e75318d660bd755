//! JSONL phase journal envelope.
//!
//! Every bootstrap run appends `JournalRecord`s to `{journal_dir}/{run}.jsonl`.
//! The journal is what lets an operator see how far on-chain state progressed
//! after an aborted run, and what `deploy --resume` replays.
//!
//! Old records without a `v` field deserialize with `v == 1`.

use serde::{Deserialize, Serialize};

use crate::enums::{JournalEvent, Phase};

const fn default_journal_version() -> u32 {
    1
}

/// A single event recorded in a run's journal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalRecord {
    /// Schema version.
    #[serde(default = "default_journal_version")]
    pub v: u32,

    /// RFC 3339 timestamp.
    pub ts: String,

    /// Run identifier (also the journal file stem).
    pub run: String,

    pub phase: Phase,

    pub event: JournalEvent,

    /// Event payload. `contract_deployed` carries `{kind, artifact, address}`,
    /// `failed` carries `{error}`, `completed` carries a phase summary.
    pub data: serde_json::Value,
}

impl JournalRecord {
    #[must_use]
    pub fn new(
        ts: impl Into<String>,
        run: impl Into<String>,
        phase: Phase,
        event: JournalEvent,
        data: serde_json::Value,
    ) -> Self {
        Self {
            v: default_journal_version(),
            ts: ts.into(),
            run: run.into(),
            phase,
            event,
            data,
        }
    }
}
