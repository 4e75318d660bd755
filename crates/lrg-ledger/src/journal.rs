//! JSONL phase journal.
//!
//! Appends `JournalRecord`s to `{journal_dir}/{run}.jsonl`, one file per
//! bootstrap run. Uses `serde_jsonlines::append_json_lines` so every record is
//! a complete line on disk before the next chain operation is issued.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use ethers::types::Address;
use lrg_core::contracts::ContractRef;
use lrg_core::enums::{ContractKind, JournalEvent, Phase};
use lrg_core::journal::JournalRecord;

use crate::error::LedgerError;

/// Appends records for a single run.
pub struct Journal {
    dir: PathBuf,
    run: String,
    enabled: bool,
}

impl Journal {
    /// Start a new run in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    pub fn create(dir: &Path) -> Result<Self, LedgerError> {
        std::fs::create_dir_all(dir).map_err(|e| LedgerError::io(dir, e))?;

        let base = Utc::now().format("run-%Y%m%dT%H%M%S%.3fZ").to_string();
        let mut run = base.clone();
        let mut suffix = 1u32;
        while dir.join(format!("{run}.jsonl")).exists() {
            suffix += 1;
            run = format!("{base}-{suffix}");
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            run,
            enabled: true,
        })
    }

    /// Continue appending to the run described by `history`.
    #[must_use]
    pub fn resume(dir: &Path, history: &RunHistory) -> Self {
        Self {
            dir: dir.to_path_buf(),
            run: history.run.clone(),
            enabled: true,
        }
    }

    /// A journal that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            run: "unrecorded".to_string(),
            enabled: false,
        }
    }

    #[must_use]
    pub fn run(&self) -> &str {
        &self.run
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The run's JSONL file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.jsonl", self.run))
    }

    /// Append one record and return it.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the append fails.
    pub fn record(
        &self,
        phase: Phase,
        event: JournalEvent,
        data: serde_json::Value,
    ) -> Result<JournalRecord, LedgerError> {
        let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let record = JournalRecord::new(ts, &self.run, phase, event, data);
        if !self.enabled {
            return Ok(record);
        }

        let path = self.path();
        serde_jsonlines::append_json_lines(&path, [&record]).map_err(|e| LedgerError::io(&path, e))?;
        tracing::trace!(run = %self.run, %phase, %event, "journal record appended");
        Ok(record)
    }
}

/// Everything recorded for one run.
#[derive(Debug, Clone)]
pub struct RunHistory {
    pub run: String,
    pub path: PathBuf,
    pub records: Vec<JournalRecord>,
}

impl RunHistory {
    /// Read a run's journal file.
    ///
    /// # Errors
    ///
    /// `Io` if unreadable, `Journal` if a line is not a record or carries an
    /// unsupported version.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let records: Vec<JournalRecord> = serde_jsonlines::json_lines(path)
            .map_err(|e| LedgerError::io(path, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LedgerError::Journal {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let Some(record) = records.iter().find(|r| r.v != 1) {
            return Err(LedgerError::Journal {
                path: path.to_path_buf(),
                reason: format!("unsupported record version {}", record.v),
            });
        }

        let run = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            run,
            path: path.to_path_buf(),
            records,
        })
    }

    /// The most recent run in `dir`, if any.
    ///
    /// # Errors
    ///
    /// Propagates directory and parse errors.
    pub fn latest(dir: &Path) -> Result<Option<Self>, LedgerError> {
        if !dir.exists() {
            return Ok(None);
        }
        let entries = std::fs::read_dir(dir).map_err(|e| LedgerError::io(dir, e))?;

        let mut newest: Option<((String, u32), PathBuf)> = None;
        for entry in entries {
            let entry = entry.map_err(|e| LedgerError::io(dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !stem.starts_with("run-") {
                continue;
            }
            let (base, suffix) = run_order(stem);
            let key = (base.to_string(), suffix);
            if newest.as_ref().is_none_or(|(best, _)| key > *best) {
                newest = Some((key, path.clone()));
            }
        }

        newest.map(|(_, path)| Self::load(&path)).transpose()
    }

    /// Contracts recorded as deployed, by kind.
    ///
    /// # Errors
    ///
    /// `Journal` if a `contract_deployed` payload is malformed.
    pub fn deployed(&self) -> Result<BTreeMap<ContractKind, ContractRef>, LedgerError> {
        let mut deployed = BTreeMap::new();
        for record in self
            .records
            .iter()
            .filter(|r| r.event == JournalEvent::ContractDeployed)
        {
            let malformed = |reason: String| LedgerError::Journal {
                path: self.path.clone(),
                reason,
            };
            let kind: ContractKind = record
                .data
                .get("kind")
                .cloned()
                .ok_or_else(|| malformed("contract_deployed record without kind".to_string()))
                .and_then(|k| serde_json::from_value(k).map_err(|e| malformed(e.to_string())))?;
            let artifact = record
                .data
                .get("artifact")
                .and_then(|a| a.as_str())
                .unwrap_or_else(|| kind.default_artifact());
            let address = record
                .data
                .get("address")
                .and_then(|a| a.as_str())
                .ok_or_else(|| malformed(format!("{kind} deployment without address")))?
                .parse::<Address>()
                .map_err(|e| malformed(format!("{kind} address: {e}")))?;
            deployed.insert(kind, ContractRef::new(artifact, address));
        }
        Ok(deployed)
    }

    /// Phases with a `completed` record, in the order they completed.
    #[must_use]
    pub fn completed_phases(&self) -> Vec<Phase> {
        self.records
            .iter()
            .filter(|r| r.event == JournalEvent::Completed)
            .map(|r| r.phase)
            .collect()
    }

    /// Whether the run reached `done`.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.records.iter().any(|r| r.phase == Phase::Done)
    }

    #[must_use]
    pub fn last_failure(&self) -> Option<&JournalRecord> {
        self.records
            .iter()
            .rev()
            .find(|r| r.event == JournalEvent::Failed)
    }
}

/// Sort key for a run id: its timestamp, then the collision counter that
/// `Journal::create` appends (`-2`, `-3`, ...). A bare timestamp counts as 1.
fn run_order(stem: &str) -> (&str, u32) {
    stem.rsplit_once('-')
        .and_then(|(base, tail)| tail.parse().ok().map(|n| (base, n)))
        .unwrap_or((stem, 1))
}
