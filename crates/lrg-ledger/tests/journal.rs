//! Phase journal: append, reload, and resume bookkeeping.

use ethers::types::Address;
use lrg_core::enums::{ContractKind, JournalEvent, Phase};
use lrg_ledger::{Journal, LedgerError, RunHistory};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn deployed(journal: &Journal, kind: ContractKind, byte: u8) {
    journal
        .record(
            kind.deploy_phase(),
            JournalEvent::ContractDeployed,
            json!({
                "kind": kind,
                "artifact": kind.default_artifact(),
                "address": format!("{:?}", Address::repeat_byte(byte)),
            }),
        )
        .unwrap();
}

#[test]
fn records_are_reloaded_in_order() {
    let dir = TempDir::new().unwrap();
    let journal = Journal::create(dir.path()).unwrap();

    journal.record(Phase::DeployTokens, JournalEvent::Started, json!({})).unwrap();
    deployed(&journal, ContractKind::VoteToken, 0x11);
    deployed(&journal, ContractKind::UtilityToken, 0x22);
    journal.record(Phase::DeployTokens, JournalEvent::Completed, json!({})).unwrap();
    journal.record(Phase::Distribute, JournalEvent::Started, json!({})).unwrap();

    let history = RunHistory::latest(dir.path()).unwrap().unwrap();
    assert_eq!(history.run, journal.run());
    assert_eq!(history.records.len(), 5);
    assert_eq!(history.completed_phases(), vec![Phase::DeployTokens]);
    assert!(!history.is_finished());
    assert!(history.last_failure().is_none());

    let contracts = history.deployed().unwrap();
    assert_eq!(contracts.len(), 2);
    assert_eq!(contracts[&ContractKind::VoteToken].address, Address::repeat_byte(0x11));
    assert_eq!(contracts[&ContractKind::UtilityToken].artifact, "LiteRideToken");
}

#[test]
fn failure_is_visible_in_history() {
    let dir = TempDir::new().unwrap();
    let journal = Journal::create(dir.path()).unwrap();
    journal.record(Phase::GrantAndRevokeRoles, JournalEvent::Started, json!({})).unwrap();
    journal
        .record(
            Phase::GrantAndRevokeRoles,
            JournalEvent::Failed,
            json!({"error": "execution reverted"}),
        )
        .unwrap();

    let history = RunHistory::load(&journal.path()).unwrap();
    let failure = history.last_failure().unwrap();
    assert_eq!(failure.phase, Phase::GrantAndRevokeRoles);
    assert_eq!(failure.data["error"], "execution reverted");
}

#[test]
fn resumed_journal_appends_to_the_same_file() {
    let dir = TempDir::new().unwrap();
    let first = Journal::create(dir.path()).unwrap();
    first.record(Phase::DeployTokens, JournalEvent::Started, json!({})).unwrap();

    let history = RunHistory::latest(dir.path()).unwrap().unwrap();
    let resumed = Journal::resume(dir.path(), &history);
    assert_eq!(resumed.path(), first.path());
    resumed.record(Phase::Done, JournalEvent::Completed, json!({})).unwrap();

    let history = RunHistory::load(&first.path()).unwrap();
    assert!(history.is_finished());
}

#[test]
fn latest_picks_newest_run_and_ignores_other_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "scratch").unwrap();
    for run in ["run-20260101T000000.000Z", "run-20261017T090000.000Z"] {
        std::fs::write(
            dir.path().join(format!("{run}.jsonl")),
            format!(
                "{{\"ts\":\"2026-01-01T00:00:00Z\",\"run\":\"{run}\",\"phase\":\"deploy_tokens\",\"event\":\"started\",\"data\":{{}}}}\n"
            ),
        )
        .unwrap();
    }

    let history = RunHistory::latest(dir.path()).unwrap().unwrap();
    assert_eq!(history.run, "run-20261017T090000.000Z");
    assert_eq!(history.records[0].v, 1);
}

#[test]
fn latest_orders_collision_suffixes_numerically() {
    let dir = TempDir::new().unwrap();
    let base = "run-20261017T090000.000Z";
    for run in [base.to_string(), format!("{base}-2"), format!("{base}-9"), format!("{base}-10")] {
        std::fs::write(
            dir.path().join(format!("{run}.jsonl")),
            format!(
                "{{\"ts\":\"2026-10-17T09:00:00Z\",\"run\":\"{run}\",\"phase\":\"deploy_tokens\",\"event\":\"started\",\"data\":{{}}}}\n"
            ),
        )
        .unwrap();
    }

    let history = RunHistory::latest(dir.path()).unwrap().unwrap();
    assert_eq!(history.run, format!("{base}-10"));
}

#[test]
fn missing_directory_has_no_history() {
    let dir = TempDir::new().unwrap();
    assert!(RunHistory::latest(&dir.path().join("absent")).unwrap().is_none());
}

#[test]
fn unsupported_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run-20261017T090000.000Z.jsonl");
    std::fs::write(
        &path,
        "{\"v\":2,\"ts\":\"2026-10-17T09:00:00Z\",\"run\":\"x\",\"phase\":\"done\",\"event\":\"completed\",\"data\":{}}\n",
    )
    .unwrap();
    assert!(matches!(RunHistory::load(&path), Err(LedgerError::Journal { .. })));
}

#[test]
fn disabled_journal_writes_nothing() {
    let journal = Journal::disabled();
    let record = journal.record(Phase::Distribute, JournalEvent::Started, json!({})).unwrap();
    assert_eq!(record.phase, Phase::Distribute);
    assert!(!journal.is_enabled());
}
