use std::path::Path;

use ethers::abi::Token;
use ethers::types::{Address, H256, U256};
use ethers::utils::keccak256;
use lrg_bootstrap::ops::{
    cast_votes, create_token, export_abis, inspect_balances, queue_proposal, register_schema,
};
use lrg_bootstrap::{Bootstrap, BootstrapError, BootstrapSettings};
use lrg_chain::simulated::{DEFAULT_SUPPLY, schema_uid};
use lrg_chain::{ChainClient, SimulatedChain};
use lrg_config::LrgConfig;
use lrg_core::contracts::{ContractRef, checksum, format_token_amount};
use lrg_core::enums::ContractKind;
use lrg_ledger::{AddressBook, Journal, LedgerError, previous_path};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn write_artifact(root: &Path, name: &str, functions: &[&str]) {
    let abi: Vec<_> = functions
        .iter()
        .map(|f| json!({"type": "function", "name": f, "inputs": [], "outputs": [], "stateMutability": "view"}))
        .collect();
    let dir = root.join("artifacts/contracts").join(format!("{name}.sol"));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join(format!("{name}.json")),
        json!({"contractName": name, "abi": abi, "bytecode": "0x6080"}).to_string(),
    )
    .unwrap();
}

fn book_path(config: &LrgConfig, root: &Path) -> std::path::PathBuf {
    config.paths.address_book_in(root)
}

/// Four-account chain bootstrapped with accounts 1..=3 as participants, so
/// the driver is account 2 and the rider account 3.
async fn bootstrapped() -> (TempDir, SimulatedChain, Vec<Address>, LrgConfig) {
    let dir = tempfile::tempdir().unwrap();
    let chain = SimulatedChain::new(4);
    let accounts = chain.accounts().await.unwrap();
    let config = LrgConfig::default();
    let mut settings = BootstrapSettings::from_config(&config, dir.path()).unwrap();
    settings.participants = Some(accounts[1..].to_vec());
    Bootstrap::new(&chain, settings, Journal::disabled())
        .run()
        .await
        .unwrap();
    (dir, chain, accounts, config)
}

fn resolve(config: &LrgConfig, root: &Path, kind: ContractKind) -> ContractRef {
    let artifact = config.contracts.artifact(kind);
    let book = AddressBook::read(&book_path(config, root)).unwrap();
    ContractRef::new(artifact, book.resolve(&book_path(config, root), artifact).unwrap())
}

#[tokio::test]
async fn create_token_overwrites_the_address_book() {
    let dir = tempfile::tempdir().unwrap();
    let chain = SimulatedChain::default();
    let config = LrgConfig::default();
    let path = book_path(&config, dir.path());
    let stale: AddressBook = [("Old".to_string(), Address::from_low_u64_be(9))]
        .into_iter()
        .collect();
    stale.write(&path).unwrap();

    let created = create_token(&chain, &config, dir.path()).await.unwrap();

    assert_eq!(created.name, "LiteRideToken");
    let book = AddressBook::read(&path).unwrap();
    assert_eq!(book.names().collect::<Vec<_>>(), vec!["LiteRideToken"]);
    assert_eq!(book.get("LiteRideToken"), Some(created.address.as_str()));
    assert!(previous_path(&path).exists());
    assert_eq!(chain.contract_count(), 1);
}

#[tokio::test]
async fn register_schema_reports_the_registry_uid() {
    let dir = tempfile::tempdir().unwrap();
    let chain = SimulatedChain::default();
    let accounts = chain.accounts().await.unwrap();
    let registry = chain.deploy(accounts[0], "SchemaRegistry", vec![]).await.unwrap();
    let config = LrgConfig::default();
    let book: AddressBook = [("easSchemaRegistry".to_string(), registry)]
        .into_iter()
        .collect();
    book.write(&book_path(&config, dir.path())).unwrap();

    let registered = register_schema(&chain, &config, dir.path()).await.unwrap();

    let expected = schema_uid(&config.schema.definition, Address::zero(), false);
    assert_eq!(registered.uid, format!("{expected:#x}"));
    assert_eq!(registered.registry, checksum(registry));
    assert_eq!(registered.schema, "string name, string email, string phone");

    let again = register_schema(&chain, &config, dir.path()).await.unwrap_err();
    assert!(matches!(again, BootstrapError::Chain(ref e) if e.is_revert()));
}

#[tokio::test]
async fn register_schema_needs_a_registry_entry() {
    let dir = tempfile::tempdir().unwrap();
    let chain = SimulatedChain::default();
    let config = LrgConfig::default();
    let book: AddressBook = [("eas".to_string(), Address::from_low_u64_be(1))]
        .into_iter()
        .collect();
    book.write(&book_path(&config, dir.path())).unwrap();

    let err = register_schema(&chain, &config, dir.path()).await.unwrap_err();
    assert!(matches!(
        err,
        BootstrapError::Ledger(LedgerError::MissingEntry { ref name, .. }) if name == "easSchemaRegistry"
    ));
}

#[test]
fn export_abis_covers_the_whole_book_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = LrgConfig::default();
    let book: AddressBook = [
        ("LiteRide".to_string(), Address::from_low_u64_be(1)),
        ("LiteRideToken".to_string(), Address::from_low_u64_be(2)),
    ]
    .into_iter()
    .collect();
    book.write(&book_path(&config, dir.path())).unwrap();
    write_artifact(dir.path(), "LiteRide", &["owner"]);
    write_artifact(dir.path(), "LiteRideToken", &["balanceOf", "transfer"]);

    let exported = export_abis::<&str>(&config, dir.path(), &[]).unwrap();
    assert_eq!(exported.contracts, vec!["LiteRide", "LiteRideToken"]);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&exported.path).unwrap()).unwrap();
    assert_eq!(
        written["LiteRideToken"]["address"],
        checksum(Address::from_low_u64_be(2))
    );
    assert_eq!(written["LiteRide"]["abi"][0]["name"], "owner");

    let one = export_abis(&config, dir.path(), &["LiteRide"]).unwrap();
    assert_eq!(one.contracts, vec!["LiteRide"]);
}

#[test]
fn export_abis_writes_nothing_when_an_artifact_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = LrgConfig::default();
    let book: AddressBook = [
        ("LiteRide".to_string(), Address::from_low_u64_be(1)),
        ("LiteRideGovernor".to_string(), Address::from_low_u64_be(2)),
    ]
    .into_iter()
    .collect();
    book.write(&book_path(&config, dir.path())).unwrap();
    write_artifact(dir.path(), "LiteRide", &["owner"]);

    let err = export_abis::<&str>(&config, dir.path(), &[]).unwrap_err();
    assert!(matches!(
        err,
        BootstrapError::Ledger(LedgerError::MissingArtifact { ref name, .. }) if name == "LiteRideGovernor"
    ));
    assert!(!config.paths.abi_bundle_in(dir.path()).exists());
}

#[tokio::test]
async fn balances_after_bootstrap() {
    let (dir, chain, accounts, config) = bootstrapped().await;
    write_artifact(dir.path(), "LiteRideGovernor", &["propose", "castVote", "queue"]);
    write_artifact(dir.path(), "LiteRideTimelock", &["schedule", "execute"]);

    let report = inspect_balances(&chain, &config, dir.path()).await.unwrap();

    let labels: Vec<_> = report.balances.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["rider", "driver", "application", "timelock"]);

    let rider = &report.balances[0];
    assert_eq!(rider.address, checksum(accounts[3]));
    assert_eq!(rider.utility, format_token_amount(U256::exp10(19)));
    assert_eq!(rider.vote.as_deref(), Some(format_token_amount(U256::exp10(18)).as_str()));
    assert_eq!(report.balances[1].address, checksum(accounts[2]));

    let application = &report.balances[2];
    assert_eq!(application.utility, format_token_amount(U256::zero()));
    assert!(application.vote.is_none());

    let supply = U256::from(DEFAULT_SUPPLY) * U256::exp10(18);
    assert_eq!(
        report.balances[3].utility,
        format_token_amount(supply - U256::exp10(19) * 3)
    );
    assert_eq!(report.governor_functions, vec!["propose", "castVote", "queue"]);
    assert_eq!(report.timelock_functions, vec!["schedule", "execute"]);
}

#[tokio::test]
async fn balances_need_two_accounts() {
    let dir = tempfile::tempdir().unwrap();
    let chain = SimulatedChain::new(1);
    let err = inspect_balances(&chain, &LrgConfig::default(), dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err, BootstrapError::Config(_)));
}

#[tokio::test]
async fn vote_then_queue_a_proposal() {
    let (dir, chain, accounts, mut config) = bootstrapped().await;
    let root = dir.path();
    let governor = resolve(&config, root, ContractKind::Governor);
    let application = resolve(&config, root, ContractKind::Application);

    let description = "Pause new rides";
    let description_hash = H256::from(keccak256(description));
    let actions = || {
        vec![
            Token::Array(vec![Token::Address(application.address)]),
            Token::Array(vec![Token::Uint(U256::zero())]),
            Token::Array(vec![Token::Bytes(vec![0x60, 0xe4, 0xb2, 0x26])]),
        ]
    };

    let mut propose = actions();
    propose.push(Token::String(description.to_string()));
    chain.send(accounts[1], &governor, "propose", propose).await.unwrap();

    let mut hashed = actions();
    hashed.push(Token::FixedBytes(description_hash.as_bytes().to_vec()));
    let id = match chain.call(&governor, "hashProposal", hashed).await.unwrap().as_slice() {
        [Token::Uint(id)] => *id,
        other => panic!("unexpected hashProposal output {other:?}"),
    };
    chain.mine(2);

    config.proposal.proposal_id = format!("{id:#x}");
    let cast = cast_votes(&chain, &config, root).await.unwrap();
    assert_eq!(cast.proposal_id, id.to_string());
    let voters: Vec<_> = cast.votes.iter().map(|v| v.voter.clone()).collect();
    assert_eq!(voters, vec![checksum(accounts[3]), checksum(accounts[2])]);

    config.proposal.targets = vec![checksum(application.address)];
    config.proposal.values = vec!["0".to_string()];
    config.proposal.calldatas = vec!["0x60e4b226".to_string()];
    config.proposal.description_hash = format!("{description_hash:#x}");

    let early = queue_proposal(&chain, &config, root).await.unwrap_err();
    assert!(matches!(early, BootstrapError::Chain(ref e) if e.is_revert()));

    chain.mine(25);
    let queued = queue_proposal(&chain, &config, root).await.unwrap();
    assert_eq!(queued.governor, checksum(governor.address));

    let state = chain
        .call(&governor, "state", vec![Token::Uint(id)])
        .await
        .unwrap();
    assert_eq!(state, vec![Token::Uint(U256::from(5))]);
}

#[tokio::test]
async fn incomplete_proposal_is_a_config_error() {
    let (dir, chain, _, mut config) = bootstrapped().await;
    let err = queue_proposal(&chain, &config, dir.path()).await.unwrap_err();
    assert!(matches!(err, BootstrapError::Config(_)));

    config.proposal.proposal_id = "1".to_string();
    config.proposal.support = 3;
    let err = cast_votes(&chain, &config, dir.path()).await.unwrap_err();
    assert!(err.to_string().contains("proposal.support"));
}
