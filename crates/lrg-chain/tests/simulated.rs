//! Behaviour of the simulated chain through the `ChainClient` surface.

use ethers::abi::Token;
use ethers::types::{Address, U256};
use ethers::utils::keccak256;
use lrg_chain::simulated::{DEFAULT_SUPPLY, schema_uid};
use lrg_chain::{ChainClient, ChainError, SimulatedChain};
use lrg_core::contracts::ContractRef;
use pretty_assertions::assert_eq;

fn ether(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

async fn uint(chain: &SimulatedChain, contract: &ContractRef, method: &str, args: Vec<Token>) -> U256 {
    match chain.call(contract, method, args).await.unwrap().as_slice() {
        [Token::Uint(v)] => *v,
        other => panic!("unexpected output {other:?}"),
    }
}

async fn role(chain: &SimulatedChain, timelock: &ContractRef, accessor: &str) -> Token {
    chain.call(timelock, accessor, vec![]).await.unwrap().remove(0)
}

#[tokio::test]
async fn deployments_get_create_addresses_and_mint_to_deployer() {
    let chain = SimulatedChain::new(3);
    let accounts = chain.accounts().await.unwrap();
    let deployer = accounts[0];

    let first = chain.deploy(deployer, "LiteRideVoteToken", vec![]).await.unwrap();
    let second = chain.deploy(deployer, "LiteRideToken", vec![]).await.unwrap();
    assert_ne!(first, second);
    assert_eq!(first, ethers::utils::get_contract_address(deployer, 0u64));
    assert_eq!(chain.contract_count(), 2);
    assert_eq!(chain.block_number(), 2);

    let token = ContractRef::new("LiteRideToken", second);
    let balance = uint(&chain, &token, "balanceOf", vec![Token::Address(deployer)]).await;
    assert_eq!(balance, ether(DEFAULT_SUPPLY));
}

#[tokio::test]
async fn unknown_artifact_and_account_are_rejected() {
    let chain = SimulatedChain::new(1);
    let deployer = chain.accounts().await.unwrap()[0];

    let err = chain.deploy(deployer, "Nope", vec![]).await.unwrap_err();
    assert!(matches!(err, ChainError::Artifact(_)));

    let err = chain
        .deploy(Address::repeat_byte(0xee), "LiteRideToken", vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, ChainError::UnknownAccount(_)));
}

#[tokio::test]
async fn transfer_moves_balance_and_overdraft_reverts() {
    let chain = SimulatedChain::new(2);
    let accounts = chain.accounts().await.unwrap();
    let address = chain.deploy(accounts[0], "LiteRideToken", vec![]).await.unwrap();
    let token = ContractRef::new("LiteRideToken", address);

    let receipt = chain
        .send(
            accounts[0],
            &token,
            "transfer",
            vec![Token::Address(accounts[1]), Token::Uint(ether(10))],
        )
        .await
        .unwrap();
    assert_eq!(receipt.logs.len(), 1);
    assert_eq!(
        uint(&chain, &token, "balanceOf", vec![Token::Address(accounts[1])]).await,
        ether(10)
    );

    let err = chain
        .send(
            accounts[1],
            &token,
            "transfer",
            vec![Token::Address(accounts[0]), Token::Uint(ether(11))],
        )
        .await
        .unwrap_err();
    assert!(err.is_revert());
    assert_eq!(
        uint(&chain, &token, "balanceOf", vec![Token::Address(accounts[1])]).await,
        ether(10)
    );
}

#[tokio::test]
async fn self_delegation_activates_voting_power() {
    let chain = SimulatedChain::new(2);
    let accounts = chain.accounts().await.unwrap();
    let address = chain.deploy(accounts[0], "LiteRideVoteToken", vec![]).await.unwrap();
    let votes = ContractRef::new("LiteRideVoteToken", address);

    chain
        .send(
            accounts[0],
            &votes,
            "transfer",
            vec![Token::Address(accounts[1]), Token::Uint(ether(1))],
        )
        .await
        .unwrap();
    assert_eq!(
        uint(&chain, &votes, "getVotes", vec![Token::Address(accounts[1])]).await,
        U256::zero()
    );

    chain
        .send(accounts[1], &votes, "delegate", vec![Token::Address(accounts[1])])
        .await
        .unwrap();
    assert_eq!(
        uint(&chain, &votes, "getVotes", vec![Token::Address(accounts[1])]).await,
        ether(1)
    );
    let delegate = chain
        .call(&votes, "delegates", vec![Token::Address(accounts[1])])
        .await
        .unwrap();
    assert_eq!(delegate, vec![Token::Address(accounts[1])]);
}

#[tokio::test]
async fn timelock_admin_controls_role_changes() {
    let chain = SimulatedChain::new(2);
    let accounts = chain.accounts().await.unwrap();
    let deployer = accounts[0];
    let address = chain
        .deploy(
            deployer,
            "LiteRideTimelock",
            vec![
                Token::Uint(U256::one()),
                Token::Array(vec![]),
                Token::Array(vec![]),
                Token::Address(deployer),
            ],
        )
        .await
        .unwrap();
    let timelock = ContractRef::new("LiteRideTimelock", address);
    let proposer = role(&chain, &timelock, "PROPOSER_ROLE").await;
    let admin = role(&chain, &timelock, "TIMELOCK_ADMIN_ROLE").await;

    chain
        .send(
            deployer,
            &timelock,
            "grantRole",
            vec![proposer.clone(), Token::Address(accounts[1])],
        )
        .await
        .unwrap();
    let held = chain
        .call(&timelock, "hasRole", vec![proposer.clone(), Token::Address(accounts[1])])
        .await
        .unwrap();
    assert_eq!(held, vec![Token::Bool(true)]);

    chain
        .send(deployer, &timelock, "revokeRole", vec![admin, Token::Address(deployer)])
        .await
        .unwrap();
    let err = chain
        .send(deployer, &timelock, "grantRole", vec![proposer, Token::Address(deployer)])
        .await
        .unwrap_err();
    assert!(matches!(err, ChainError::Reverted { ref reason, .. } if reason.contains("AccessControl")));
}

#[tokio::test]
async fn injected_failure_reverts_without_mining() {
    let chain = SimulatedChain::new(2);
    let accounts = chain.accounts().await.unwrap();
    let address = chain.deploy(accounts[0], "LiteRide", vec![]).await.unwrap();
    let app = ContractRef::new("LiteRide", address);
    let before = chain.block_number();

    chain.fail_on("transferOwnership");
    let err = chain
        .send(accounts[0], &app, "transferOwnership", vec![Token::Address(accounts[1])])
        .await
        .unwrap_err();
    assert!(err.is_revert());
    assert_eq!(chain.block_number(), before);

    chain.clear_failures();
    chain
        .send(accounts[0], &app, "transferOwnership", vec![Token::Address(accounts[1])])
        .await
        .unwrap();
    let owner = chain.call(&app, "owner", vec![]).await.unwrap();
    assert_eq!(owner, vec![Token::Address(accounts[1])]);
}

#[tokio::test]
async fn schema_registration_emits_uid_topic() {
    let chain = SimulatedChain::new(1);
    let deployer = chain.accounts().await.unwrap()[0];
    let address = chain.deploy(deployer, "SchemaRegistry", vec![]).await.unwrap();
    let registry = ContractRef::new("SchemaRegistry", address);
    let schema = "string name, string email, string phone";
    let args = vec![
        Token::String(schema.to_string()),
        Token::Address(Address::zero()),
        Token::Bool(false),
    ];

    let receipt = chain.send(deployer, &registry, "register", args.clone()).await.unwrap();
    let log = &receipt.logs[0];
    assert_eq!(log.topics[1], schema_uid(schema, Address::zero(), false));

    let err = chain.send(deployer, &registry, "register", args).await.unwrap_err();
    assert!(matches!(err, ChainError::Reverted { ref reason, .. } if reason.contains("AlreadyExists")));
}

#[tokio::test]
async fn governor_proposal_lifecycle_reaches_queued() {
    let chain = SimulatedChain::new(3);
    let accounts = chain.accounts().await.unwrap();
    let deployer = accounts[0];

    let votes_address = chain.deploy(deployer, "LiteRideVoteToken", vec![]).await.unwrap();
    let utility_address = chain.deploy(deployer, "LiteRideToken", vec![]).await.unwrap();
    let timelock_address = chain
        .deploy(
            deployer,
            "LiteRideTimelock",
            vec![
                Token::Uint(U256::one()),
                Token::Array(vec![]),
                Token::Array(vec![]),
                Token::Address(deployer),
            ],
        )
        .await
        .unwrap();
    let governor_address = chain
        .deploy(
            deployer,
            "LiteRideGovernor",
            vec![
                Token::Address(votes_address),
                Token::Address(utility_address),
                Token::Address(timelock_address),
            ],
        )
        .await
        .unwrap();
    let votes = ContractRef::new("LiteRideVoteToken", votes_address);
    let timelock = ContractRef::new("LiteRideTimelock", timelock_address);
    let governor = ContractRef::new("LiteRideGovernor", governor_address);

    chain
        .send(deployer, &votes, "delegate", vec![Token::Address(deployer)])
        .await
        .unwrap();
    let proposer = role(&chain, &timelock, "PROPOSER_ROLE").await;
    chain
        .send(
            deployer,
            &timelock,
            "grantRole",
            vec![proposer, Token::Address(governor_address)],
        )
        .await
        .unwrap();

    let targets = Token::Array(vec![Token::Address(utility_address)]);
    let values = Token::Array(vec![Token::Uint(U256::zero())]);
    let calldatas = Token::Array(vec![Token::Bytes(vec![0x60, 0xe4, 0xb2, 0x26])]);
    let description = "Fund driver incentives";
    let description_hash = Token::FixedBytes(keccak256(description.as_bytes()).to_vec());

    chain
        .send(
            deployer,
            &governor,
            "propose",
            vec![
                targets.clone(),
                values.clone(),
                calldatas.clone(),
                Token::String(description.to_string()),
            ],
        )
        .await
        .unwrap();
    let id = uint(
        &chain,
        &governor,
        "hashProposal",
        vec![targets.clone(), values.clone(), calldatas.clone(), description_hash.clone()],
    )
    .await;
    assert_eq!(uint(&chain, &governor, "state", vec![Token::Uint(id)]).await, U256::zero());

    chain.mine(1);
    chain
        .send(deployer, &governor, "castVote", vec![Token::Uint(id), Token::Uint(U256::one())])
        .await
        .unwrap();

    let queue = vec![targets, values, calldatas, description_hash];
    let early = chain
        .send(deployer, &governor, "queue", queue.clone())
        .await
        .unwrap_err();
    assert!(early.is_revert());

    chain.mine(20);
    assert_eq!(uint(&chain, &governor, "state", vec![Token::Uint(id)]).await, U256::from(4));
    chain.send(deployer, &governor, "queue", queue).await.unwrap();
    assert_eq!(uint(&chain, &governor, "state", vec![Token::Uint(id)]).await, U256::from(5));
}

#[tokio::test]
async fn extra_accounts_can_sign() {
    let outsider = Address::from_low_u64_be(0xabc);
    let chain = SimulatedChain::new(2).with_accounts([outsider, Address::from_low_u64_be(0x1000)]);
    let accounts = chain.accounts().await.unwrap();
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[2], outsider);

    let vote = chain.deploy(outsider, "LiteRideVoteToken", vec![]).await.unwrap();
    let vote = ContractRef::new("LiteRideVoteToken", vote);
    chain
        .send(outsider, &vote, "delegate", vec![Token::Address(outsider)])
        .await
        .unwrap();
    assert_eq!(
        uint(&chain, &vote, "getVotes", vec![Token::Address(outsider)]).await,
        ether(DEFAULT_SUPPLY)
    );
}
