//! `register-schema`: register the attestation schema.

use std::path::Path;

use ethers::abi::Token;
use lrg_chain::ChainClient;
use lrg_config::LrgConfig;
use lrg_core::contracts::{ContractRef, checksum, parse_address};
use lrg_core::responses::SchemaRegistered;
use lrg_ledger::AddressBook;

use super::first_account;
use crate::error::BootstrapError;

/// Register the configured schema on the registry recorded in the address
/// book and return the uid from the registry's `Registered` event.
///
/// # Errors
///
/// A missing registry entry, an unparsable resolver, a reverted registration
/// (including a schema that already exists), or a receipt without the event.
pub async fn register_schema<C: ChainClient>(
    chain: &C,
    config: &LrgConfig,
    root: &Path,
) -> Result<SchemaRegistered, BootstrapError> {
    let path = config.paths.address_book_in(root);
    let book = AddressBook::read(&path)?;
    let address = book.resolve(&path, &config.contracts.schema_registry_key)?;
    let registry = ContractRef::new(&config.contracts.schema_registry, address);

    let schema = &config.schema;
    let resolver = parse_address("schema.resolver", &schema.resolver)?;
    let from = first_account(chain).await?;

    let receipt = chain
        .send(
            from,
            &registry,
            "register",
            vec![
                Token::String(schema.definition.clone()),
                Token::Address(resolver),
                Token::Bool(schema.revocable),
            ],
        )
        .await?;

    // Registered(bytes32 indexed uid, address indexed registerer, SchemaRecord)
    let uid = receipt
        .logs
        .iter()
        .filter(|log| log.address == address)
        .find_map(|log| log.topics.get(1))
        .ok_or_else(|| BootstrapError::UnexpectedOutput {
            method: "register".to_string(),
            reason: "receipt carries no Registered event".to_string(),
        })?;
    tracing::info!(uid = ?uid, "schema registered");

    Ok(SchemaRegistered {
        registry: checksum(address),
        schema: schema.definition.clone(),
        uid: format!("{uid:#x}"),
        tx_hash: format!("{:#x}", receipt.tx_hash),
    })
}
