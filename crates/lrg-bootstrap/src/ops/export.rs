//! `export-abis`: join the address book with artifact ABIs.

use std::path::Path;

use lrg_config::LrgConfig;
use lrg_core::responses::AbiExported;
use lrg_ledger::{AbiBundle, AddressBook, ArtifactStore};

use crate::error::BootstrapError;

/// Write the ABI bundle for `names`, or for every address-book entry when
/// `names` is empty.
///
/// # Errors
///
/// The first name missing from the address book or the artifact store; no
/// bundle is written in that case.
pub fn export_abis<S: AsRef<str>>(
    config: &LrgConfig,
    root: &Path,
    names: &[S],
) -> Result<AbiExported, BootstrapError> {
    let book_path = config.paths.address_book_in(root);
    let book = AddressBook::read(&book_path)?;
    let store = ArtifactStore::new(config.paths.artifacts_dir_in(root));

    let bundle = if names.is_empty() {
        let all: Vec<&str> = book.names().collect();
        AbiBundle::build(&book, &book_path, &store, &all)?
    } else {
        AbiBundle::build(&book, &book_path, &store, names)?
    };

    let path = config.paths.abi_bundle_in(root);
    bundle.write(&path)?;
    tracing::info!(path = %path.display(), contracts = bundle.len(), "abi bundle exported");

    Ok(AbiExported {
        path: path.display().to_string(),
        contracts: bundle.names().map(str::to_string).collect(),
    })
}
