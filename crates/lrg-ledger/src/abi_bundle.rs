//! ABI bundle: address-book entries joined with their artifact ABIs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::address_book::AddressBook;
use crate::artifacts::ArtifactStore;
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiEntry {
    pub address: String,
    pub abi: serde_json::Value,
}

/// Contract name → `{address, abi}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbiBundle {
    entries: BTreeMap<String, AbiEntry>,
}

impl AbiBundle {
    /// Join `names` against the address book and the artifact store.
    ///
    /// No partial bundle is ever produced: the first name missing from either
    /// side fails the whole build.
    ///
    /// # Errors
    ///
    /// `MissingEntry` for a name absent from the book, `MissingArtifact` (or a
    /// read error) for a name without an artifact.
    pub fn build<S: AsRef<str>>(
        book: &AddressBook,
        book_path: &Path,
        store: &ArtifactStore,
        names: &[S],
    ) -> Result<Self, LedgerError> {
        let mut entries = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            let address = book.get(name).ok_or_else(|| LedgerError::MissingEntry {
                path: book_path.to_path_buf(),
                name: name.to_string(),
            })?;
            let artifact = store.load(name)?;
            entries.insert(
                name.to_string(),
                AbiEntry {
                    address: address.to_string(),
                    abi: artifact.abi,
                },
            );
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AbiEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Write the bundle as compact JSON.
    ///
    /// # Errors
    ///
    /// `Io` on filesystem failure.
    pub fn write(&self, path: &Path) -> Result<(), LedgerError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
        }
        let rendered = serde_json::to_string(self).map_err(|e| LedgerError::json(path, e))?;
        std::fs::write(path, rendered).map_err(|e| LedgerError::io(path, e))?;
        tracing::debug!(path = %path.display(), contracts = self.len(), "abi bundle written");
        Ok(())
    }
}
