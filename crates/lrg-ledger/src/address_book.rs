//! Address Ledger: the persisted name → address mapping.
//!
//! The file is a flat JSON object pretty-printed with two-space indentation.
//! Writes replace the whole file: the new content goes to a temporary file in
//! the same directory, the current file (if any) is copied to `<name>.prev`,
//! and the temporary file is renamed over the target.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use ethers::types::Address;
use lrg_core::contracts::checksum;
use tempfile::NamedTempFile;

use crate::error::LedgerError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    entries: BTreeMap<String, String>,
}

impl AddressBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `address` under `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, address: Address) {
        self.entries.insert(name.into(), checksum(address));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Raw string value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Address stored under `name`.
    ///
    /// # Errors
    ///
    /// `MissingEntry` when `name` is absent, `InvalidAddress` when its value
    /// does not parse. `path` only labels the error.
    pub fn resolve(&self, path: &Path, name: &str) -> Result<Address, LedgerError> {
        let value = self.get(name).ok_or_else(|| LedgerError::MissingEntry {
            path: path.to_path_buf(),
            name: name.to_string(),
        })?;
        value
            .parse::<Address>()
            .map_err(|_| LedgerError::InvalidAddress {
                name: name.to_string(),
                value: value.to_string(),
            })
    }

    /// Read the ledger at `path`.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Json` if it is not a flat object of strings.
    pub fn read(path: &Path) -> Result<Self, LedgerError> {
        let content = std::fs::read_to_string(path).map_err(|e| LedgerError::io(path, e))?;
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| LedgerError::json(path, e))?;
        Ok(Self { entries })
    }

    /// Serialized form, as written to disk.
    ///
    /// # Errors
    ///
    /// Only fails if serde cannot render the map, which string maps never do.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Replace the ledger at `path` with this book.
    ///
    /// # Errors
    ///
    /// Returns `Io` on any filesystem failure. On error the previous file is
    /// left in place.
    pub fn write(&self, path: &Path) -> Result<(), LedgerError> {
        let dir = parent_dir(path);
        std::fs::create_dir_all(&dir).map_err(|e| LedgerError::io(&dir, e))?;

        let rendered = self.render().map_err(|e| LedgerError::json(path, e))?;
        let mut staged = NamedTempFile::new_in(&dir).map_err(|e| LedgerError::io(&dir, e))?;
        staged
            .write_all(rendered.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| LedgerError::io(staged.path(), e))?;

        if path.exists() {
            let previous = previous_path(path);
            std::fs::copy(path, &previous).map_err(|e| LedgerError::io(&previous, e))?;
        }

        staged
            .persist(path)
            .map_err(|e| LedgerError::io(path, e.error))?;

        tracing::debug!(path = %path.display(), entries = self.len(), "address book written");
        Ok(())
    }
}

impl FromIterator<(String, Address)> for AddressBook {
    fn from_iter<I: IntoIterator<Item = (String, Address)>>(iter: I) -> Self {
        let mut book = Self::new();
        for (name, address) in iter {
            book.insert(name, address);
        }
        book
    }
}

/// Location of the retained previous ledger for `path`.
#[must_use]
pub fn previous_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".prev");
    path.with_file_name(name)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
