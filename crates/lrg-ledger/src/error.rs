//! Ledger error types for lrg-ledger.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing boundary files.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Filesystem access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file did not contain the expected JSON shape.
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The address book has no entry for a requested name.
    #[error("Address book {path} has no entry for '{name}'")]
    MissingEntry { path: PathBuf, name: String },

    /// No build artifact exists for a requested contract.
    #[error("No build artifact for '{name}' at {path}")]
    MissingArtifact { name: String, path: PathBuf },

    /// An artifact exists but its ABI or bytecode is unusable.
    #[error("Invalid artifact for '{name}': {reason}")]
    InvalidArtifact { name: String, reason: String },

    /// An address-book value is not an address.
    #[error("Address book entry '{name}' is not an address: '{value}'")]
    InvalidAddress { name: String, value: String },

    /// A journal record could not be interpreted.
    #[error("Journal {path}: {reason}")]
    Journal { path: PathBuf, reason: String },
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
