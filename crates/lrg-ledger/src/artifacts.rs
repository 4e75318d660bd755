//! Hardhat build artifacts.
//!
//! Artifacts live at `<root>/<Name>.sol/<Name>.json`. Only `abi` and
//! `bytecode` are read; everything else Hardhat writes is ignored.

use std::path::{Path, PathBuf};

use ethers::abi::Abi;
use ethers::types::Bytes;
use serde::Deserialize;

use crate::error::LedgerError;

/// One compiled contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub contract_name: String,
    pub abi: serde_json::Value,
    #[serde(default)]
    pub bytecode: String,
}

impl Artifact {
    /// Typed ABI.
    ///
    /// # Errors
    ///
    /// `InvalidArtifact` when the `abi` array is not a valid contract ABI.
    pub fn abi(&self) -> Result<Abi, LedgerError> {
        serde_json::from_value(self.abi.clone()).map_err(|e| LedgerError::InvalidArtifact {
            name: self.contract_name.clone(),
            reason: format!("abi: {e}"),
        })
    }

    /// Creation bytecode.
    ///
    /// # Errors
    ///
    /// `InvalidArtifact` when the bytecode is empty (interfaces, abstract
    /// contracts) or not hex.
    pub fn bytecode(&self) -> Result<Bytes, LedgerError> {
        let raw = self.bytecode.trim();
        if raw.is_empty() || raw == "0x" {
            return Err(LedgerError::InvalidArtifact {
                name: self.contract_name.clone(),
                reason: "no creation bytecode".to_string(),
            });
        }
        raw.parse::<Bytes>().map_err(|e| LedgerError::InvalidArtifact {
            name: self.contract_name.clone(),
            reason: format!("bytecode: {e}"),
        })
    }

    /// Names of the functions the ABI exposes, in ABI order.
    #[must_use]
    pub fn function_names(&self) -> Vec<String> {
        self.abi
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.get("type").and_then(|t| t.as_str()) == Some("function"))
                    .filter_map(|item| item.get("name").and_then(|n| n.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Read-only view over an artifacts directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the artifact for `name` is expected.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.sol")).join(format!("{name}.json"))
    }

    /// Load the artifact for `name`.
    ///
    /// # Errors
    ///
    /// `MissingArtifact` when the file does not exist, `Io` / `Json` when it
    /// cannot be read or parsed.
    pub fn load(&self, name: &str) -> Result<Artifact, LedgerError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(LedgerError::MissingArtifact {
                name: name.to_string(),
                path,
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| LedgerError::io(&path, e))?;
        let mut artifact: Artifact =
            serde_json::from_str(&content).map_err(|e| LedgerError::json(&path, e))?;
        if artifact.contract_name.is_empty() {
            artifact.contract_name = name.to_string();
        }
        tracing::trace!(name, path = %path.display(), "artifact loaded");
        Ok(artifact)
    }
}
