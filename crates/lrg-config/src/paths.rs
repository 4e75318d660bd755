//! Boundary file locations.
//!
//! Relative paths resolve against the project root passed to [`PathsConfig::resolve`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_address_book() -> String {
    String::from("scripts/addresses.json")
}

fn default_artifacts_dir() -> String {
    String::from("artifacts/contracts")
}

fn default_abi_bundle() -> String {
    String::from("contractAbis.json")
}

fn default_journal_dir() -> String {
    String::from(".literide/journal")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Address Ledger file (flat JSON object).
    #[serde(default = "default_address_book")]
    pub address_book: String,

    /// Hardhat artifacts root; artifacts live at `<dir>/<Name>.sol/<Name>.json`.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,

    /// ABI bundle written by `lrg export-abis`.
    #[serde(default = "default_abi_bundle")]
    pub abi_bundle: String,

    /// Directory of per-run JSONL phase journals.
    #[serde(default = "default_journal_dir")]
    pub journal_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            address_book: default_address_book(),
            artifacts_dir: default_artifacts_dir(),
            abi_bundle: default_abi_bundle(),
            journal_dir: default_journal_dir(),
        }
    }
}

impl PathsConfig {
    /// Resolve a configured path against `root`. Absolute paths are kept as-is.
    #[must_use]
    pub fn resolve(root: &Path, configured: &str) -> PathBuf {
        root.join(configured)
    }

    #[must_use]
    pub fn address_book_in(&self, root: &Path) -> PathBuf {
        Self::resolve(root, &self.address_book)
    }

    #[must_use]
    pub fn artifacts_dir_in(&self, root: &Path) -> PathBuf {
        Self::resolve(root, &self.artifacts_dir)
    }

    #[must_use]
    pub fn abi_bundle_in(&self, root: &Path) -> PathBuf {
        Self::resolve(root, &self.abi_bundle)
    }

    #[must_use]
    pub fn journal_dir_in(&self, root: &Path) -> PathBuf {
        Self::resolve(root, &self.journal_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_under_root() {
        let config = PathsConfig::default();
        let root = Path::new("/work/literide");
        assert_eq!(
            config.address_book_in(root),
            PathBuf::from("/work/literide/scripts/addresses.json")
        );
        assert_eq!(
            config.artifacts_dir_in(root),
            PathBuf::from("/work/literide/artifacts/contracts")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = PathsConfig {
            abi_bundle: "/tmp/abis.json".into(),
            ..Default::default()
        };
        assert_eq!(
            config.abi_bundle_in(Path::new("/work")),
            PathBuf::from("/tmp/abis.json")
        );
    }
}
