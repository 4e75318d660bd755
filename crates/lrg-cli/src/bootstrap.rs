use std::path::{Path, PathBuf};

use anyhow::Context;
use lrg_config::LrgConfig;

/// Project root: `--project` when given, otherwise the current directory.
pub fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);
        if explicit.is_dir() {
            return Ok(explicit);
        }
        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    std::env::current_dir().context("failed to read current directory")
}

/// Configuration for `root`, with its `.env` applied first.
pub fn load_config(root: &Path) -> anyhow::Result<LrgConfig> {
    LrgConfig::load_with_dotenv(root).context("failed to load configuration")
}
