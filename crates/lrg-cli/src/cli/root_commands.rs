use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the full governance bootstrap.
    Deploy(DeployArgs),
    /// Write the ABI bundle for address-book entries.
    ExportAbis(ExportAbisArgs),
    /// Register the configured attestation schema.
    RegisterSchema,
    /// Deploy the utility token alone.
    CreateToken,
    /// Show rider, driver, application and timelock balances.
    Balances,
    /// Queue the configured proposal on the governor.
    Queue,
    /// Cast the configured vote from the rider and driver accounts.
    Vote,
}

/// Arguments for `lrg deploy`.
#[derive(Clone, Debug, Args)]
pub struct DeployArgs {
    /// Run against an in-process simulated chain; nothing touches the node.
    #[arg(long)]
    pub dry_run: bool,

    /// Continue the latest journaled run instead of starting a new one.
    #[arg(long, conflicts_with = "dry_run")]
    pub resume: bool,
}

/// Arguments for `lrg export-abis`.
#[derive(Clone, Debug, Args)]
pub struct ExportAbisArgs {
    /// Contract names to export (default: every address-book entry).
    pub names: Vec<String>,
}
