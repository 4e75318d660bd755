use std::sync::Arc;

use anyhow::Context;
use lrg_bootstrap::{Bootstrap, BootstrapSettings};
use lrg_chain::SimulatedChain;
use lrg_chain::simulated::Blueprint;
use lrg_core::enums::ContractKind;
use lrg_core::responses::BootstrapReport;
use lrg_ledger::Journal;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DeployArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::PhaseProgress;

/// Handle `lrg deploy`.
pub async fn handle(args: &DeployArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = BootstrapSettings::from_config(&ctx.config, ctx.root())?;
    let progress = Arc::new(PhaseProgress::new());

    let report = if args.dry_run {
        dry_run(settings, Arc::clone(&progress)).await?
    } else {
        live(args, ctx, settings, Arc::clone(&progress)).await?
    };

    progress.finish_clear();
    output(&report, flags.format)
}

async fn live(
    args: &DeployArgs,
    ctx: &AppContext,
    settings: BootstrapSettings,
    progress: Arc<PhaseProgress>,
) -> anyhow::Result<BootstrapReport> {
    let chain = ctx.connect()?;
    let journal_dir = ctx.config.paths.journal_dir_in(ctx.root());

    let bootstrap = if args.resume {
        Bootstrap::resume(&chain, settings, &journal_dir)?
    } else {
        Bootstrap::new(&chain, settings, Journal::create(&journal_dir)?)
    };
    tracing::debug!(run = bootstrap.run_id(), resume = args.resume, "journal opened");

    Ok(bootstrap.with_observer(progress).run().await?)
}

/// Run the bootstrap against a simulated chain whose blueprints follow the
/// configured artifact names. The address book and journal go to a scratch
/// directory that is removed afterwards.
async fn dry_run(
    mut settings: BootstrapSettings,
    progress: Arc<PhaseProgress>,
) -> anyhow::Result<BootstrapReport> {
    let scratch = tempfile::tempdir().context("failed to create dry-run scratch directory")?;
    settings.address_book = scratch.path().join("addresses.json");

    let chain = ContractKind::ALL.iter().fold(
        SimulatedChain::default().with_accounts(settings.participants.clone().unwrap_or_default()),
        |chain, kind| chain.with_blueprint(settings.artifact(*kind), Blueprint::for_kind(*kind)),
    );
    let journal = Journal::create(&scratch.path().join("journal"))?;

    let mut report = Bootstrap::new(&chain, settings, journal)
        .dry_run(true)
        .with_observer(progress)
        .run()
        .await?;
    report.address_book = String::from("(dry run: not written)");
    Ok(report)
}
