use lrg_bootstrap::ops;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportAbisArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lrg export-abis`.
pub fn handle(args: &ExportAbisArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let exported = ops::export_abis(&ctx.config, ctx.root(), &args.names)?;
    output(&exported, flags.format)
}
