use lrg_bootstrap::ops;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lrg queue`.
pub async fn handle_queue(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let chain = ctx.connect()?;
    let queued = ops::queue_proposal(&chain, &ctx.config, ctx.root()).await?;
    output(&queued, flags.format)
}

/// Handle `lrg vote`.
pub async fn handle_vote(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let chain = ctx.connect()?;
    let cast = ops::cast_votes(&chain, &ctx.config, ctx.root()).await?;
    output(&cast, flags.format)
}
