use lrg_bootstrap::ops;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lrg create-token`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let chain = ctx.connect()?;
    let created = ops::create_token(&chain, &ctx.config, ctx.root()).await?;
    output(&created, flags.format)
}
