use lrg_bootstrap::ops;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lrg register-schema`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let chain = ctx.connect()?;
    let registered = ops::register_schema(&chain, &ctx.config, ctx.root()).await?;
    output(&registered, flags.format)
}
