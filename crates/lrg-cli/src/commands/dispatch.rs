use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Deploy(args) => commands::deploy::handle(&args, ctx, flags).await,
        Commands::ExportAbis(args) => commands::export_abis::handle(&args, ctx, flags),
        Commands::RegisterSchema => commands::register_schema::handle(ctx, flags).await,
        Commands::CreateToken => commands::create_token::handle(ctx, flags).await,
        Commands::Balances => commands::balances::handle(ctx, flags).await,
        Commands::Queue => commands::proposal::handle_queue(ctx, flags).await,
        Commands::Vote => commands::proposal::handle_vote(ctx, flags).await,
    }
}
