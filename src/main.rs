use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsprint::app::AppContext;
use newsprint::cli::{commands, Cli, Commands};
use newsprint::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?.with_overrides(&cli);
    config.validate()?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Run => {
            commands::run(ctx).await?;
        }
        Commands::Once => {
            commands::once(&ctx).await;
        }
        Commands::Sources => {
            commands::list_sources(&ctx);
        }
    }

    Ok(())
}
