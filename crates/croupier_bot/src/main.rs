//! Croupier CLI binary.
//!
//! - `serve` answers chat callbacks over HTTP
//! - `post` runs a single command, for schedulers and manual use
//! - `migrate` prepares the ledger database

use anyhow::Context;
use clap::Parser;
use croupier_bot::{CroupierConfig, ServerState, build_pipeline, open_database, serve};
use croupier_core::init_tracing;
use std::sync::Arc;
use tracing::info;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let overrides = cli.overrides();

    let config = CroupierConfig::load(cli.config.as_deref(), &overrides)
        .context("loading configuration")?;

    init_tracing(*config.log_format(), "info")
        .map_err(|e| anyhow::anyhow!("initializing tracing: {}", e))?;

    match cli.command {
        Commands::Migrate => {
            open_database(&config)
                .await
                .context("migrating ledger database")?;
            info!("Migrations complete");
        }

        Commands::Post { search } => {
            config.validate()?;
            let pipeline = build_pipeline(&config).await?;
            let command = std::iter::once(config.keyword().clone())
                .chain(search)
                .collect::<Vec<_>>()
                .join(" ");
            let outcome = pipeline.handle(&command).await;
            println!("{}", outcome);
        }

        Commands::Serve { .. } => {
            config.validate()?;
            let pipeline = Arc::new(build_pipeline(&config).await?);
            serve(
                ServerState::new(pipeline),
                config.server().host(),
                *config.server().port(),
            )
            .await?;
        }
    }

    Ok(())
}
