use trawl_config::TrawlConfig;

use crate::cli::Commands;

pub mod first_id;
pub mod ingest;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: Commands, config: &TrawlConfig) -> anyhow::Result<()> {
    match command {
        Commands::FirstId { datetime } => first_id::handle(&datetime, config).await,
        Commands::Ingest { log_id } => ingest::handle(log_id.as_deref(), config).await,
    }
}
