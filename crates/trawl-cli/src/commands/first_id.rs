use trawl_config::TrawlConfig;
use trawl_core::args::parse_date_argument;

use crate::bootstrap;

pub async fn handle(datetime: &str, config: &TrawlConfig) -> anyhow::Result<()> {
    let from = parse_date_argument(datetime)?;
    let client = bootstrap::connect(config).await?;
    let log_id = client.first_log_id(from).await?;
    println!("LOG ID: {log_id}");
    Ok(())
}
