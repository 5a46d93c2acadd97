use anyhow::Context;
use trawl_config::TrawlConfig;
use trawl_core::Cursor;
use trawl_core::args::parse_log_id;
use trawl_db::LogStore;
use trawl_ingest::{IngestReport, Ingestor};

use crate::bootstrap;

pub async fn handle(log_id: Option<&str>, config: &TrawlConfig) -> anyhow::Result<()> {
    let explicit = log_id.map(parse_log_id).transpose()?;

    let store = LogStore::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open log store at {}", config.database.path))?;

    let start = resolve_start(explicit, &store).await?;
    tracing::info!(log_id = %start, "resolved starting marker");

    let client = bootstrap::connect(config).await?;
    let ingestor = Ingestor::new(client, store, config.ingest.page_size);
    let report = ingestor.run(Cursor::start(start)).await?;

    println!("{}", summary_line(&report));
    Ok(())
}

/// Use the explicit id if given, otherwise the sink's newest entry.
async fn resolve_start(explicit: Option<String>, store: &LogStore) -> anyhow::Result<String> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    store
        .latest_log_id()
        .await
        .context("failed to read checkpoint")?
        .context("log store is empty; pass a starting log id (see `trawl first-id`)")
}

fn summary_line(report: &IngestReport) -> String {
    format!(
        "Completed: {} new logs ({} already stored) across {} pages",
        report.inserted, report.duplicates, report.pages
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use trawl_core::LogEntry;

    use super::*;

    async fn store_with(ids: &[&str]) -> LogStore {
        let store = LogStore::open_local(":memory:").await.unwrap();
        for (minute, id) in (0..).zip(ids) {
            let ts = Utc.with_ymd_and_hms(2024, 11, 14, 12, minute, 0).unwrap();
            store.upsert(&LogEntry::new(*id, ts, "s").unwrap()).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn explicit_log_id_wins_over_checkpoint() {
        let store = store_with(&["100", "101"]).await;
        assert_eq!(
            resolve_start(Some("42".into()), &store).await.unwrap(),
            "42"
        );
    }

    #[tokio::test]
    async fn invalid_log_id_fails_before_store_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trawl.db");
        let mut config = TrawlConfig::default();
        config.database.path = path.to_str().unwrap().to_string();

        let err = handle(Some("12a4"), &config).await.unwrap_err();
        assert!(err.to_string().contains("invalid log ID '12a4'"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn checkpoint_is_newest_stored_entry() {
        let store = store_with(&["100", "101", "102"]).await;
        assert_eq!(resolve_start(None, &store).await.unwrap(), "102");
    }

    #[tokio::test]
    async fn empty_store_without_id_is_an_error() {
        let store = store_with(&[]).await;
        let err = resolve_start(None, &store).await.unwrap_err();
        assert!(err.to_string().contains("log store is empty"));
    }

    #[test]
    fn summary_reports_counts() {
        let report = IngestReport {
            pages: 3,
            fetched: 5,
            inserted: 4,
            duplicates: 1,
            last_log_id: Some("9".into()),
        };
        assert_eq!(
            summary_line(&report),
            "Completed: 4 new logs (1 already stored) across 3 pages"
        );
    }
}
