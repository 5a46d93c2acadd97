//! # trawl-ingest
//!
//! The ingestion loop: drives a [`PageSource`] page by page and writes every
//! entry into a [`LogSink`] until the stream is exhausted.
//!
//! ```text
//! Fetching ──page with entries──▶ Inserting ──all upserted──▶ Advancing
//!    │  ▲                            │                          │
//!    │  └──────── next cursor ───────┼──────────────────────────┘
//!    │                               │                          │ no next cursor
//!    ├── empty page ──▶ Done ◀───────┼──────────────────────────┘
//!    └── fetch error ─▶ Failed ◀─────┘ insert error
//! ```
//!
//! Everything is strictly sequential: one request or one insert in flight
//! at a time. The continuation cursor lives only for the duration of a run;
//! restart safety comes from the sink's idempotent upsert.

mod error;
mod seams;

pub use error::IngestError;
pub use seams::{LogSink, PageSource};

use trawl_core::Cursor;
use trawl_db::UpsertOutcome;
use trawl_source::Page;

/// Totals for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Page fetches performed, including the final empty page if any.
    pub pages: u64,
    /// Entries upserted, new or duplicate.
    pub fetched: u64,
    /// Entries that were new to the sink.
    pub inserted: u64,
    /// Entries the sink already held.
    pub duplicates: u64,
    /// Id of the last entry upserted.
    pub last_log_id: Option<String>,
}

#[derive(Debug)]
enum State {
    Fetching(Cursor),
    Inserting(Page),
    Advancing(Option<Cursor>),
    Done,
}

impl State {
    const fn name(&self) -> &'static str {
        match self {
            Self::Fetching(_) => "fetching",
            Self::Inserting(_) => "inserting",
            Self::Advancing(_) => "advancing",
            Self::Done => "done",
        }
    }
}

/// Drives one source into one sink.
pub struct Ingestor<S, K> {
    source: S,
    sink: K,
    page_size: u32,
}

impl<S: PageSource, K: LogSink> Ingestor<S, K> {
    #[must_use]
    pub const fn new(source: S, sink: K, page_size: u32) -> Self {
        Self {
            source,
            sink,
            page_size,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Run the loop from `initial` until the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Fetch`] on the first failed page fetch and
    /// [`IngestError::Insert`] on the first rejected write. No further
    /// fetches happen after either.
    pub async fn run(&self, initial: Cursor) -> Result<IngestReport, IngestError> {
        tracing::info!(cursor = %initial, page_size = self.page_size, "starting ingestion");
        let mut report = IngestReport::default();
        let mut state = State::Fetching(initial);

        loop {
            let next = match state {
                State::Fetching(cursor) => {
                    let page = self
                        .source
                        .fetch_page(&cursor, self.page_size)
                        .await
                        .map_err(|source| {
                            tracing::error!(%cursor, error = %source, "page fetch failed");
                            IngestError::Fetch {
                                cursor: cursor.clone(),
                                progress: report.clone(),
                                source,
                            }
                        })?;
                    report.pages += 1;
                    if page.is_empty() {
                        State::Done
                    } else {
                        State::Inserting(page)
                    }
                }
                State::Inserting(page) => {
                    self.insert_page(&page, &mut report).await?;
                    State::Advancing(page.next)
                }
                State::Advancing(Some(cursor)) => State::Fetching(cursor),
                State::Advancing(None) => State::Done,
                State::Done => break,
            };
            tracing::debug!(state = next.name(), pages = report.pages, "transition");
            state = next;
        }

        tracing::info!(
            pages = report.pages,
            inserted = report.inserted,
            duplicates = report.duplicates,
            "ingestion complete"
        );
        Ok(report)
    }

    /// Upsert a page in order, stopping at the first failure.
    async fn insert_page(&self, page: &Page, report: &mut IngestReport) -> Result<(), IngestError> {
        for entry in &page.entries {
            let outcome = self.sink.upsert(entry).await.map_err(|source| {
                tracing::error!(log_id = %entry.id, error = %source, "insert failed");
                IngestError::Insert {
                    log_id: entry.id.clone(),
                    progress: report.clone(),
                    source,
                }
            })?;
            match outcome {
                UpsertOutcome::Inserted => report.inserted += 1,
                UpsertOutcome::Duplicate => report.duplicates += 1,
            }
            report.fetched += 1;
            report.last_log_id = Some(entry.id.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use trawl_core::LogEntry;
    use trawl_db::DatabaseError;
    use trawl_source::SourceError;

    use super::*;

    /// Replays canned pages and records every cursor it is asked for.
    #[derive(Default)]
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<Page, SourceError>>>,
        requests: Mutex<Vec<(Cursor, u32)>>,
    }

    impl ScriptedSource {
        fn new(pages: impl IntoIterator<Item = Result<Page, SourceError>>) -> Self {
            Self {
                pages: Mutex::new(pages.into_iter().collect()),
                requests: Mutex::default(),
            }
        }

        fn requests(&self) -> Vec<(Cursor, u32)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, cursor: &Cursor, page_size: u32) -> Result<Page, SourceError> {
            self.requests.lock().unwrap().push((cursor.clone(), page_size));
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetched past the end of the script")
        }
    }

    /// In-memory sink keyed on id, optionally failing on one id.
    #[derive(Default)]
    struct MemorySink {
        rows: Mutex<HashMap<String, LogEntry>>,
        order: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    impl MemorySink {
        fn failing_on(id: &str) -> Self {
            Self {
                fail_on: Some(id.to_string()),
                ..Self::default()
            }
        }

        fn ids(&self) -> Vec<String> {
            self.order.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LogSink for MemorySink {
        async fn upsert(&self, entry: &LogEntry) -> Result<UpsertOutcome, DatabaseError> {
            if self.fail_on.as_deref() == Some(entry.id.as_str()) {
                return Err(DatabaseError::Query("disk full".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&entry.id) {
                return Ok(UpsertOutcome::Duplicate);
            }
            rows.insert(entry.id.clone(), entry.clone());
            self.order.lock().unwrap().push(entry.id.clone());
            Ok(UpsertOutcome::Inserted)
        }
    }

    fn entry(id: &str) -> LogEntry {
        let ts = Utc.with_ymd_and_hms(2024, 11, 14, 12, 0, 0).unwrap();
        LogEntry::new(id, ts, "s").unwrap()
    }

    fn page(ids: &[&str], next: Option<&str>) -> Result<Page, SourceError> {
        Ok(Page {
            entries: ids.iter().map(|id| entry(id)).collect(),
            next: next.map(Cursor::continuation),
        })
    }

    #[tokio::test]
    async fn stops_after_page_without_next_link() {
        let source = ScriptedSource::new([
            page(&["100", "101"], Some("https://api/p2")),
            page(&["102"], None),
        ]);
        let ingestor = Ingestor::new(source, MemorySink::default(), 2);

        let report = ingestor.run(Cursor::start("100")).await.unwrap();

        assert_eq!(ingestor.sink().ids(), ["100", "101", "102"]);
        assert_eq!(
            ingestor.source().requests(),
            vec![(Cursor::start("100"), 2), (Cursor::continuation("https://api/p2"), 2)]
        );
        assert_eq!(
            report,
            IngestReport {
                pages: 2,
                fetched: 3,
                inserted: 3,
                duplicates: 0,
                last_log_id: Some("102".into()),
            }
        );
    }

    #[tokio::test]
    async fn empty_page_ends_the_run() {
        for non_empty in 0..4 {
            let mut script: Vec<_> = (0..non_empty)
                .map(|i| {
                    let id = i.to_string();
                    let next = format!("https://api/p{}", i + 1);
                    page(&[id.as_str()], Some(next.as_str()))
                })
                .collect();
            script.push(page(&[], Some("https://api/never")));
            let ingestor = Ingestor::new(ScriptedSource::new(script), MemorySink::default(), 10);

            let report = ingestor.run(Cursor::start("0")).await.unwrap();
            assert_eq!(ingestor.source().requests().len(), non_empty + 1);
            assert_eq!(report.pages, u64::try_from(non_empty + 1).unwrap());
            assert_eq!(report.fetched, u64::try_from(non_empty).unwrap());
        }
    }

    #[tokio::test]
    async fn continuation_supersedes_start_marker() {
        let source = ScriptedSource::new([
            page(&["1"], Some("https://api/a")),
            page(&["2"], Some("https://api/b")),
            page(&[], None),
        ]);
        let ingestor = Ingestor::new(source, MemorySink::default(), 5);
        ingestor.run(Cursor::start("1")).await.unwrap();

        let cursors: Vec<Cursor> = ingestor
            .source()
            .requests()
            .into_iter()
            .map(|(cursor, _)| cursor)
            .collect();
        assert_eq!(cursors[0], Cursor::start("1"));
        assert!(cursors[1..].iter().all(Cursor::is_continuation));
        assert_eq!(cursors[2], Cursor::continuation("https://api/b"));
    }

    #[tokio::test]
    async fn fetch_failure_aborts_with_progress() {
        let source = ScriptedSource::new([
            page(&["1", "2"], Some("https://api/next")),
            Err(SourceError::Api {
                status: 503,
                message: "unavailable".into(),
            }),
        ]);
        let ingestor = Ingestor::new(source, MemorySink::default(), 2);

        let err = ingestor.run(Cursor::start("1")).await.unwrap_err();
        match &err {
            IngestError::Fetch { cursor, source, .. } => {
                assert_eq!(*cursor, Cursor::continuation("https://api/next"));
                assert!(matches!(source, SourceError::Api { status: 503, .. }));
            }
            other => panic!("expected Fetch, got {other:?}"),
        }
        assert_eq!(err.progress().pages, 1);
        assert_eq!(err.progress().inserted, 2);
        assert_eq!(ingestor.source().requests().len(), 2);
    }

    #[tokio::test]
    async fn insert_failure_keeps_prefix_and_stops_fetching() {
        let source = ScriptedSource::new([
            page(&["1", "2", "3"], Some("https://api/next")),
            page(&["4"], None),
        ]);
        let ingestor = Ingestor::new(source, MemorySink::failing_on("2"), 3);

        let err = ingestor.run(Cursor::start("1")).await.unwrap_err();
        match &err {
            IngestError::Insert { log_id, .. } => assert_eq!(log_id, "2"),
            other => panic!("expected Insert, got {other:?}"),
        }
        assert_eq!(ingestor.sink().ids(), ["1"]);
        assert_eq!(err.progress().fetched, 1);
        assert_eq!(ingestor.source().requests().len(), 1);
    }

    #[tokio::test]
    async fn rerun_over_stored_entries_counts_duplicates() {
        let sink = MemorySink::default();
        for id in ["100", "101"] {
            sink.upsert(&entry(id)).await.unwrap();
        }
        let source = ScriptedSource::new([page(&["100", "101", "102"], None)]);
        let ingestor = Ingestor::new(source, sink, 100);

        let report = ingestor.run(Cursor::start("100")).await.unwrap();
        assert_eq!((report.inserted, report.duplicates), (1, 2));
        assert_eq!(ingestor.sink().ids(), ["100", "101", "102"]);
    }

    #[tokio::test]
    async fn first_page_empty_is_a_clean_noop() {
        let source = ScriptedSource::new([page(&[], None)]);
        let ingestor = Ingestor::new(source, MemorySink::default(), 100);
        let report = ingestor.run(Cursor::start("999")).await.unwrap();
        assert_eq!(
            report,
            IngestReport {
                pages: 1,
                ..IngestReport::default()
            }
        );
    }
}
