//! Debounced, last-write-wins search session
//!
//! A session models one search box. Every keystroke calls
//! [`SearchSession::submit`], which waits out the debounce interval and only
//! queries the store if no newer input arrived in the meantime. Results are
//! published on a [`tokio::sync::watch`] channel; a result is accepted only
//! while its sequence number is the latest issued, so a slow response for
//! older input can never overwrite a newer one.
//!
//! The HTTP server does not hold sessions: each `/api/v1/search` request is
//! answered on its own and the search page script applies the same ordering
//! rule in the browser. This type is the library form of that rule for Rust
//! callers driving a search box directly, and is exercised by the tests below.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hsndb_common::types::SearchField;
use tokio::sync::watch;

use super::queries::{search, SearchOutcome};
use crate::config::SearchConfig;
use crate::db::ProteinStore;

/// What the results pane currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSnapshot {
    pub seq: u64,
    pub field: SearchField,
    pub query: String,
    pub outcome: SearchOutcome,
}

impl SearchSnapshot {
    fn empty(seq: u64, field: SearchField) -> Self {
        Self {
            seq,
            field,
            query: String::new(),
            outcome: SearchOutcome::Skipped,
        }
    }
}

pub struct SearchSession {
    store: Arc<dyn ProteinStore>,
    settings: SearchConfig,
    latest: AtomicU64,
    snapshots: watch::Sender<SearchSnapshot>,
}

impl SearchSession {
    pub fn new(store: Arc<dyn ProteinStore>, settings: SearchConfig) -> Self {
        let (snapshots, _) = watch::channel(SearchSnapshot::empty(0, SearchField::default()));
        Self {
            store,
            settings,
            latest: AtomicU64::new(0),
            snapshots,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Most recently issued sequence number
    pub fn latest_seq(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(self.settings.debounce_ms)
    }

    fn next_seq(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Submit new input and return its sequence number.
    ///
    /// Completes once the input has been searched and offered for
    /// publication, or dropped because newer input superseded it.
    pub async fn submit(&self, field: SearchField, text: &str) -> u64 {
        let seq = self.next_seq();

        tokio::time::sleep(self.debounce()).await;
        if self.latest_seq() != seq {
            tracing::trace!(seq, "Input superseded during debounce");
            return seq;
        }

        let outcome = search(self.store.as_ref(), &self.settings, field, text).await;
        let published = self.publish(SearchSnapshot {
            seq,
            field,
            query: text.to_string(),
            outcome,
        });

        if !published {
            tracing::debug!(seq, latest = self.latest_seq(), "Discarded stale search result");
        }
        seq
    }

    /// Empty the results pane and discard every in-flight search.
    pub fn clear(&self) -> u64 {
        let seq = self.next_seq();
        let field = self.snapshots.borrow().field;
        self.publish(SearchSnapshot::empty(seq, field));
        seq
    }

    fn publish(&self, snapshot: SearchSnapshot) -> bool {
        let latest = self.latest_seq();
        self.snapshots.send_if_modified(|current| {
            if snapshot.seq == latest && snapshot.seq > current.seq {
                *current = snapshot;
                true
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{sample_store, RecordingStore};

    fn session(store: RecordingStore) -> (Arc<RecordingStore>, SearchSession) {
        let store = Arc::new(store);
        let session = SearchSession::new(store.clone(), SearchConfig::default());
        (store, session)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_input_is_debounced() {
        let (store, session) = session(RecordingStore::new(sample_store()));

        let (first, second, third) = tokio::join!(
            session.submit(SearchField::ProteinName, "ki"),
            session.submit(SearchField::ProteinName, "kin"),
            session.submit(SearchField::ProteinName, "kinase"),
        );

        assert_eq!((first, second, third), (1, 2, 3));
        assert_eq!(store.calls(), 1);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.seq, 3);
        assert_eq!(snapshot.query, "kinase");
        assert_eq!(snapshot.outcome.results().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_response_is_discarded() {
        let (store, session) = session(
            RecordingStore::new(sample_store()).with_delay("kinase", Duration::from_secs(1)),
        );
        let mut rx = session.subscribe();

        let slow = session.submit(SearchField::ProteinName, "kinase");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            session.submit(SearchField::ProteinName, "protein").await
        };
        tokio::join!(slow, fast);

        // Both inputs reached the store
        assert_eq!(store.calls(), 2);

        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.seq, 2);
        assert_eq!(snapshot.query, "protein");
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_is_held_back_while_newer_input_debounces() {
        let (_store, session) = session(
            RecordingStore::new(sample_store()).with_delay("kinase", Duration::from_millis(100)),
        );

        let slow = session.submit(SearchField::ProteinName, "kinase");
        let check = async {
            // First search finishes at 350ms, second input is still debouncing
            tokio::time::sleep(Duration::from_millis(300)).await;
            let pending = session.submit(SearchField::GeneName, "BRCA");
            let probe = async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                session.snapshot().seq
            };
            tokio::join!(pending, probe).1
        };
        let (_, seq_seen_mid_flight) = tokio::join!(slow, check);

        assert_eq!(seq_seen_mid_flight, 0);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.seq, 2);
        assert_eq!(snapshot.field, SearchField::GeneName);
        assert_eq!(snapshot.outcome.results().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_discards_in_flight_search() {
        let (_store, session) = session(
            RecordingStore::new(sample_store()).with_delay("kinase", Duration::from_secs(1)),
        );

        let slow = session.submit(SearchField::ProteinName, "kinase");
        let clear = async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            session.clear()
        };
        let (_, cleared) = tokio::join!(slow, clear);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.seq, cleared);
        assert_eq!(snapshot.outcome, SearchOutcome::Skipped);
        assert!(snapshot.query.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_publishes_skipped() {
        let (store, session) = session(RecordingStore::new(sample_store()));
        session.submit(SearchField::Any, "k").await;

        assert_eq!(store.calls(), 0);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.seq, 1);
        assert_eq!(snapshot.outcome, SearchOutcome::Skipped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_failure_is_published_as_failed() {
        let (_store, session) = session(RecordingStore::failing());
        session.submit(SearchField::Category, "Breast").await;

        assert!(matches!(session.snapshot().outcome, SearchOutcome::Failed { .. }));
    }
}
