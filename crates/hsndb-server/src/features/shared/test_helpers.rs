//! Test stores and fixtures
//!
//! ```rust,ignore
//! use crate::features::shared::test_helpers::{sample_store, RecordingStore};
//!
//! let store = RecordingStore::new(sample_store());
//! // ... run a search ...
//! assert_eq!(store.protein_calls(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hsndb_common::types::{CategoryAssociation, ProteinRecord};

use crate::db::{
    CategoryFilter, CategoryLookup, DatabaseStats, DbError, DbResult, InMemoryProteinStore,
    ProteinFilter, ProteinLookup, ProteinStore,
};

const SAMPLE_DATASET: &str = include_str!("../../../../../fixtures/sample.json");

/// In-memory store loaded with the bundled sample dataset
pub fn sample_store() -> InMemoryProteinStore {
    InMemoryProteinStore::from_json_str(SAMPLE_DATASET).expect("bundled fixture must parse")
}

/// Store wrapper that counts lookups and can fail or stall on demand
pub struct RecordingStore {
    inner: Option<InMemoryProteinStore>,
    protein_calls: AtomicUsize,
    category_calls: AtomicUsize,
    delays: Vec<(String, Duration)>,
}

impl RecordingStore {
    pub fn new(inner: InMemoryProteinStore) -> Self {
        Self {
            inner: Some(inner),
            protein_calls: AtomicUsize::new(0),
            category_calls: AtomicUsize::new(0),
            delays: Vec::new(),
        }
    }

    /// Every lookup returns [`DbError::Unavailable`]
    pub fn failing() -> Self {
        Self {
            inner: None,
            ..Self::new(InMemoryProteinStore::default())
        }
    }

    /// Sleep before answering lookups whose search text equals `text`
    pub fn with_delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.push((text.to_string(), delay));
        self
    }

    pub fn protein_calls(&self) -> usize {
        self.protein_calls.load(Ordering::SeqCst)
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.protein_calls() + self.category_calls()
    }

    async fn stall(&self, text: Option<&str>) {
        let Some(text) = text else { return };
        if let Some((_, delay)) = self.delays.iter().find(|(t, _)| t == text) {
            tokio::time::sleep(*delay).await;
        }
    }

    fn inner(&self) -> DbResult<&InMemoryProteinStore> {
        self.inner
            .as_ref()
            .ok_or_else(|| DbError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl ProteinStore for RecordingStore {
    fn backend(&self) -> &'static str {
        "recording"
    }

    async fn find_proteins(&self, lookup: &ProteinLookup) -> DbResult<Vec<ProteinRecord>> {
        self.protein_calls.fetch_add(1, Ordering::SeqCst);
        let text = match &lookup.filter {
            ProteinFilter::Contains { text, .. } => Some(text.as_str()),
            _ => None,
        };
        self.stall(text).await;
        self.inner()?.find_proteins(lookup).await
    }

    async fn find_categories(
        &self,
        lookup: &CategoryLookup,
    ) -> DbResult<Vec<CategoryAssociation>> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        let text = match &lookup.filter {
            CategoryFilter::LabelContains(text) => Some(text.as_str()),
            CategoryFilter::UniprotIdEquals(_) => None,
        };
        self.stall(text).await;
        self.inner()?.find_categories(lookup).await
    }

    async fn stats(&self) -> DbResult<DatabaseStats> {
        self.inner()?.stats().await
    }

    async fn ping(&self) -> DbResult<()> {
        self.inner()?.ping().await
    }
}
