//! Keyword search over protein records
//!
//! Maps a search field and free-text query onto one store lookup (or the
//! two-step category join), and folds store failures into
//! [`SearchOutcome::Failed`] so the page shows an explicit error state
//! instead of a hard failure.

use hsndb_common::types::{ProteinRecord, SearchField};
use mediator::Request;
use serde::{Deserialize, Serialize};

use super::category_search;
use crate::config::SearchConfig;
use crate::db::{DbResult, ProteinColumn, ProteinFilter, ProteinLookup, ProteinStore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchProteinsQuery {
    /// Wire name or form label of the field; defaults to "any"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub q: String,
    /// Client sequence number, echoed back so stale responses can be dropped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

/// One row of a search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub protein: ProteinRecord,
    /// Category labels that matched the search term (category search only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl From<ProteinRecord> for SearchResult {
    fn from(protein: ProteinRecord) -> Self {
        Self {
            protein,
            categories: None,
        }
    }
}

/// Result of running one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Input below the length threshold; nothing was sent to the store
    Skipped,
    Results(Vec<SearchResult>),
    /// The store failed; no results are available
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Skipped,
    Ok,
    Failed,
}

impl SearchOutcome {
    pub fn status(&self) -> SearchStatus {
        match self {
            SearchOutcome::Skipped => SearchStatus::Skipped,
            SearchOutcome::Results(_) => SearchStatus::Ok,
            SearchOutcome::Failed { .. } => SearchStatus::Failed,
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchOutcome::Results(results) => results,
            SearchOutcome::Skipped | SearchOutcome::Failed { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProteinsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
    pub field: SearchField,
    pub query: String,
    pub status: SearchStatus,
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchProteinsResponse {
    fn new(query: &SearchProteinsQuery, field: SearchField, outcome: SearchOutcome) -> Self {
        let status = outcome.status();
        let (results, error) = match outcome {
            SearchOutcome::Results(results) => (results, None),
            SearchOutcome::Failed { message } => (Vec::new(), Some(message)),
            SearchOutcome::Skipped => (Vec::new(), None),
        };

        Self {
            seq: query.seq,
            field,
            query: query.q.clone(),
            status,
            results,
            error,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchProteinsError {
    #[error(
        "Invalid search field: {0}. Must be one of 'any', 'protein_name', 'gene_name', \
         'external_id', 'site_count', 'category'"
    )]
    InvalidField(String),
}

impl Request<Result<SearchProteinsResponse, SearchProteinsError>> for SearchProteinsQuery {}

impl SearchProteinsQuery {
    pub fn new(field: SearchField, q: impl Into<String>) -> Self {
        Self {
            field: Some(field.as_str().to_string()),
            q: q.into(),
            seq: None,
        }
    }

    pub fn field(&self) -> Result<SearchField, SearchProteinsError> {
        match self.field.as_deref().map(str::trim) {
            None | Some("") => Ok(SearchField::default()),
            Some(raw) => raw
                .parse()
                .map_err(|_| SearchProteinsError::InvalidField(raw.to_string())),
        }
    }
}

#[tracing::instrument(skip(store, settings), fields(q = %query.q, field = ?query.field, seq = ?query.seq))]
pub async fn handle(
    store: &dyn ProteinStore,
    settings: &SearchConfig,
    query: SearchProteinsQuery,
) -> Result<SearchProteinsResponse, SearchProteinsError> {
    let field = query.field()?;
    let outcome = search(store, settings, field, &query.q).await;
    Ok(SearchProteinsResponse::new(&query, field, outcome))
}

/// Run one keyword search.
///
/// Text shorter than `settings.min_query_len` (after trimming) is skipped
/// without touching the store. Store errors are logged and reported as
/// [`SearchOutcome::Failed`].
pub async fn search(
    store: &dyn ProteinStore,
    settings: &SearchConfig,
    field: SearchField,
    text: &str,
) -> SearchOutcome {
    let term = text.trim();
    if term.chars().count() < settings.min_query_len {
        return SearchOutcome::Skipped;
    }

    let result = match field {
        SearchField::Category => category_search::search_by_category(store, settings, term).await,
        SearchField::SiteCount => match term.parse::<i32>() {
            Ok(count) if count >= 0 => run_lookup(
                store,
                ProteinLookup::new(
                    ProteinFilter::SiteCountEquals(count),
                    ProteinColumn::ProteinName,
                    settings.result_limit,
                ),
            )
            .await,
            _ => {
                tracing::debug!(term, "Site count query is not a non-negative integer");
                Ok(Vec::new())
            },
        },
        _ => run_lookup(store, text_lookup(field, term, settings.result_limit)).await,
    };

    match result {
        Ok(results) => {
            tracing::debug!(%field, count = results.len(), "Search completed");
            SearchOutcome::Results(results)
        },
        Err(e) => {
            tracing::error!(%field, term, error = %e, backend = store.backend(), "Search failed");
            SearchOutcome::Failed {
                message: "Search is temporarily unavailable".to_string(),
            }
        },
    }
}

/// Lookup for the substring-matched fields.
///
/// `Any` covers protein name and UniProt ID only.
fn text_lookup(field: SearchField, term: &str, limit: i64) -> ProteinLookup {
    let (columns, order_by) = match field {
        SearchField::ProteinName => (vec![ProteinColumn::ProteinName], ProteinColumn::ProteinName),
        SearchField::GeneName => (vec![ProteinColumn::GeneName], ProteinColumn::GeneName),
        SearchField::ExternalId => (vec![ProteinColumn::UniprotId], ProteinColumn::UniprotId),
        _ => (
            vec![ProteinColumn::ProteinName, ProteinColumn::UniprotId],
            ProteinColumn::ProteinName,
        ),
    };

    ProteinLookup::new(
        ProteinFilter::Contains {
            columns,
            text: term.to_string(),
        },
        order_by,
        limit,
    )
}

async fn run_lookup(store: &dyn ProteinStore, lookup: ProteinLookup) -> DbResult<Vec<SearchResult>> {
    let records = store.find_proteins(&lookup).await?;
    Ok(records.into_iter().map(SearchResult::from).collect())
}
