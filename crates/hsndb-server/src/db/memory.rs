//! In-memory protein store
//!
//! Loads a JSON dataset of the form
//! `{"proteins": [ProteinRecord...], "categories": [CategoryAssociation...]}`
//! and answers lookups with the same semantics as the PostgreSQL store:
//! case-insensitive substring matches, ascending order with `hsn_id` as the
//! tie-breaker, missing gene names sorted last.

use async_trait::async_trait;
use hsndb_common::types::{CategoryAssociation, ProteinRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use super::{
    CategoryFilter, CategoryLookup, DatabaseStats, DbError, DbResult, ProteinColumn,
    ProteinFilter, ProteinLookup, ProteinStore,
};

/// Serialized form of a fixture dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub proteins: Vec<ProteinRecord>,
    #[serde(default)]
    pub categories: Vec<CategoryAssociation>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProteinStore {
    proteins: Vec<ProteinRecord>,
    categories: Vec<CategoryAssociation>,
}

impl InMemoryProteinStore {
    pub fn new(proteins: Vec<ProteinRecord>, categories: Vec<CategoryAssociation>) -> Self {
        Self {
            proteins,
            categories,
        }
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        Self::new(dataset.proteins, dataset.categories)
    }

    pub fn from_json_str(json: &str) -> DbResult<Self> {
        let dataset: Dataset =
            serde_json::from_str(json).map_err(|e| DbError::Fixture(e.to_string()))?;
        Ok(Self::from_dataset(dataset))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| DbError::Fixture(format!("{}: {}", path.display(), e)))?;
        let store = Self::from_json_str(&json)?;

        tracing::info!(
            path = %path.display(),
            proteins = store.proteins.len(),
            categories = store.categories.len(),
            "Loaded fixture dataset"
        );
        Ok(store)
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn column_text(record: &ProteinRecord, column: ProteinColumn) -> Option<String> {
    match column {
        ProteinColumn::HsnId => Some(record.hsn_id.clone()),
        ProteinColumn::ProteinName => Some(record.protein_name.clone()),
        ProteinColumn::UniprotId => Some(record.uniprot_id.clone()),
        ProteinColumn::GeneName => record.gene_name.clone(),
        ProteinColumn::SiteCount => Some(record.site_count.to_string()),
    }
}

fn matches_filter(record: &ProteinRecord, filter: &ProteinFilter) -> bool {
    match filter {
        ProteinFilter::Contains { columns, text } => {
            let needle = text.to_lowercase();
            columns.iter().any(|column| {
                column_text(record, *column)
                    .map(|value| contains_ignore_case(&value, &needle))
                    .unwrap_or(false)
            })
        },
        ProteinFilter::SiteCountEquals(count) => record.site_count == *count,
        ProteinFilter::HsnIdEquals(id) => record.hsn_id == *id,
        ProteinFilter::UniprotIdIn(ids) => ids.iter().any(|id| *id == record.uniprot_id),
    }
}

fn compare_by(a: &ProteinRecord, b: &ProteinRecord, column: ProteinColumn) -> Ordering {
    let primary = match column {
        ProteinColumn::HsnId => Ordering::Equal,
        ProteinColumn::ProteinName => a.protein_name.cmp(&b.protein_name),
        ProteinColumn::UniprotId => a.uniprot_id.cmp(&b.uniprot_id),
        ProteinColumn::SiteCount => a.site_count.cmp(&b.site_count),
        // NULLs sort last, as in PostgreSQL's ascending order
        ProteinColumn::GeneName => match (&a.gene_name, &b.gene_name) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    primary.then_with(|| a.hsn_id.cmp(&b.hsn_id))
}

fn to_len(limit: i64) -> usize {
    usize::try_from(limit.max(0)).unwrap_or(usize::MAX)
}

#[async_trait]
impl ProteinStore for InMemoryProteinStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_proteins(&self, lookup: &ProteinLookup) -> DbResult<Vec<ProteinRecord>> {
        let mut matched: Vec<ProteinRecord> = self
            .proteins
            .iter()
            .filter(|record| matches_filter(record, &lookup.filter))
            .cloned()
            .collect();

        matched.sort_by(|a, b| compare_by(a, b, lookup.order_by));
        matched.truncate(to_len(lookup.limit));
        Ok(matched)
    }

    async fn find_categories(
        &self,
        lookup: &CategoryLookup,
    ) -> DbResult<Vec<CategoryAssociation>> {
        let mut matched: Vec<CategoryAssociation> = match &lookup.filter {
            CategoryFilter::LabelContains(text) => {
                let needle = text.to_lowercase();
                self.categories
                    .iter()
                    .filter(|row| contains_ignore_case(&row.category, &needle))
                    .cloned()
                    .collect()
            },
            CategoryFilter::UniprotIdEquals(id) => self
                .categories
                .iter()
                .filter(|row| row.uniprot_id == *id)
                .cloned()
                .collect(),
        };

        matched.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.uniprot_id.cmp(&b.uniprot_id))
        });
        if let Some(limit) = lookup.limit {
            matched.truncate(to_len(limit));
        }
        Ok(matched)
    }

    async fn stats(&self) -> DbResult<DatabaseStats> {
        let distinct: HashSet<&str> = self.categories.iter().map(|c| c.category.as_str()).collect();

        Ok(DatabaseStats {
            protein_count: self.proteins.len() as i64,
            site_count: self.proteins.iter().map(|p| i64::from(p.site_count)).sum(),
            category_count: distinct.len() as i64,
        })
    }

    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryProteinStore {
        InMemoryProteinStore::new(
            vec![
                ProteinRecord::new("HSN3", "beta kinase", "P00003", 2).with_gene("KB"),
                ProteinRecord::new("HSN1", "Alpha Kinase", "P00001", 1).with_gene("KA"),
                ProteinRecord::new("HSN2", "Thioredoxin", "Q00002", 2),
            ],
            vec![
                CategoryAssociation::new("P00003", "Lung cancer"),
                CategoryAssociation::new("P00001", "Breast cancer"),
                CategoryAssociation::new("P00001", "Lung cancer"),
            ],
        )
    }

    fn contains(columns: Vec<ProteinColumn>, text: &str) -> ProteinFilter {
        ProteinFilter::Contains {
            columns,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_contains_is_case_insensitive_and_ordered() {
        let lookup = ProteinLookup::new(
            contains(vec![ProteinColumn::ProteinName], "KINASE"),
            ProteinColumn::ProteinName,
            10,
        );
        let rows = store().find_proteins(&lookup).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.protein_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Kinase", "beta kinase"]);
    }

    #[tokio::test]
    async fn test_limit_truncates() {
        let lookup = ProteinLookup::new(
            contains(vec![ProteinColumn::UniprotId], "0000"),
            ProteinColumn::UniprotId,
            2,
        );
        let rows = store().find_proteins(&lookup).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].uniprot_id, "P00001");
    }

    #[tokio::test]
    async fn test_missing_gene_names_never_match_and_sort_last() {
        let lookup = ProteinLookup::new(
            ProteinFilter::SiteCountEquals(2),
            ProteinColumn::GeneName,
            10,
        );
        let rows = store().find_proteins(&lookup).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.hsn_id.as_str()).collect();
        assert_eq!(ids, vec!["HSN3", "HSN2"]);

        let lookup = ProteinLookup::new(
            contains(vec![ProteinColumn::GeneName], "k"),
            ProteinColumn::GeneName,
            10,
        );
        let rows = store().find_proteins(&lookup).await.unwrap();
        assert!(rows.iter().all(|r| r.gene_name.is_some()));
    }

    #[tokio::test]
    async fn test_membership_filter() {
        let lookup = ProteinLookup::new(
            ProteinFilter::UniprotIdIn(vec!["Q00002".to_string(), "X".to_string()]),
            ProteinColumn::ProteinName,
            10,
        );
        let rows = store().find_proteins(&lookup).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hsn_id, "HSN2");
    }

    #[tokio::test]
    async fn test_categories_sorted_by_label_then_accession() {
        let lookup = CategoryLookup {
            filter: CategoryFilter::LabelContains("CANCER".to_string()),
            limit: Some(2),
        };
        let rows = store().find_categories(&lookup).await.unwrap();
        assert_eq!(
            rows,
            vec![
                CategoryAssociation::new("P00001", "Breast cancer"),
                CategoryAssociation::new("P00001", "Lung cancer"),
            ]
        );
    }

    #[tokio::test]
    async fn test_stats() {
        let stats = store().stats().await.unwrap();
        assert_eq!(stats.protein_count, 3);
        assert_eq!(stats.site_count, 5);
        assert_eq!(stats.category_count, 2);
    }

    #[test]
    fn test_from_json_str() {
        let store = InMemoryProteinStore::from_json_str(
            r#"{"proteins":[{"hsn_id":"HSN1","protein_name":"A","uniprot_id":"P1","site_count":1}]}"#,
        )
        .unwrap();
        assert_eq!(store.proteins.len(), 1);
        assert!(store.categories.is_empty());

        let err = InMemoryProteinStore::from_json_str("[]").unwrap_err();
        assert!(matches!(err, DbError::Fixture(_)));
    }

    #[test]
    fn test_bundled_fixture_parses() {
        let json = include_str!("../../../../fixtures/sample.json");
        let store = InMemoryProteinStore::from_json_str(json).unwrap();
        assert_eq!(store.proteins.len(), 20);
        assert!(store.proteins.iter().any(|p| p.gene_name.is_none()));
    }

    #[test]
    fn test_missing_file_is_fixture_error() {
        let err = InMemoryProteinStore::from_json_file("/nonexistent/hsndb.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/hsndb.json"));
    }
}
