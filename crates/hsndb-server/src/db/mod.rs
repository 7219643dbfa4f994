//! Data store access
//!
//! The website reads two collections: protein records and category
//! associations. Both are reached through [`ProteinStore`], which exposes the
//! filter/sort/limit primitives the search features compose:
//!
//! - case-insensitive substring match on one or more columns
//! - exact match on the site count or the HSNDB identifier
//! - set membership on UniProt accessions
//! - ascending sort by a named column
//! - result-count limit
//!
//! [`postgres::PgProteinStore`] backs production; [`memory::InMemoryProteinStore`]
//! serves JSON fixtures and tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use hsndb_common::types::{CategoryAssociation, ProteinRecord};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use memory::InMemoryProteinStore;
pub use postgres::PgProteinStore;

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Database configuration is invalid or missing
    #[error("Database configuration error: {0}. Check DATABASE_URL and connection settings.")]
    Config(String),

    /// Fixture dataset could not be read or parsed
    #[error("Fixture dataset error: {0}")]
    Fixture(String),

    /// The store could not be reached
    #[error("Data store unavailable: {0}")]
    Unavailable(String),
}

pub type DbResult<T> = Result<T, DbError>;

// ============================================================================
// Lookup Primitives
// ============================================================================

/// Sortable and filterable columns of the `proteins` collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProteinColumn {
    HsnId,
    ProteinName,
    UniprotId,
    GeneName,
    SiteCount,
}

impl ProteinColumn {
    pub fn column_name(self) -> &'static str {
        match self {
            ProteinColumn::HsnId => "hsn_id",
            ProteinColumn::ProteinName => "protein_name",
            ProteinColumn::UniprotId => "uniprot_id",
            ProteinColumn::GeneName => "gene_name",
            ProteinColumn::SiteCount => "site_count",
        }
    }
}

/// Row filter for a protein lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProteinFilter {
    /// Case-insensitive substring match on any of the columns (OR-ed).
    Contains {
        columns: Vec<ProteinColumn>,
        text: String,
    },
    SiteCountEquals(i32),
    HsnIdEquals(String),
    UniprotIdIn(Vec<String>),
}

/// A filtered, ordered, limited read of the `proteins` collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinLookup {
    pub filter: ProteinFilter,
    pub order_by: ProteinColumn,
    pub limit: i64,
}

impl ProteinLookup {
    pub fn new(filter: ProteinFilter, order_by: ProteinColumn, limit: i64) -> Self {
        Self {
            filter,
            order_by,
            limit,
        }
    }
}

/// Row filter for a category lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Case-insensitive substring match on the category label
    LabelContains(String),
    UniprotIdEquals(String),
}

/// A read of the `protein_categories` collection, always ordered by label
/// and then accession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLookup {
    pub filter: CategoryFilter,
    /// `None` reads every matching row
    pub limit: Option<i64>,
}

/// Aggregate counts shown on the browse page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DatabaseStats {
    pub protein_count: i64,
    pub site_count: i64,
    pub category_count: i64,
}

/// Read-only access to protein metadata and category associations.
#[async_trait]
pub trait ProteinStore: Send + Sync {
    /// Short backend name used in logs and the health endpoint
    fn backend(&self) -> &'static str;

    async fn find_proteins(&self, lookup: &ProteinLookup) -> DbResult<Vec<ProteinRecord>>;

    async fn find_categories(&self, lookup: &CategoryLookup)
        -> DbResult<Vec<CategoryAssociation>>;

    async fn stats(&self) -> DbResult<DatabaseStats>;

    /// Verify the store is reachable
    async fn ping(&self) -> DbResult<()>;
}

// ============================================================================
// Connection Pool
// ============================================================================

pub async fn create_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    if config.url.is_empty() {
        return Err(DbError::Config("DATABASE_URL not set".to_string()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool established"
    );

    Ok(pool)
}

/// Apply the bundled schema migrations
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Config(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_match_schema() {
        assert_eq!(ProteinColumn::ProteinName.column_name(), "protein_name");
        assert_eq!(ProteinColumn::UniprotId.column_name(), "uniprot_id");
        assert_eq!(ProteinColumn::SiteCount.column_name(), "site_count");
    }

    #[test]
    fn test_db_error_messages() {
        let err = DbError::Config("DATABASE_URL not set".to_string());
        assert!(err.to_string().contains("Check DATABASE_URL"));

        let err = DbError::Unavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Data store unavailable: connection refused");
    }

    #[tokio::test]
    async fn test_create_pool_rejects_empty_url() {
        let config = DatabaseConfig {
            url: String::new(),
            ..crate::config::Config::default().database
        };
        let result = create_pool(&config).await;
        assert!(matches!(result, Err(DbError::Config(_))));
    }
}
