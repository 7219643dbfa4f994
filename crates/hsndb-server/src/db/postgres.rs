//! PostgreSQL-backed protein store

use async_trait::async_trait;
use hsndb_common::types::{CategoryAssociation, ProteinRecord};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{
    CategoryFilter, CategoryLookup, DatabaseStats, DbResult, ProteinFilter, ProteinLookup,
    ProteinStore,
};

const PROTEIN_COLUMNS: &str =
    "SELECT hsn_id, protein_name, uniprot_id, gene_name, site_count FROM proteins WHERE ";

const CATEGORY_COLUMNS: &str = "SELECT uniprot_id, category FROM protein_categories WHERE ";

#[derive(Clone)]
pub struct PgProteinStore {
    pool: PgPool,
}

impl PgProteinStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Wrap user text in `%...%` for `ILIKE`, escaping LIKE metacharacters so they
/// match literally.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn build_protein_query(lookup: &ProteinLookup) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(PROTEIN_COLUMNS);

    match &lookup.filter {
        ProteinFilter::Contains { columns, text } => {
            let pattern = like_pattern(text);
            qb.push("(");
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(column.column_name());
                qb.push(" ILIKE ");
                qb.push_bind(pattern.clone());
            }
            qb.push(")");
        },
        ProteinFilter::SiteCountEquals(count) => {
            qb.push("site_count = ");
            qb.push_bind(*count);
        },
        ProteinFilter::HsnIdEquals(id) => {
            qb.push("hsn_id = ");
            qb.push_bind(id.clone());
        },
        ProteinFilter::UniprotIdIn(ids) => {
            qb.push("uniprot_id = ANY(");
            qb.push_bind(ids.clone());
            qb.push(")");
        },
    }

    qb.push(" ORDER BY ");
    qb.push(lookup.order_by.column_name());
    qb.push(" ASC, hsn_id ASC LIMIT ");
    qb.push_bind(lookup.limit);
    qb
}

pub(crate) fn build_category_query(lookup: &CategoryLookup) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(CATEGORY_COLUMNS);

    match &lookup.filter {
        CategoryFilter::LabelContains(text) => {
            qb.push("category ILIKE ");
            qb.push_bind(like_pattern(text));
        },
        CategoryFilter::UniprotIdEquals(id) => {
            qb.push("uniprot_id = ");
            qb.push_bind(id.clone());
        },
    }

    qb.push(" ORDER BY category ASC, uniprot_id ASC");
    if let Some(limit) = lookup.limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
    }
    qb
}

#[async_trait]
impl ProteinStore for PgProteinStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    #[tracing::instrument(skip(self))]
    async fn find_proteins(&self, lookup: &ProteinLookup) -> DbResult<Vec<ProteinRecord>> {
        let rows: Vec<ProteinRow> = build_protein_query(lookup)
            .build_query_as::<ProteinRow>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = rows.len(), "Protein lookup completed");
        Ok(rows.into_iter().map(ProteinRecord::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_categories(
        &self,
        lookup: &CategoryLookup,
    ) -> DbResult<Vec<CategoryAssociation>> {
        let rows: Vec<CategoryRow> = build_category_query(lookup)
            .build_query_as::<CategoryRow>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = rows.len(), "Category lookup completed");
        Ok(rows
            .into_iter()
            .map(|r| CategoryAssociation::new(r.uniprot_id, r.category))
            .collect())
    }

    async fn stats(&self) -> DbResult<DatabaseStats> {
        let stats: DatabaseStats = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM proteins) AS protein_count,
                (SELECT COALESCE(SUM(site_count), 0)::BIGINT FROM proteins) AS site_count,
                (SELECT COUNT(DISTINCT category) FROM protein_categories) AS category_count
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProteinRow {
    hsn_id: String,
    protein_name: String,
    uniprot_id: String,
    gene_name: Option<String>,
    site_count: i32,
}

impl From<ProteinRow> for ProteinRecord {
    fn from(row: ProteinRow) -> Self {
        Self {
            hsn_id: row.hsn_id,
            protein_name: row.protein_name,
            uniprot_id: row.uniprot_id,
            gene_name: row.gene_name,
            site_count: row.site_count,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    uniprot_id: String,
    category: String,
}
