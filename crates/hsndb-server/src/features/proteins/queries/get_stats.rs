use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DatabaseStats, DbError, ProteinStore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetStatsQuery;

impl Request<Result<DatabaseStats, DbError>> for GetStatsQuery {}

#[tracing::instrument(skip(store))]
pub async fn handle(store: &dyn ProteinStore, _query: GetStatsQuery) -> Result<DatabaseStats, DbError> {
    let stats = store.stats().await?;
    tracing::debug!(
        proteins = stats.protein_count,
        sites = stats.site_count,
        categories = stats.category_count,
        "Loaded database statistics"
    );
    Ok(stats)
}
