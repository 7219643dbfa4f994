use hsndb_common::types::ProteinRecord;
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{
    CategoryFilter, CategoryLookup, DbError, ProteinColumn, ProteinFilter, ProteinLookup,
    ProteinStore,
};
use crate::features::shared::{validate_hsn_id, HsnIdValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProteinQuery {
    pub hsn_id: String,
}

/// A protein record with every category label attached to its accession
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinDetail {
    #[serde(flatten)]
    pub protein: ProteinRecord,
    pub categories: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetProteinError {
    #[error(transparent)]
    InvalidId(#[from] HsnIdValidationError),
    #[error("Protein '{0}' not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<ProteinDetail, GetProteinError>> for GetProteinQuery {}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn ProteinStore,
    query: GetProteinQuery,
) -> Result<ProteinDetail, GetProteinError> {
    validate_hsn_id(&query.hsn_id)?;

    let protein = store
        .find_proteins(&ProteinLookup::new(
            ProteinFilter::HsnIdEquals(query.hsn_id.clone()),
            ProteinColumn::HsnId,
            1,
        ))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| GetProteinError::NotFound(query.hsn_id.clone()))?;

    let associations = store
        .find_categories(&CategoryLookup {
            filter: CategoryFilter::UniprotIdEquals(protein.uniprot_id.clone()),
            limit: None,
        })
        .await?;

    let mut categories: Vec<String> = associations.into_iter().map(|a| a.category).collect();
    categories.dedup();

    Ok(ProteinDetail {
        protein,
        categories,
    })
}
