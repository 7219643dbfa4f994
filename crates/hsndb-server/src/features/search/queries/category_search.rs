//! Category join
//!
//! Category labels live in their own collection, keyed by UniProt accession.
//! A category search therefore runs in two steps: find the associations whose
//! label matches, then fetch the proteins carrying those accessions and
//! attach the matched labels to each record.

use std::collections::HashSet;

use crate::config::SearchConfig;
use crate::db::{
    CategoryFilter, CategoryLookup, DbResult, ProteinColumn, ProteinFilter, ProteinLookup,
    ProteinStore,
};
use hsndb_common::types::CategoryAssociation;

use super::search_proteins::SearchResult;

/// Search proteins by category label.
///
/// At most `category_match_limit` association rows are considered, so a very
/// common label can miss proteins beyond that window. When no label matches,
/// the protein collection is not queried.
pub async fn search_by_category(
    store: &dyn ProteinStore,
    settings: &SearchConfig,
    term: &str,
) -> DbResult<Vec<SearchResult>> {
    let associations = store
        .find_categories(&CategoryLookup {
            filter: CategoryFilter::LabelContains(term.to_string()),
            limit: Some(settings.category_match_limit),
        })
        .await?;

    let accessions = distinct_accessions(&associations);
    if accessions.is_empty() {
        tracing::debug!(term, "No category labels matched");
        return Ok(Vec::new());
    }

    tracing::debug!(
        term,
        associations = associations.len(),
        accessions = accessions.len(),
        "Resolving category matches"
    );

    let proteins = store
        .find_proteins(&ProteinLookup::new(
            ProteinFilter::UniprotIdIn(accessions),
            ProteinColumn::ProteinName,
            settings.result_limit,
        ))
        .await?;

    Ok(proteins
        .into_iter()
        .map(|protein| {
            let labels = labels_for(&associations, &protein.uniprot_id);
            SearchResult {
                protein,
                categories: Some(labels),
            }
        })
        .collect())
}

/// Accessions in first-seen order, without repeats
fn distinct_accessions(associations: &[CategoryAssociation]) -> Vec<String> {
    let mut seen = HashSet::new();
    associations
        .iter()
        .filter(|a| seen.insert(a.uniprot_id.as_str()))
        .map(|a| a.uniprot_id.clone())
        .collect()
}

fn labels_for(associations: &[CategoryAssociation], uniprot_id: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for association in associations.iter().filter(|a| a.uniprot_id == uniprot_id) {
        if !labels.contains(&association.category) {
            labels.push(association.category.clone());
        }
    }
    labels
}
