//! Example queries for the search forms

use hsndb_common::types::SearchField;
use mediator::Request;
use serde::{Deserialize, Serialize};

use super::parse_peptide::EXAMPLE_PEPTIDE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchExamplesQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchExample {
    pub field: SearchField,
    pub label: String,
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchExamplesResponse {
    pub fields: Vec<SearchExample>,
    pub peptide: String,
}

impl Request<SearchExamplesResponse> for SearchExamplesQuery {}

pub fn handle(_query: SearchExamplesQuery) -> SearchExamplesResponse {
    let fields = SearchField::ALL
        .into_iter()
        .map(|field| SearchExample {
            field,
            label: field.label().to_string(),
            query: field.example_query().to_string(),
        })
        .collect();

    SearchExamplesResponse {
        fields,
        peptide: EXAMPLE_PEPTIDE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_cover_every_field_in_form_order() {
        let response = handle(SearchExamplesQuery);
        let fields: Vec<_> = response.fields.iter().map(|e| e.field).collect();
        assert_eq!(fields, SearchField::ALL.to_vec());

        let gene = &response.fields[2];
        assert_eq!(gene.label, "Gene Name");
        assert_eq!(gene.query, "BRCA");
        assert_eq!(response.peptide, "RRLpSISTESK");
    }
}
