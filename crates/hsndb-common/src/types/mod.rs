//! Common types used across HSNDB

use serde::{Deserialize, Serialize};

use crate::error::HsndbError;

// ============================================================================
// Record Types
// ============================================================================

/// A protein entry with its modification-site summary.
///
/// Records are owned by the external data store; the web surface only reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinRecord {
    /// Unique database key (e.g. `HSN0001`)
    pub hsn_id: String,
    /// Display name of the protein
    pub protein_name: String,
    /// External cross-reference accession (UniProt ID)
    pub uniprot_id: String,
    /// Gene symbol, when annotated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_name: Option<String>,
    /// Total number of modification sites recorded for this protein
    pub site_count: i32,
}

impl ProteinRecord {
    pub fn new(
        hsn_id: impl Into<String>,
        protein_name: impl Into<String>,
        uniprot_id: impl Into<String>,
        site_count: i32,
    ) -> Self {
        Self {
            hsn_id: hsn_id.into(),
            protein_name: protein_name.into(),
            uniprot_id: uniprot_id.into(),
            gene_name: None,
            site_count,
        }
    }

    pub fn with_gene(mut self, gene_name: impl Into<String>) -> Self {
        self.gene_name = Some(gene_name.into());
        self
    }
}

/// Links an external accession to a descriptive category (e.g. a cancer type).
///
/// One accession may carry several labels and one label spans many accessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssociation {
    pub uniprot_id: String,
    pub category: String,
}

impl CategoryAssociation {
    pub fn new(uniprot_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            uniprot_id: uniprot_id.into(),
            category: category.into(),
        }
    }
}

// ============================================================================
// Search Field
// ============================================================================

/// Field selected in the keyword search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Protein name or UniProt ID
    #[default]
    Any,
    ProteinName,
    GeneName,
    /// UniProt accession
    ExternalId,
    /// Exact number of modification sites
    SiteCount,
    /// Cancer type (category association)
    Category,
}

impl SearchField {
    /// All fields in the order the search form lists them.
    pub const ALL: [SearchField; 6] = [
        SearchField::Any,
        SearchField::ProteinName,
        SearchField::GeneName,
        SearchField::ExternalId,
        SearchField::SiteCount,
        SearchField::Category,
    ];

    /// Wire name used in query strings and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Any => "any",
            SearchField::ProteinName => "protein_name",
            SearchField::GeneName => "gene_name",
            SearchField::ExternalId => "external_id",
            SearchField::SiteCount => "site_count",
            SearchField::Category => "category",
        }
    }

    /// Human-readable label shown in the field selector.
    pub fn label(self) -> &'static str {
        match self {
            SearchField::Any => "Any Field",
            SearchField::ProteinName => "Protein name",
            SearchField::GeneName => "Gene Name",
            SearchField::ExternalId => "Uniprot ID",
            SearchField::SiteCount => "No of N sites",
            SearchField::Category => "Cancer type",
        }
    }

    /// Query filled in by the form's "Example" button.
    pub fn example_query(self) -> &'static str {
        match self {
            SearchField::ProteinName => "Kinase",
            SearchField::GeneName => "BRCA",
            SearchField::ExternalId => "P04637",
            SearchField::Any | SearchField::SiteCount | SearchField::Category => "example",
        }
    }
}

impl std::str::FromStr for SearchField {
    type Err = HsndbError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        SearchField::ALL
            .into_iter()
            .find(|field| {
                field.as_str() == normalized || field.label().to_lowercase() == normalized
            })
            .ok_or_else(|| HsndbError::InvalidSearchField(s.to_string()))
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_search_field_from_wire_name() {
        assert_eq!("protein_name".parse::<SearchField>().unwrap(), SearchField::ProteinName);
        assert_eq!("CATEGORY".parse::<SearchField>().unwrap(), SearchField::Category);
        assert_eq!(" any ".parse::<SearchField>().unwrap(), SearchField::Any);
    }

    #[test]
    fn test_search_field_from_label() {
        assert_eq!("Uniprot ID".parse::<SearchField>().unwrap(), SearchField::ExternalId);
        assert_eq!("No of N sites".parse::<SearchField>().unwrap(), SearchField::SiteCount);
        assert_eq!("cancer type".parse::<SearchField>().unwrap(), SearchField::Category);
    }

    #[test]
    fn test_search_field_rejects_unknown() {
        let err = "organism".parse::<SearchField>().unwrap_err();
        assert!(matches!(err, HsndbError::InvalidSearchField(ref s) if s == "organism"));
    }

    #[test]
    fn test_search_field_serde_uses_wire_name() {
        let json = serde_json::to_string(&SearchField::ExternalId).unwrap();
        assert_eq!(json, "\"external_id\"");
        let field: SearchField = serde_json::from_str("\"site_count\"").unwrap();
        assert_eq!(field, SearchField::SiteCount);
    }

    #[test]
    fn test_example_queries() {
        assert_eq!(SearchField::ProteinName.example_query(), "Kinase");
        assert_eq!(SearchField::GeneName.example_query(), "BRCA");
        assert_eq!(SearchField::ExternalId.example_query(), "P04637");
        assert_eq!(SearchField::Category.example_query(), "example");
    }

    #[test]
    fn test_protein_record_skips_missing_gene() {
        let record = ProteinRecord::new("HSN0001", "Tumor suppressor p53", "P04637", 3);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("gene_name").is_none());

        let with_gene = record.with_gene("TP53");
        let json = serde_json::to_value(&with_gene).unwrap();
        assert_eq!(json["gene_name"], "TP53");
    }
}
