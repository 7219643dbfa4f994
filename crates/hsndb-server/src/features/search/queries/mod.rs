pub mod category_search;
pub mod examples;
pub mod parse_peptide;
pub mod search_proteins;

pub use examples::{SearchExample, SearchExamplesQuery, SearchExamplesResponse};
pub use parse_peptide::{
    ParsePeptideQuery, PeptideParseError, PeptideSite, PhosphoPeptide, EXAMPLE_PEPTIDE,
};
pub use search_proteins::{
    search, SearchOutcome, SearchProteinsError, SearchProteinsQuery, SearchProteinsResponse,
    SearchResult, SearchStatus,
};
