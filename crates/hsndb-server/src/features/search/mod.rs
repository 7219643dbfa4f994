pub mod queries;
pub mod routes;
pub mod session;

pub use queries::{
    search, ParsePeptideQuery, PeptideParseError, PhosphoPeptide, SearchExamplesResponse,
    SearchOutcome, SearchProteinsError, SearchProteinsQuery, SearchProteinsResponse,
    SearchResult, SearchStatus,
};
pub use routes::search_routes;
pub use session::{SearchSession, SearchSnapshot};
