pub mod get_protein;
pub mod get_stats;

pub use get_protein::{GetProteinError, GetProteinQuery, ProteinDetail};
pub use get_stats::GetStatsQuery;
