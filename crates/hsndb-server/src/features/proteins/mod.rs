pub mod queries;
pub mod routes;

pub use queries::{GetProteinError, GetProteinQuery, GetStatsQuery, ProteinDetail};
pub use routes::{proteins_routes, stats_routes};
