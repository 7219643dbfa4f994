//! HSNDB Server Library
//!
//! Web front end for the Human S-Nitrosylation Database.
//!
//! # Overview
//!
//! - **Pages**: server-rendered home, browse and search pages sharing one themed shell
//! - **Search API**: keyword search over protein records, category (cancer type)
//!   search via a two-step join, and phospho-peptide notation parsing
//! - **Data Store**: [`db::ProteinStore`] with PostgreSQL and in-memory backends
//! - **Configuration**: environment-based configuration with `.env` support
//! - **Middleware**: CORS, compression, and request tracing
//!
//! # Search Ordering
//!
//! Search requests carry a sequence number. Both the browser script and
//! [`features::search::SearchSession`] apply a response only while its number is
//! the latest one issued, so a slow response never replaces a newer one.
//! The server itself is stateless; `SearchSession` is for library callers.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hsndb_server::{api, config::Config, db::InMemoryProteinStore, features::FeatureState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = InMemoryProteinStore::from_json_file("fixtures/sample.json")?;
//!     let state = FeatureState {
//!         store: Arc::new(store),
//!         search: config.search.clone(),
//!         site: config.site.clone(),
//!     };
//!     let app = api::create_router(state, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod pages;

pub use config::Config;
pub use error::{ApiResult, AppError};
