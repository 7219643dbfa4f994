//! Feature modules implementing the HSNDB API
//!
//! Each feature is a vertical slice with its own queries and routes. The
//! website only reads data, so there are no command handlers.
//!
//! # Features
//!
//! - **search**: Keyword search, category join, peptide notation, and the
//!   debounced search session
//! - **proteins**: Single-record lookup and database statistics
//!
//! # Architecture
//!
//! - `queries/` - Read operations, each with a `handle` entry point
//! - `routes.rs` - HTTP route definitions
//!
//! Queries implement the mediator `Request` marker so they can be dispatched
//! through a mediator as well as called directly by the routes.

pub mod proteins;
pub mod search;
pub mod shared;

use std::sync::Arc;

use axum::Router;

use crate::config::{SearchConfig, SiteConfig};
use crate::db::ProteinStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Backing store for protein and category lookups
    pub store: Arc<dyn ProteinStore>,
    pub search: SearchConfig,
    pub site: SiteConfig,
}

/// Creates the API router with all feature routes mounted
///
/// - `/search` - Keyword search, examples, peptide notation
/// - `/proteins` - Single protein lookup
/// - `/stats` - Database statistics
pub fn router() -> Router<FeatureState> {
    Router::new()
        .nest("/search", search::search_routes())
        .nest("/proteins", proteins::proteins_routes())
        .nest("/stats", proteins::stats_routes())
}
