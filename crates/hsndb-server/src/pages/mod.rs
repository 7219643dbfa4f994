//! Server-rendered HTML pages
//!
//! `/home`, `/browse` and `/search` share one shell (see [`layout`]); the
//! search page fetches results from the JSON API in the browser.

pub mod content;
pub mod layout;

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
    Router,
};
use hsndb_common::types::SearchField;
use serde::Deserialize;

use crate::features::FeatureState;
use layout::{render_page, NavItem, Theme};

pub use layout::escape_html;

pub fn pages_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/home") }))
        .route("/home", get(home))
        .route("/browse", get(browse))
        .route("/search", get(search))
}

async fn home(State(state): State<FeatureState>) -> Html<String> {
    let theme = Theme::from(&state.site);
    Html(render_page(&theme, NavItem::Home, "Home", &content::home(&theme)))
}

#[tracing::instrument(skip(state))]
async fn browse(State(state): State<FeatureState>) -> Html<String> {
    let theme = Theme::from(&state.site);
    let stats = match state.store.stats().await {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!(error = %e, "Browse page rendered without statistics");
            None
        },
    };

    Html(render_page(&theme, NavItem::Browse, "Browse", &content::browse(&theme, stats.as_ref())))
}

#[derive(Debug, Default, Deserialize)]
struct SearchPageParams {
    field: Option<String>,
    q: Option<String>,
}

async fn search(
    State(state): State<FeatureState>,
    Query(params): Query<SearchPageParams>,
) -> Html<String> {
    let theme = Theme::from(&state.site);
    let field = params
        .field
        .as_deref()
        .and_then(|f| f.parse::<SearchField>().ok())
        .unwrap_or_default();
    let body = content::search(&state.search, field, params.q.as_deref().unwrap_or(""));

    Html(render_page(&theme, NavItem::Search, "Search", &body))
}
