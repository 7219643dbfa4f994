use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::queries::{ParsePeptideQuery, SearchExamplesQuery, SearchProteinsQuery};
use crate::api::response::ApiResponse;
use crate::error::ApiResult;
use crate::features::FeatureState;

pub fn search_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(search_proteins))
        .route("/examples", get(get_examples))
        .route("/peptide", get(parse_peptide))
}

/// Store failures are reported inside the payload (`status: "failed"`) so
/// the results pane can show them; only malformed requests are HTTP errors.
#[tracing::instrument(
    skip(state, query),
    fields(q = %query.q, field = ?query.field, seq = ?query.seq)
)]
async fn search_proteins(
    State(state): State<FeatureState>,
    Query(query): Query<SearchProteinsQuery>,
) -> ApiResult<Response> {
    let response =
        super::queries::search_proteins::handle(state.store.as_ref(), &state.search, query)
            .await?;

    tracing::debug!(
        status = ?response.status,
        count = response.results.len(),
        "Search request completed"
    );

    let meta = json!({ "min_query_len": state.search.min_query_len });
    Ok((StatusCode::OK, Json(ApiResponse::success_with_meta(response, meta))).into_response())
}

async fn get_examples() -> impl IntoResponse {
    ApiResponse::success(super::queries::examples::handle(SearchExamplesQuery))
}

#[tracing::instrument(skip(query), fields(sequence = %query.sequence))]
async fn parse_peptide(Query(query): Query<ParsePeptideQuery>) -> ApiResult<Response> {
    let peptide = super::queries::parse_peptide::handle(query)?;
    Ok(ApiResponse::success(peptide).into_response())
}
