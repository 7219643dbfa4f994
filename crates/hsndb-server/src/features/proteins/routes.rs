use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::queries::{GetProteinError, GetProteinQuery, GetStatsQuery};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};
use crate::features::FeatureState;

pub fn proteins_routes() -> Router<FeatureState> {
    Router::new().route("/:hsn_id", get(get_protein))
}

pub fn stats_routes() -> Router<FeatureState> {
    Router::new().route("/", get(get_stats))
}

#[tracing::instrument(skip(state))]
async fn get_protein(
    State(state): State<FeatureState>,
    Path(hsn_id): Path<String>,
) -> ApiResult<Response> {
    let detail =
        super::queries::get_protein::handle(state.store.as_ref(), GetProteinQuery { hsn_id })
            .await?;
    Ok(ApiResponse::success(detail).into_response())
}

#[tracing::instrument(skip(state))]
async fn get_stats(State(state): State<FeatureState>) -> ApiResult<Response> {
    let stats = super::queries::get_stats::handle(state.store.as_ref(), GetStatsQuery).await?;
    Ok(ApiResponse::success(stats).into_response())
}

impl From<GetProteinError> for AppError {
    fn from(err: GetProteinError) -> Self {
        match err {
            GetProteinError::InvalidId(e) => e.into(),
            GetProteinError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetProteinError::Database(e) => AppError::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SearchConfig, SiteConfig};
    use crate::features::shared::test_helpers::{sample_store, RecordingStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(store: RecordingStore) -> FeatureState {
        FeatureState {
            store: Arc::new(store),
            search: SearchConfig::default(),
            site: SiteConfig::default(),
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_get_protein_route() {
        let app = proteins_routes().with_state(state(RecordingStore::new(sample_store())));
        let (status, json) = get(app, "/HSN0001").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["uniprot_id"], "P04637");
        assert_eq!(json["data"]["categories"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_get_protein_not_found() {
        let app = proteins_routes().with_state(state(RecordingStore::new(sample_store())));
        let (status, json) = get(app, "/HSN9999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_stats_route_unavailable() {
        let app = stats_routes().with_state(state(RecordingStore::failing()));
        let (status, json) = get(app, "/").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["success"], false);
    }
}
