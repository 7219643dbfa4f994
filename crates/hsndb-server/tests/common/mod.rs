//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, http::StatusCode, Router};
use hsndb_common::types::{CategoryAssociation, ProteinRecord};
use tower::ServiceExt;

use hsndb_server::{
    api,
    config::Config,
    db::{
        CategoryLookup, DatabaseStats, DbError, DbResult, InMemoryProteinStore, ProteinLookup,
        ProteinStore,
    },
    features::FeatureState,
};

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/sample.json")
}

/// Store that is never reachable
pub struct DownStore;

#[async_trait]
impl ProteinStore for DownStore {
    fn backend(&self) -> &'static str {
        "down"
    }

    async fn find_proteins(&self, _lookup: &ProteinLookup) -> DbResult<Vec<ProteinRecord>> {
        Err(DbError::Unavailable("connection refused".to_string()))
    }

    async fn find_categories(
        &self,
        _lookup: &CategoryLookup,
    ) -> DbResult<Vec<CategoryAssociation>> {
        Err(DbError::Unavailable("connection refused".to_string()))
    }

    async fn stats(&self) -> DbResult<DatabaseStats> {
        Err(DbError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> DbResult<()> {
        Err(DbError::Unavailable("connection refused".to_string()))
    }
}

pub fn app_with_store(store: Arc<dyn ProteinStore>) -> Router {
    let config = Config::default();
    let state = FeatureState {
        store,
        search: config.search.clone(),
        site: config.site.clone(),
    };
    api::create_router(state, &config)
}

pub fn fixture_app() -> Router {
    let store = InMemoryProteinStore::from_json_file(fixture_path()).unwrap();
    app_with_store(Arc::new(store))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
