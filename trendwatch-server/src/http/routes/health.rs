//! Welcome, health, and connectivity endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Database connectivity response
#[derive(Serialize)]
pub struct DbTestResponse {
    pub status: &'static str,
    pub time: String,
}

/// GET /
async fn welcome() -> &'static str {
    "Welcome to the Trendwatch API!"
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /db-test - round-trip the store without touching the trends table
async fn db_test(State(state): State<Arc<AppState>>) -> Result<Json<DbTestResponse>, ApiError> {
    let row: (DateTime<Utc>,) = sqlx::query_as("SELECT NOW()")
        .fetch_one(&state.pool)
        .await?;

    Ok(Json(DbTestResponse {
        status: "success",
        time: row.0.to_rfc3339(),
    }))
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/db-test", get(db_test))
}
