//! Trend endpoints
//!
//! Literal segments (filter, statistics, paginated, popular, mock,
//! search) are registered as their own routes and take precedence over
//! the parameterized `/trends/{selector}` route. The selector route
//! serves both read-by-id and read-by-category: an all-digit segment is
//! treated as an id, anything else as a category.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{TrendRepo, DEFAULT_MOCK_COUNT, MAX_MOCK_COUNT};
use crate::http::error::ApiError;
use crate::http::extractors::TrendId;
use crate::http::server::AppState;
use crate::models::page::DEFAULT_LIMIT;
use crate::models::{
    Page, PageParams, Trend, TrendDraft, TrendFilter, TrendPatch, TrendStats, ValidationError,
};

/// Create trend request
#[derive(Deserialize)]
pub struct CreateTrendRequest {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub popularity_score: Option<i32>,
    pub source: Option<String>,
}

/// Update trend request; any subset of the mutable fields
#[derive(Deserialize)]
pub struct UpdateTrendRequest {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub popularity_score: Option<i32>,
    pub source: Option<String>,
}

/// Delete confirmation carrying the removed record
#[derive(Serialize)]
pub struct DeleteTrendResponse {
    pub message: &'static str,
    pub trend: Trend,
}

/// Mock generation request
#[derive(Deserialize, Default)]
pub struct MockTrendsRequest {
    pub count: Option<i64>,
}

/// Mock generation confirmation
#[derive(Serialize)]
pub struct MockTrendsResponse {
    pub message: String,
}

/// Query parameters for the popular listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopularParams {
    pub limit: Option<i64>,
}

/// POST /trends - create a trend
async fn create_trend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTrendRequest>,
) -> Result<(StatusCode, Json<Trend>), ApiError> {
    let draft = TrendDraft::new(
        req.keyword.unwrap_or_default(),
        req.category,
        req.popularity_score,
        req.source,
    )?;
    let trend = TrendRepo::new(&state.pool).create(&draft).await?;

    Ok((StatusCode::CREATED, Json(trend)))
}

/// GET /trends - all trends, most recent first
async fn list_trends(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Trend>>, ApiError> {
    let trends = TrendRepo::new(&state.pool).list().await?;
    Ok(Json(trends))
}

/// GET /trends/{selector} - read by id when the segment parses as one,
/// by category otherwise
async fn get_by_selector(
    State(state): State<Arc<AppState>>,
    Path(selector): Path<String>,
) -> Result<Response, ApiError> {
    let repo = TrendRepo::new(&state.pool);

    match selector.parse::<i64>() {
        Ok(id) => {
            let trend = repo.get(id).await?;
            Ok(Json(trend).into_response())
        }
        Err(_) => {
            let trends = repo.list_by_category(&selector).await?;
            Ok(Json(trends).into_response())
        }
    }
}

/// GET /trends/search/{keyword} - substring search, case-insensitive
async fn search_trends(
    State(state): State<Arc<AppState>>,
    Path(keyword): Path<String>,
) -> Result<Json<Vec<Trend>>, ApiError> {
    let trends = TrendRepo::new(&state.pool).search(&keyword).await?;
    Ok(Json(trends))
}

/// PUT /trends/{id} - partial update
async fn update_trend(
    State(state): State<Arc<AppState>>,
    TrendId(id): TrendId,
    Json(req): Json<UpdateTrendRequest>,
) -> Result<Json<Trend>, ApiError> {
    let patch = TrendPatch::new(req.keyword, req.category, req.popularity_score, req.source)?;
    let trend = TrendRepo::new(&state.pool).update(id, &patch).await?;

    Ok(Json(trend))
}

/// DELETE /trends/{id} - remove and return the prior record
async fn delete_trend(
    State(state): State<Arc<AppState>>,
    TrendId(id): TrendId,
) -> Result<Json<DeleteTrendResponse>, ApiError> {
    let trend = TrendRepo::new(&state.pool).delete(id).await?;

    Ok(Json(DeleteTrendResponse {
        message: "Trend deleted successfully",
        trend,
    }))
}

/// GET /trends/paginated?limit=&offset=
async fn list_paginated(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Trend>>, ApiError> {
    let trends = TrendRepo::new(&state.pool)
        .list_page(Page::from(params))
        .await?;
    Ok(Json(trends))
}

/// GET /trends/popular?limit=
async fn list_popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PopularParams>,
) -> Result<Json<Vec<Trend>>, ApiError> {
    let limit = Page::new(params.limit.unwrap_or(DEFAULT_LIMIT), 0).limit;
    let trends = TrendRepo::new(&state.pool).list_popular(limit).await?;
    Ok(Json(trends))
}

/// GET /trends/filter?category=&source=&minPopularity=
async fn filter_trends(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<TrendFilter>,
) -> Result<Json<Vec<Trend>>, ApiError> {
    let trends = TrendRepo::new(&state.pool).filter(&filter).await?;
    Ok(Json(trends))
}

/// GET /trends/statistics
async fn statistics(State(state): State<Arc<AppState>>) -> Result<Json<TrendStats>, ApiError> {
    let stats = TrendRepo::new(&state.pool).statistics().await?;
    Ok(Json(stats))
}

/// POST /trends/mock - batched synthetic insert
async fn generate_mocks(
    State(state): State<Arc<AppState>>,
    body: Option<Json<MockTrendsRequest>>,
) -> Result<(StatusCode, Json<MockTrendsResponse>), ApiError> {
    let count = body
        .map(|Json(req)| req)
        .unwrap_or_default()
        .count
        .unwrap_or(i64::from(DEFAULT_MOCK_COUNT));

    if !(1..=i64::from(MAX_MOCK_COUNT)).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "count",
            min: 1,
            max: i64::from(MAX_MOCK_COUNT),
        }
        .into());
    }

    TrendRepo::new(&state.pool).insert_mocks(count as u32).await?;

    Ok((
        StatusCode::CREATED,
        Json(MockTrendsResponse {
            message: format!("{} mock trends generated successfully", count),
        }),
    ))
}

/// Trend routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trends", get(list_trends).post(create_trend))
        .route("/trends/filter", get(filter_trends))
        .route("/trends/statistics", get(statistics))
        .route("/trends/paginated", get(list_paginated))
        .route("/trends/popular", get(list_popular))
        .route("/trends/mock", post(generate_mocks))
        .route("/trends/search/{keyword}", get(search_trends))
        .route(
            "/trends/{selector}",
            get(get_by_selector).put(update_trend).delete(delete_trend),
        )
}
