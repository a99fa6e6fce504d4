use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Item, ItemInput, List, PositionUpdate, RecommendationCandidate, SearchResult},
    services::{normalizer, recommend},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub user_id: Uuid,
    pub positions: Vec<PositionUpdate>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Create a new list
pub async fn create_list(
    State(state): State<AppState>,
    Json(request): Json<CreateListRequest>,
) -> AppResult<(StatusCode, Json<List>)> {
    let list = state
        .items
        .create_list(request.user_id, request.is_public)
        .await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// Items of a list in display order
pub async fn get_list_items(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.lists.items_in_order(list_id).await?;
    Ok(Json(items))
}

/// Validate, normalize, and persist a new item
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<ItemInput>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let new_item = normalizer::prepare(input)?;
    let item = state.items.insert_item(new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Ranked catalog search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<SearchResult>>> {
    let results = state
        .search
        .search(
            &params.q,
            params.category.as_deref().unwrap_or("all"),
            params.limit.unwrap_or(20),
        )
        .await?;
    Ok(Json(results))
}

/// Personalized recommendations for a user
pub async fn recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<Vec<RecommendationCandidate>>> {
    let candidates = state
        .recommendations
        .recommend(user_id, params.limit.unwrap_or(recommend::DEFAULT_LIMIT))
        .await?;
    Ok(Json(candidates))
}

/// Apply a drag-to-reorder request to a list
pub async fn reorder_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Json(request): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    state
        .ordering
        .reorder(list_id, request.user_id, &request.positions)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
