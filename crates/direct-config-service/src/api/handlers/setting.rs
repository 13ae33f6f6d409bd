//! Setting Handlers
//!
//! Settings are addressed entirely through the path: `/setting/{name}/{value}`.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use direct_config_core::Setting;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::extract::PathParams;
use crate::api::handlers::AppState;

/// GET /setting
pub async fn list_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Setting>>, ApiError> {
    Ok(Json(state.store.list_settings().await?))
}

/// GET /setting/{name}
pub async fn get_setting(
    State(state): State<Arc<AppState>>,
    PathParams(name): PathParams<String>,
) -> Result<Json<Setting>, ApiError> {
    state
        .store
        .get_setting(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Setting '{}' does not exist", name)))
}

/// PUT /setting/{name}/{value}
pub async fn add_setting(
    State(state): State<Arc<AppState>>,
    PathParams((name, value)): PathParams<(String, String)>,
) -> Result<(StatusCode, Json<Setting>), ApiError> {
    let stored = state.store.add_setting(&name, &value).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// POST /setting/{name}/{value}
pub async fn update_setting(
    State(state): State<Arc<AppState>>,
    PathParams((name, value)): PathParams<(String, String)>,
) -> Result<Json<Setting>, ApiError> {
    state
        .store
        .update_setting(&name, &value)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Setting '{}' does not exist", name)))
}

/// DELETE /setting/{name}
pub async fn delete_setting(
    State(state): State<Arc<AppState>>,
    PathParams(name): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_setting(&name).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound(format!("Setting '{}' does not exist", name)))
    }
}
