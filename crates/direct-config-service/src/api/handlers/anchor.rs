//! Trust Anchor Handlers
//!
//! Anchors are keyed by owner and thumbprint. The thumbprint is always
//! recomputed from the submitted certificate bytes.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use direct_config_core::Anchor;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiError;
use crate::api::extract::{JsonBody, PathParams, QueryParams};
use crate::api::handlers::{parse_ids, AppState};
use crate::storage::AnchorFilter;

/// Query parameters for owner lookups
#[derive(Debug, Default, Deserialize)]
pub struct AnchorQuery {
    pub incoming: Option<bool>,
    pub outgoing: Option<bool>,
    pub thumbprint: Option<String>,
}

/// PUT /anchor
pub async fn add_anchor(
    State(state): State<Arc<AppState>>,
    JsonBody(anchor): JsonBody<Anchor>,
) -> Result<(StatusCode, Json<Anchor>), ApiError> {
    if anchor.owner.trim().is_empty() {
        return Err(ApiError::BadRequest("Anchor owner cannot be empty".into()));
    }
    if anchor.certificate_data.is_empty() {
        return Err(ApiError::BadRequest("Anchor certificate cannot be empty".into()));
    }

    let stored = state.store.add_anchor(anchor).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /anchor
pub async fn list_anchors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Anchor>>, ApiError> {
    Ok(Json(state.store.list_anchors().await?))
}

/// GET /anchor/{owner}
///
/// An owner without anchors yields an empty list.
pub async fn list_anchors_for_owner(
    State(state): State<Arc<AppState>>,
    PathParams(owner): PathParams<String>,
    QueryParams(query): QueryParams<AnchorQuery>,
) -> Result<Json<Vec<Anchor>>, ApiError> {
    let filter = AnchorFilter {
        incoming: query.incoming,
        outgoing: query.outgoing,
        thumbprint: query.thumbprint,
    };
    Ok(Json(state.store.list_anchors_for_owner(&owner, &filter).await?))
}

/// DELETE /anchor/ids/{ids}
pub async fn delete_anchors(
    State(state): State<Arc<AppState>>,
    PathParams(ids): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    let ids = parse_ids(&ids)?;
    let removed = state.store.delete_anchors(&ids).await?;
    info!(requested = ids.len(), removed, "Anchors deleted");
    Ok(StatusCode::OK)
}

/// DELETE /anchor/ids
///
/// `ids` is reserved for id-list deletes and never names an owner.
pub async fn delete_anchors_missing_ids() -> ApiError {
    ApiError::BadRequest("No ids given".into())
}

/// DELETE /anchor/{owner}
pub async fn delete_anchors_for_owner(
    State(state): State<Arc<AppState>>,
    PathParams(owner): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store.delete_anchors_for_owner(&owner).await?;
    info!(owner = %owner, removed, "Anchors deleted for owner");
    Ok(StatusCode::OK)
}
