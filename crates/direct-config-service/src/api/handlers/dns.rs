//! DNS Record Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use direct_config_core::{dns::normalize_name, DnsRecord};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiError;
use crate::api::extract::{JsonBody, PathParams, QueryParams};
use crate::api::handlers::{parse_ids, AppState};
use crate::storage::DnsFilter;

/// Query parameters for record listings
#[derive(Debug, Default, Deserialize)]
pub struct DnsQuery {
    /// Numeric record type
    #[serde(rename = "type")]
    pub record_type: Option<u16>,
    pub name: Option<String>,
}

fn validate(mut record: DnsRecord) -> Result<DnsRecord, ApiError> {
    record.name = normalize_name(&record.name)?;
    if record.record_type == 0 {
        return Err(ApiError::BadRequest("Record type 0 is reserved".into()));
    }
    Ok(record)
}

/// PUT /dns
pub async fn add_record(
    State(state): State<Arc<AppState>>,
    JsonBody(record): JsonBody<DnsRecord>,
) -> Result<(StatusCode, Json<DnsRecord>), ApiError> {
    let record = validate(record)?;
    let stored = state.store.add_dns_record(record).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /dns
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<DnsQuery>,
) -> Result<Json<Vec<DnsRecord>>, ApiError> {
    let filter = DnsFilter {
        record_type: query.record_type,
        name: query.name,
    };
    Ok(Json(state.store.list_dns_records(&filter).await?))
}

/// GET /dns/{id}
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<DnsRecord>, ApiError> {
    state
        .store
        .get_dns_record(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("DNS record {} does not exist", id)))
}

/// POST /dns/{id}
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    PathParams(id): PathParams<i64>,
    JsonBody(record): JsonBody<DnsRecord>,
) -> Result<Json<DnsRecord>, ApiError> {
    let record = validate(record)?;
    state
        .store
        .update_dns_record(id, record)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("DNS record {} does not exist", id)))
}

/// DELETE /dns/{ids}
///
/// Ids are comma separated; unknown ids are ignored.
pub async fn delete_records(
    State(state): State<Arc<AppState>>,
    PathParams(ids): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    let ids = parse_ids(&ids)?;
    let removed = state.store.delete_dns_records(&ids).await?;
    info!(requested = ids.len(), removed, "DNS records deleted");
    Ok(StatusCode::OK)
}
