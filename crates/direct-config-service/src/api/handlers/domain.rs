//! Domain Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use direct_config_core::{Domain, EntityStatus};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::extract::{JsonBody, PathParams, QueryParams};
use crate::api::handlers::AppState;
use crate::storage::DomainFilter;

/// Query parameters for domain listings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainQuery {
    /// Case-insensitive substring match on the domain name
    pub domain_name: Option<String>,
    pub entity_status: Option<EntityStatus>,
}

fn validate(domain: &Domain) -> Result<(), ApiError> {
    if domain.domain_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Domain name cannot be empty".into()));
    }
    if let Some(postmaster) = &domain.postmaster_address {
        if !postmaster.email_address.contains('@') {
            return Err(ApiError::BadRequest(format!(
                "Postmaster address '{}' is not an email address",
                postmaster.email_address
            )));
        }
    }
    Ok(())
}

/// PUT /domain
pub async fn add_domain(
    State(state): State<Arc<AppState>>,
    JsonBody(domain): JsonBody<Domain>,
) -> Result<(StatusCode, Json<Domain>), ApiError> {
    validate(&domain)?;
    let stored = state.store.add_domain(domain).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /domain/{domain_name}
pub async fn get_domain(
    State(state): State<Arc<AppState>>,
    PathParams(domain_name): PathParams<String>,
) -> Result<Json<Domain>, ApiError> {
    state
        .store
        .get_domain(&domain_name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Domain '{}' does not exist", domain_name)))
}

/// GET /domain
pub async fn list_domains(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<DomainQuery>,
) -> Result<Json<Vec<Domain>>, ApiError> {
    let filter = DomainFilter {
        name_contains: query.domain_name,
        status: query.entity_status,
    };
    Ok(Json(state.store.list_domains(&filter).await?))
}

/// POST /domain
pub async fn update_domain(
    State(state): State<Arc<AppState>>,
    JsonBody(domain): JsonBody<Domain>,
) -> Result<Json<Domain>, ApiError> {
    validate(&domain)?;
    let name = domain.domain_name.clone();
    state
        .store
        .update_domain(domain)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Domain '{}' does not exist", name)))
}

/// DELETE /domain/{domain_name}
pub async fn delete_domain(
    State(state): State<Arc<AppState>>,
    PathParams(domain_name): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_domain(&domain_name).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound(format!("Domain '{}' does not exist", domain_name)))
    }
}
