//! Certificate Policy Handlers
//!
//! Policies, policy groups, and the binding of groups to domains.
//! Collection endpoints answer 204 No Content when nothing is stored.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use direct_config_core::{CertPolicy, CertPolicyGroup, CertPolicyGroupUse};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::ApiError;
use crate::api::extract::{JsonBody, PathParams};
use crate::api::handlers::AppState;

/// 200 with the collection, or 204 when it is empty
fn collection<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(items).into_response()
    }
}

// =============================================================================
// Policies
// =============================================================================

/// GET /certpolicy
pub async fn list_policies(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(collection(state.store.list_policies().await?))
}

/// GET /certpolicy/{name}
pub async fn get_policy(
    State(state): State<Arc<AppState>>,
    PathParams(name): PathParams<String>,
) -> Result<Json<CertPolicy>, ApiError> {
    state
        .store
        .get_policy(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Policy '{}' does not exist", name)))
}

/// PUT /certpolicy
pub async fn add_policy(
    State(state): State<Arc<AppState>>,
    JsonBody(policy): JsonBody<CertPolicy>,
) -> Result<(StatusCode, Json<CertPolicy>), ApiError> {
    if policy.policy_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Policy name cannot be empty".into()));
    }
    let stored = state.store.add_policy(policy).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// DELETE /certpolicy/{name}
pub async fn delete_policy(
    State(state): State<Arc<AppState>>,
    PathParams(name): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_policy(&name).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound(format!("Policy '{}' does not exist", name)))
    }
}

// =============================================================================
// Policy Groups
// =============================================================================

/// GET /certpolicy/groups
pub async fn list_groups(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(collection(state.store.list_policy_groups().await?))
}

/// GET /certpolicy/groups/{name}
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    PathParams(name): PathParams<String>,
) -> Result<Json<CertPolicyGroup>, ApiError> {
    state
        .store
        .get_policy_group(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Policy group '{}' does not exist", name)))
}

/// PUT /certpolicy/groups
///
/// Policies referenced by the group must already exist; they are matched by name.
pub async fn add_group(
    State(state): State<Arc<AppState>>,
    JsonBody(group): JsonBody<CertPolicyGroup>,
) -> Result<(StatusCode, Json<CertPolicyGroup>), ApiError> {
    if group.policy_group_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Policy group name cannot be empty".into()));
    }
    let stored = state.store.add_policy_group(group).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// DELETE /certpolicy/groups/{name}
pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    PathParams(name): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_policy_group(&name).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound(format!("Policy group '{}' does not exist", name)))
    }
}

/// POST /certpolicy/groups/uses/{group}/addPolicy
pub async fn add_policy_use(
    State(state): State<Arc<AppState>>,
    PathParams(group): PathParams<String>,
    JsonBody(policy_use): JsonBody<CertPolicyGroupUse>,
) -> Result<StatusCode, ApiError> {
    state.store.add_policy_use(&group, policy_use).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /certpolicy/groups/uses/{group}/removePolicy
pub async fn remove_policy_use(
    State(state): State<Arc<AppState>>,
    PathParams(group): PathParams<String>,
    JsonBody(policy_use): JsonBody<CertPolicyGroupUse>,
) -> Result<StatusCode, ApiError> {
    if state.store.remove_policy_use(&group, &policy_use).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        warn!(
            group = %group,
            policy = %policy_use.policy.policy_name,
            usage = %policy_use.usage,
            "No matching policy use to remove"
        );
        Err(ApiError::NotFound(format!(
            "Policy '{}' is not used by group '{}'",
            policy_use.policy.policy_name, group
        )))
    }
}

// =============================================================================
// Group/Domain Bindings
// =============================================================================

/// GET /certpolicy/groups/domain/{domain}
pub async fn list_groups_for_domain(
    State(state): State<Arc<AppState>>,
    PathParams(domain): PathParams<String>,
) -> Result<Response, ApiError> {
    Ok(collection(state.store.list_groups_for_domain(&domain).await?))
}

/// POST /certpolicy/groups/domain/{group}/{domain}
pub async fn associate_group_domain(
    State(state): State<Arc<AppState>>,
    PathParams((group, domain)): PathParams<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.store.associate_group_domain(&group, &domain).await?;
    info!(group = %group, domain = %domain, "Policy group bound to domain");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /certpolicy/groups/domain/{group}/{domain}
pub async fn disassociate_group_domain(
    State(state): State<Arc<AppState>>,
    PathParams((group, domain)): PathParams<(String, String)>,
) -> Result<StatusCode, ApiError> {
    if state.store.disassociate_group_domain(&group, &domain).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound(format!(
            "Policy group '{}' is not bound to domain '{}'",
            group, domain
        )))
    }
}
