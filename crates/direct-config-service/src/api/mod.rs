//! API module for the configuration service

pub mod error;
pub mod extract;
pub mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::{anchor, certpolicy, dns, domain, setting, AppState};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // Anchors
        .route("/anchor", get(anchor::list_anchors).put(anchor::add_anchor))
        .route("/anchor/", get(anchor::list_anchors))
        .route(
            "/anchor/{owner}",
            get(anchor::list_anchors_for_owner).delete(anchor::delete_anchors_for_owner),
        )
        .route("/anchor/ids", delete(anchor::delete_anchors_missing_ids))
        .route("/anchor/ids/{ids}", delete(anchor::delete_anchors))
        // Certificate policies
        .route("/certpolicy", get(certpolicy::list_policies).put(certpolicy::add_policy))
        .route(
            "/certpolicy/{name}",
            get(certpolicy::get_policy).delete(certpolicy::delete_policy),
        )
        .route(
            "/certpolicy/groups",
            get(certpolicy::list_groups).put(certpolicy::add_group),
        )
        .route(
            "/certpolicy/groups/{name}",
            get(certpolicy::get_group).delete(certpolicy::delete_group),
        )
        .route(
            "/certpolicy/groups/uses/{group}/addPolicy",
            post(certpolicy::add_policy_use),
        )
        .route(
            "/certpolicy/groups/uses/{group}/removePolicy",
            post(certpolicy::remove_policy_use),
        )
        // The first segment is the domain for lookups and the group for bindings;
        // the router needs one parameter name per position.
        .route(
            "/certpolicy/groups/domain/{key}",
            get(certpolicy::list_groups_for_domain),
        )
        .route(
            "/certpolicy/groups/domain/{key}/{domain}",
            post(certpolicy::associate_group_domain).delete(certpolicy::disassociate_group_domain),
        )
        // DNS
        .route("/dns", get(dns::list_records).put(dns::add_record))
        .route(
            "/dns/{id}",
            get(dns::get_record).post(dns::update_record).delete(dns::delete_records),
        )
        // Domains
        .route(
            "/domain",
            get(domain::list_domains).put(domain::add_domain).post(domain::update_domain),
        )
        .route(
            "/domain/{domain_name}",
            get(domain::get_domain).delete(domain::delete_domain),
        )
        // Settings
        .route("/setting", get(setting::list_settings))
        .route(
            "/setting/{name}",
            get(setting::get_setting).delete(setting::delete_setting),
        )
        .route(
            "/setting/{name}/{value}",
            put(setting::add_setting).post(setting::update_setting),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
