//! Shared helpers for the HTTP integration tests
//!
//! Requests are driven in-process through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use direct_config_core::{
    Anchor, CertPolicy, CertPolicyGroup, CertPolicyGroupUse, DnsRecord, Domain, Setting,
};
use direct_config_service::storage::{AnchorFilter, DnsFilter, DomainFilter};
use direct_config_service::{create_router, AppState, ConfigStore, MemoryStore, StorageError};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

// =============================================================================
// Apps
// =============================================================================

/// Router over a fresh in-memory store
pub fn test_app() -> Router {
    create_router(Arc::new(AppState::new(Arc::new(MemoryStore::new()))))
}

/// Router whose store fails every call
pub fn failing_app() -> Router {
    create_router(Arc::new(AppState::new(Arc::new(FailingStore))))
}

// =============================================================================
// Requests
// =============================================================================

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn put_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn put_json<T: serde::Serialize>(uri: &str, body: &T) -> Request<Body> {
    json_request("PUT", uri, body)
}

pub fn post_json<T: serde::Serialize>(uri: &str, body: &T) -> Request<Body> {
    json_request("POST", uri, body)
}

fn json_request<T: serde::Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// JSON-typed request with an arbitrary body, valid or not
pub fn put_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request through a clone of the router
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Error code from a JSON error body
pub async fn error_code(response: Response<Body>) -> String {
    let value: serde_json::Value = body_json(response).await;
    value["code"].as_str().unwrap_or_default().to_string()
}

/// Deterministic stand-in for DER certificate bytes
pub fn fake_certificate(seed: u8) -> Vec<u8> {
    let mut bytes = vec![0x30, 0x82, 0x01, seed];
    bytes.extend((0..64u8).map(|i| i.wrapping_mul(31).wrapping_add(seed)));
    bytes
}

// =============================================================================
// Fault injection
// =============================================================================

/// Store that raises a data-access fault on every call
#[derive(Debug)]
pub struct FailingStore;

fn fault() -> StorageError {
    StorageError::Database("simulated data access failure".into())
}

#[async_trait]
impl ConfigStore for FailingStore {
    async fn add_anchor(&self, _: Anchor) -> Result<Anchor, StorageError> {
        Err(fault())
    }
    async fn list_anchors(&self) -> Result<Vec<Anchor>, StorageError> {
        Err(fault())
    }
    async fn list_anchors_for_owner(
        &self,
        _: &str,
        _: &AnchorFilter,
    ) -> Result<Vec<Anchor>, StorageError> {
        Err(fault())
    }
    async fn delete_anchors(&self, _: &[i64]) -> Result<u64, StorageError> {
        Err(fault())
    }
    async fn delete_anchors_for_owner(&self, _: &str) -> Result<u64, StorageError> {
        Err(fault())
    }

    async fn add_policy(&self, _: CertPolicy) -> Result<CertPolicy, StorageError> {
        Err(fault())
    }
    async fn list_policies(&self) -> Result<Vec<CertPolicy>, StorageError> {
        Err(fault())
    }
    async fn get_policy(&self, _: &str) -> Result<Option<CertPolicy>, StorageError> {
        Err(fault())
    }
    async fn delete_policy(&self, _: &str) -> Result<bool, StorageError> {
        Err(fault())
    }

    async fn add_policy_group(&self, _: CertPolicyGroup) -> Result<CertPolicyGroup, StorageError> {
        Err(fault())
    }
    async fn list_policy_groups(&self) -> Result<Vec<CertPolicyGroup>, StorageError> {
        Err(fault())
    }
    async fn get_policy_group(&self, _: &str) -> Result<Option<CertPolicyGroup>, StorageError> {
        Err(fault())
    }
    async fn delete_policy_group(&self, _: &str) -> Result<bool, StorageError> {
        Err(fault())
    }
    async fn add_policy_use(&self, _: &str, _: CertPolicyGroupUse) -> Result<(), StorageError> {
        Err(fault())
    }
    async fn remove_policy_use(
        &self,
        _: &str,
        _: &CertPolicyGroupUse,
    ) -> Result<bool, StorageError> {
        Err(fault())
    }
    async fn associate_group_domain(&self, _: &str, _: &str) -> Result<(), StorageError> {
        Err(fault())
    }
    async fn disassociate_group_domain(&self, _: &str, _: &str) -> Result<bool, StorageError> {
        Err(fault())
    }
    async fn list_groups_for_domain(&self, _: &str) -> Result<Vec<CertPolicyGroup>, StorageError> {
        Err(fault())
    }

    async fn add_dns_record(&self, _: DnsRecord) -> Result<DnsRecord, StorageError> {
        Err(fault())
    }
    async fn list_dns_records(&self, _: &DnsFilter) -> Result<Vec<DnsRecord>, StorageError> {
        Err(fault())
    }
    async fn get_dns_record(&self, _: i64) -> Result<Option<DnsRecord>, StorageError> {
        Err(fault())
    }
    async fn update_dns_record(
        &self,
        _: i64,
        _: DnsRecord,
    ) -> Result<Option<DnsRecord>, StorageError> {
        Err(fault())
    }
    async fn delete_dns_records(&self, _: &[i64]) -> Result<u64, StorageError> {
        Err(fault())
    }

    async fn add_domain(&self, _: Domain) -> Result<Domain, StorageError> {
        Err(fault())
    }
    async fn get_domain(&self, _: &str) -> Result<Option<Domain>, StorageError> {
        Err(fault())
    }
    async fn list_domains(&self, _: &DomainFilter) -> Result<Vec<Domain>, StorageError> {
        Err(fault())
    }
    async fn update_domain(&self, _: Domain) -> Result<Option<Domain>, StorageError> {
        Err(fault())
    }
    async fn delete_domain(&self, _: &str) -> Result<bool, StorageError> {
        Err(fault())
    }

    async fn add_setting(&self, _: &str, _: &str) -> Result<Setting, StorageError> {
        Err(fault())
    }
    async fn list_settings(&self) -> Result<Vec<Setting>, StorageError> {
        Err(fault())
    }
    async fn get_setting(&self, _: &str) -> Result<Option<Setting>, StorageError> {
        Err(fault())
    }
    async fn update_setting(&self, _: &str, _: &str) -> Result<Option<Setting>, StorageError> {
        Err(fault())
    }
    async fn delete_setting(&self, _: &str) -> Result<bool, StorageError> {
        Err(fault())
    }
}
