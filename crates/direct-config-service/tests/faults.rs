//! Repository fault propagation
//!
//! A data-access failure on any call must reach the client as a 500 with the
//! `INTERNAL_ERROR` code. Nothing is retried.

mod common;

use axum::http::StatusCode;
use direct_config_core::{Anchor, CertPolicyGroup, Domain};

use common::*;

async fn assert_internal(response: axum::http::Response<axum::body::Body>) {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(response).await, "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_anchor_faults() {
    let app = failing_app();

    assert_internal(send(&app, get("/anchor/")).await).await;
    assert_internal(send(&app, get("/anchor/test.com")).await).await;
    assert_internal(send(&app, put_json("/anchor", &Anchor::new("test.com", fake_certificate(1)))).await).await;
    assert_internal(send(&app, delete("/anchor/ids/1,2")).await).await;
}

#[tokio::test]
async fn test_certpolicy_faults() {
    let app = failing_app();

    assert_internal(send(&app, get("/certpolicy/groups")).await).await;
    assert_internal(send(&app, get("/certpolicy/groups/Group1")).await).await;
    assert_internal(send(&app, put_json("/certpolicy/groups", &CertPolicyGroup::new("Group1"))).await).await;
    assert_internal(send(&app, get("/certpolicy")).await).await;
}

#[tokio::test]
async fn test_dns_faults() {
    let app = failing_app();

    assert_internal(send(&app, get("/dns")).await).await;
    assert_internal(send(&app, delete("/dns/1,2,3")).await).await;
}

#[tokio::test]
async fn test_domain_faults() {
    let app = failing_app();

    assert_internal(send(&app, get("/domain/test.com")).await).await;
    assert_internal(send(&app, put_json("/domain", &Domain::new("test.com"))).await).await;
    assert_internal(send(&app, delete("/domain/test.com")).await).await;
}

#[tokio::test]
async fn test_setting_faults() {
    let app = failing_app();

    assert_internal(send(&app, get("/setting")).await).await;
    assert_internal(send(&app, get("/setting/TestName")).await).await;
    assert_internal(send(&app, put_empty("/setting/TestName/TestValue")).await).await;
}

#[tokio::test]
async fn test_health_does_not_touch_store() {
    let app = failing_app();
    assert_eq!(send(&app, get("/health")).await.status(), StatusCode::OK);
}
