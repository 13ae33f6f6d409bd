//! Anchor resource tests

mod common;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine};
use direct_config_core::{Anchor, EntityStatus, Thumbprint};
use serde_json::json;

use common::*;

#[tokio::test]
async fn test_list_empty_store_returns_empty_collection() {
    let app = test_app();

    let response = send(&app, get("/anchor/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let anchors: Vec<Anchor> = body_json(response).await;
    assert!(anchors.is_empty());
}

#[tokio::test]
async fn test_added_anchors_are_listed_in_order() {
    let app = test_app();

    let submitted = vec![
        Anchor::new("test.com", fake_certificate(1))
            .with_incoming(true)
            .with_outgoing(true)
            .with_status(EntityStatus::Enabled),
        Anchor::new("test2.com", fake_certificate(2))
            .with_incoming(false)
            .with_outgoing(true)
            .with_status(EntityStatus::Disabled),
    ];

    for anchor in &submitted {
        let response = send(&app, put_json("/anchor", anchor)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = send(&app, get("/anchor/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<Anchor> = body_json(response).await;

    assert_eq!(listed.len(), submitted.len());
    for (got, want) in listed.iter().zip(&submitted) {
        assert!(got.id > 0);
        assert_eq!(got.owner, want.owner);
        assert_eq!(got.certificate_data, want.certificate_data);
        assert_eq!(got.incoming, want.incoming);
        assert_eq!(got.outgoing, want.outgoing);
        assert_eq!(got.status, want.status);
        assert!(!got.thumbprint.is_empty());
        assert_eq!(got.thumbprint, Thumbprint::of(&want.certificate_data).to_hex());
    }
}

#[tokio::test]
async fn test_thumbprint_is_derived_not_trusted() {
    let app = test_app();
    let cert = fake_certificate(7);

    let body = json!({
        "owner": "example.org",
        "thumbprint": "0000",
        "certificate_data": STANDARD.encode(&cert),
        "incoming": true,
    });
    let response = send(&app, put_json("/anchor", &body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored: Anchor = body_json(response).await;
    assert_eq!(stored.thumbprint, Thumbprint::of(&cert).to_hex());
}

#[tokio::test]
async fn test_duplicate_anchor_conflicts() {
    let app = test_app();
    let anchor = Anchor::new("test.com", fake_certificate(3));

    assert_eq!(send(&app, put_json("/anchor", &anchor)).await.status(), StatusCode::CREATED);

    let response = send(&app, put_json("/anchor", &anchor)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(error_code(response).await, "CONFLICT");

    let listed: Vec<Anchor> = body_json(send(&app, get("/anchor")).await).await;
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_empty_certificate_rejected() {
    let app = test_app();
    let anchor = Anchor::new("test.com", Vec::new());

    let response = send(&app, put_json("/anchor", &anchor)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_lookup_with_direction_filter() {
    let app = test_app();
    for (seed, incoming) in [(1u8, true), (2, false)] {
        let anchor = Anchor::new("test.com", fake_certificate(seed)).with_incoming(incoming);
        send(&app, put_json("/anchor", &anchor)).await;
    }
    send(&app, put_json("/anchor", &Anchor::new("other.com", fake_certificate(3)))).await;

    let all: Vec<Anchor> = body_json(send(&app, get("/anchor/test.com")).await).await;
    assert_eq!(all.len(), 2);

    let incoming: Vec<Anchor> =
        body_json(send(&app, get("/anchor/test.com?incoming=true")).await).await;
    assert_eq!(incoming.len(), 1);
    assert!(incoming[0].incoming);

    let none: Vec<Anchor> = body_json(send(&app, get("/anchor/unknown.com")).await).await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_delete_by_ids_then_list_is_empty() {
    let app = test_app();
    let mut ids = Vec::new();
    for seed in 1..=3u8 {
        let anchor = Anchor::new("test.com", fake_certificate(seed));
        let stored: Anchor = body_json(send(&app, put_json("/anchor", &anchor)).await).await;
        ids.push(stored.id.to_string());
    }

    let response = send(&app, delete(&format!("/anchor/ids/{}", ids.join(",")))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: Vec<Anchor> = body_json(send(&app, get("/anchor/")).await).await;
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_delete_by_owner_leaves_others() {
    let app = test_app();
    send(&app, put_json("/anchor", &Anchor::new("a.com", fake_certificate(1)))).await;
    send(&app, put_json("/anchor", &Anchor::new("b.com", fake_certificate(2)))).await;

    assert_eq!(send(&app, delete("/anchor/a.com")).await.status(), StatusCode::OK);

    let listed: Vec<Anchor> = body_json(send(&app, get("/anchor")).await).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].owner, "b.com");
}

#[tokio::test]
async fn test_malformed_id_list_rejected() {
    let app = test_app();
    let response = send(&app, delete("/anchor/ids/1,abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "BAD_REQUEST");
}

#[tokio::test]
async fn test_delete_ids_without_list_rejected() {
    let app = test_app();
    send(&app, put_json("/anchor", &Anchor::new("ids", fake_certificate(1)))).await;

    let response = send(&app, delete("/anchor/ids")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "BAD_REQUEST");

    let anchors: Vec<Anchor> = body_json(send(&app, get("/anchor/")).await).await;
    assert_eq!(anchors.len(), 1);
}
