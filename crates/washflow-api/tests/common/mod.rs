//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use washflow_appointments::application::engine::WashflowEngine;
use washflow_catalog::application::catalog::Catalog;
use washflow_catalog::application::directory::Directory;
use washflow_core::clock::Clock;
use washflow_core::slot::DurableSlot;
use washflow_test_support::{FixedClock, InMemorySlot, SequenceIds};

use washflow_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over `slot` with the built-in catalog and
/// deterministic clock and ids. Uses the same route structure as `main.rs`.
pub async fn build_test_app_over(slot: Arc<dyn DurableSlot>) -> Router {
    let engine = WashflowEngine::open(
        Catalog::builtin(),
        Directory::builtin(),
        slot,
        Arc::new(SequenceIds::starting_at(100)),
        fixed_clock(),
    )
    .await;
    washflow_api::app(AppState::new(engine))
}

/// Build the full app router over a fresh in-memory slot.
pub async fn build_test_app() -> Router {
    build_test_app_over(Arc::new(InMemorySlot::new())).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Booking body for requester `u1` with the seed vehicle.
pub fn booking(partner_id: &str, service_id: &str) -> serde_json::Value {
    serde_json::json!({
        "requester_id": "u1",
        "requester_name": "João Silva",
        "partner_id": partner_id,
        "service_id": service_id,
        "vehicle": { "plate": "ABC-1234", "model": "Toyota Corolla", "color": "Silver" }
    })
}
