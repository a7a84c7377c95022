//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::util::ServiceExt;

use eco_compute::api::{AppState, router};

use common::{demo_registry, seeded_simulator, strict_registry};

fn demo_app() -> (Arc<AppState>, Router) {
    let state = AppState::new(seeded_simulator(), demo_registry());
    let app = router(Arc::clone(&state));
    (state, app)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn grid_status_has_flat_camel_case_record() {
    let (_, app) = demo_app();
    let (status, json) = send(&app, get("/grid-status/12")).await;

    assert_eq!(status, StatusCode::OK);
    let obj = json.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "carbonIntensity",
            "gridLoadMw",
            "hour",
            "isPeak",
            "pricePerMwh"
        ]
    );
    assert_eq!(json["hour"], 12);
    assert_eq!(json["gridLoadMw"], 599);
    assert_eq!(json["isPeak"], false);
}

#[tokio::test]
async fn negative_hour_is_served() {
    let (_, app) = demo_app();
    let (status, json) = send(&app, get("/grid-status/-2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hour"], -2);
}

#[tokio::test]
async fn jobs_have_six_fields() {
    let (_, app) = demo_app();
    let (status, json) = send(&app, get("/jobs")).await;

    assert_eq!(status, StatusCode::OK);
    let jobs = json.as_array().unwrap();
    assert_eq!(jobs.len(), 3);
    for job in jobs {
        let obj = job.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        for key in [
            "id",
            "type",
            "powerConsumptionKw",
            "status",
            "urgency",
            "location",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
    }
    assert_eq!(jobs[0]["id"], "job-critical-1");
}

#[tokio::test]
async fn pause_then_migrate_visible_in_listing() {
    let (state, app) = demo_app();

    let (status, _) = send(
        &app,
        post("/jobs/job-training-alpha/status", r#"{"status":"Paused"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(
        &app,
        post("/jobs/job-training-alpha/migrate", r#"{"location":"Iceland"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["updated"], true);

    let (_, jobs) = send(&app, get("/jobs")).await;
    assert_eq!(jobs[1]["status"], "Migrated");
    assert_eq!(jobs[1]["location"], "Iceland");

    // the HTTP layer and the shared state see the same registry
    let alpha = state.registry.get("job-training-alpha").unwrap();
    assert_eq!(alpha.location.as_str(), "Iceland");
}

#[tokio::test]
async fn strict_registry_maps_errors_to_status_codes() {
    let state = AppState::new(seeded_simulator(), strict_registry());
    let app = router(state);

    let (status, json) = send(
        &app,
        post("/jobs/job-does-not-exist/status", r#"{"status":"Completed"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));

    let (status, _) = send(
        &app,
        post("/jobs/job-analytics-daily/status", r#"{"status":"Completed"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(
        &app,
        post("/jobs/job-analytics-daily/status", r#"{"status":"Running"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("Completed -> Running"));
}

#[tokio::test]
async fn cross_origin_get_is_allowed() {
    let (_, app) = demo_app();
    let req = Request::builder()
        .uri("/jobs")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn preflight_for_status_update_succeeds() {
    let (_, app) = demo_app();
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/jobs/job-training-alpha/status")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert!(resp.status().is_success(), "status {}", resp.status());
    assert!(
        resp.headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
    assert!(
        resp.headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
    );
}
