//! # Integration Tests for devinv-api
//!
//! Drives the full router (in-memory store) through device creation,
//! sparse updates, the IN_USE guards, filtered listings, deletion, error
//! bodies, health probes, metrics, and OpenAPI generation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use devinv_api::state::AppState;
use devinv_core::{MockDeviceStore, StoreError};

/// Helper: build the test app over a fresh in-memory store.
fn test_app() -> axum::Router {
    devinv_api::app(AppState::new().unwrap())
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper: create a device and return its id.
async fn create(app: &axum::Router, name: &str, brand: &str, state: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/devices",
            json!({"name": name, "brand": brand, "state": state}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe_without_database() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Create -------------------------------------------------------------------

#[tokio::test]
async fn test_create_device_returns_201_with_location() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/devices",
            json!({"name": "Tablet", "brand": "Apple", "state": "AVAILABLE"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let body = body_json(response).await;
    assert_eq!(location, format!("/devices/{}", body["id"]));
    assert_eq!(body["name"], "Tablet");
    assert_eq!(body["brand"], "Apple");
    assert_eq!(body["state"], "AVAILABLE");
    assert!(body["creationTime"].is_string());
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = test_app();
    let id = create(&app, "Phone", "Samsung", "IN_USE").await;

    let response = app.oneshot(get(&format!("/devices/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Phone");
    assert_eq!(body["brand"], "Samsung");
    assert_eq!(body["state"], "IN_USE");
}

#[tokio::test]
async fn test_create_missing_fields_returns_validation_errors() {
    let response = test_app()
        .oneshot(json_request(Method::POST, "/devices", json!({"brand": " "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Validation failed");
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["name", "brand", "state"]);
}

#[tokio::test]
async fn test_create_invalid_state_returns_invalid_body() {
    let response = test_app()
        .oneshot(json_request(
            Method::POST,
            "/devices",
            json!({"name": "Tablet", "brand": "Apple", "state": "BROKEN"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert_eq!(
        body["message"],
        "Invalid value for field 'state': 'BROKEN'. Expected type: DeviceState"
    );
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_create_malformed_json_returns_400() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/devices")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert_eq!(
        body["message"],
        "Invalid value for field 'state': 'LOST'. Expected type: DeviceState"
    );
}

// -- Get ----------------------------------------------------------------------

#[tokio::test]
async fn test_get_unknown_device_returns_404() {
    let response = test_app().oneshot(get("/devices/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Device Not Found");
    assert!(body["message"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let response = test_app().oneshot(get("/devices/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Bad Request");
}

// -- Update -------------------------------------------------------------------

#[tokio::test]
async fn test_update_partial_rename_keeps_other_fields() {
    let app = test_app();
    let id = create(&app, "Phone", "Samsung", "AVAILABLE").await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/devices/{id}"),
            json!({"name": "Tablet"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Tablet");
    assert_eq!(body["brand"], "Samsung");
    assert_eq!(body["state"], "AVAILABLE");
}

#[tokio::test]
async fn test_update_in_use_brand_change_returns_409() {
    let app = test_app();
    let id = create(&app, "Phone", "Samsung", "IN_USE").await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/devices/{id}"),
            json!({"brand": "Apple", "state": "IN_USE"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Conflict");
    assert_eq!(
        body["message"],
        "Cannot update name or brand when device is IN_USE"
    );

    let stored = body_json(app.oneshot(get(&format!("/devices/{id}"))).await.unwrap()).await;
    assert_eq!(stored["brand"], "Samsung");
}

#[tokio::test]
async fn test_update_in_use_state_only_succeeds() {
    let app = test_app();
    let id = create(&app, "Phone", "Samsung", "IN_USE").await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/devices/{id}"),
            json!({"name": "Phone", "state": "INACTIVE"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["state"], "INACTIVE");
    assert_eq!(body["name"], "Phone");
}

#[tokio::test]
async fn test_update_blank_brand_returns_400() {
    let app = test_app();
    let id = create(&app, "Phone", "Samsung", "AVAILABLE").await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/devices/{id}"),
            json!({"brand": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "brand cannot be blank");
}

#[tokio::test]
async fn test_update_unknown_device_returns_404() {
    let response = test_app()
        .oneshot(json_request(
            Method::PUT,
            "/devices/999",
            json!({"name": "X"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("999"));
}

#[tokio::test]
async fn test_update_invalid_state_returns_400() {
    let app = test_app();
    let id = create(&app, "Phone", "Samsung", "AVAILABLE").await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/devices/{id}"),
            json!({"state": "LOST"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert_eq!(
        body["message"],
        "Invalid value for field 'state': 'LOST'. Expected type: DeviceState"
    );
}

// -- Listing ------------------------------------------------------------------

#[tokio::test]
async fn test_list_devices_empty() {
    let response = test_app().oneshot(get("/devices")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_list_filters_by_brand_and_state() {
    let app = test_app();
    create(&app, "Phone", "Samsung", "AVAILABLE").await;
    create(&app, "Laptop", "Apple", "IN_USE").await;
    create(&app, "Watch", "Samsung", "IN_USE").await;

    let all = body_json(app.clone().oneshot(get("/devices")).await.unwrap()).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let samsung = body_json(
        app.clone()
            .oneshot(get("/devices/brand/Samsung"))
            .await
            .unwrap(),
    )
    .await;
    let names: Vec<_> = samsung
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Phone", "Watch"]);

    let in_use = body_json(
        app.clone()
            .oneshot(get("/devices/state/IN_USE"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(in_use.as_array().unwrap().len(), 2);

    let inactive = body_json(app.oneshot(get("/devices/state/INACTIVE")).await.unwrap()).await;
    assert_eq!(inactive, json!([]));
}

#[tokio::test]
async fn test_list_by_invalid_state_returns_400() {
    let response = test_app()
        .oneshot(get("/devices/state/BROKEN"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], 400);
}

// -- Delete -------------------------------------------------------------------

#[tokio::test]
async fn test_delete_available_device_returns_204() {
    let app = test_app();
    let id = create(&app, "Phone", "Samsung", "AVAILABLE").await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/devices/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get(&format!("/devices/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_in_use_device_returns_409() {
    let app = test_app();
    let id = create(&app, "Phone", "Samsung", "IN_USE").await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/devices/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["message"],
        "Cannot delete device when state is IN_USE"
    );

    let response = app.oneshot(get(&format!("/devices/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_unknown_device_returns_404() {
    let response = test_app().oneshot(delete("/devices/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Storage failures ---------------------------------------------------------

#[tokio::test]
async fn test_storage_failure_returns_500_without_details() {
    let mut store = MockDeviceStore::new();
    store
        .expect_list_all()
        .returning(|| Err(StoreError::Backend("connection refused".to_string())));

    let state = AppState::with_store(Arc::new(store), None).unwrap();
    let response = devinv_api::app(state)
        .oneshot(get("/devices"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(body.contains("Internal Server Error"));
    assert!(!body.contains("connection refused"));
}

// -- Metrics & OpenAPI --------------------------------------------------------

#[tokio::test]
async fn test_metrics_count_requests_and_errors() {
    let app = test_app();
    app.clone().oneshot(get("/devices")).await.unwrap();
    app.clone().oneshot(get("/devices/999")).await.unwrap();

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(
        body.contains(r#"devinv_http_requests_total{method="GET",path="/devices",status="200"} 1"#),
        "{body}"
    );
    assert!(
        body.contains(
            r#"devinv_http_errors_total{method="GET",path="/devices/{id}",status="404"} 1"#
        ),
        "{body}"
    );
    assert!(!body.contains("/devices/999"), "{body}");
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/devices/{id}"].is_object());
    assert_eq!(spec["tags"][0]["name"], "devices");
}
