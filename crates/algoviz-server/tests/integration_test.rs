//! End-to-end tests for the algoviz HTTP API.
//!
//! Tests use `tower::ServiceExt::oneshot` to send requests directly to the
//! router without starting a network server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use algoviz_core::InputLimits;
use algoviz_server::router::build_router;
use algoviz_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_app() -> Router {
    build_router(AppState::default())
}

/// Sends a POST request with a raw body and returns (status, json).
async fn post_raw(app: &Router, path: &str, body: Vec<u8>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

async fn post_json(app: &Router, path: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    post_raw(app, path, serde_json::to_vec(&body).unwrap()).await
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_engine_count() {
    let app = test_app();
    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithms"], json!(20));
}

#[tokio::test]
async fn catalog_lists_all_algorithms() {
    let app = test_app();
    let (status, body) = get_json(&app, "/algorithms").await;
    assert_eq!(status, StatusCode::OK);
    let algorithms = body["algorithms"].as_array().unwrap();
    assert_eq!(algorithms.len(), 20);
    assert_eq!(algorithms[0]["id"], json!("bubble"));
    assert_eq!(algorithms[0]["runs"], json!(0));
}

#[tokio::test]
async fn catalog_entry_counts_runs() {
    let app = test_app();
    let (status, _) = post_json(&app, "/algorithms/dfs/trace", json!({ "adjacency": { "A": ["B"] }, "start": "A" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app, "/algorithms/DFS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Depth-First Search"));
    assert_eq!(body["runs"], json!(1));
}

#[tokio::test]
async fn unknown_algorithm_is_404() {
    let app = test_app();
    let (status, body) = get_json(&app, "/algorithms/bogosort").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

// ---------------------------------------------------------------------------
// Traces
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trace_response_shape() {
    let app = test_app();
    let (status, body) = post_json(&app, "/algorithms/binarySearch/trace", json!({ "numbers": [1, 3, 5, 7], "target": 7 })).await;
    assert_eq!(status, StatusCode::OK, "{:?}", body);
    assert!(body["runId"].as_str().is_some());
    assert_eq!(body["algorithm"], json!("binarySearch"));
    assert_eq!(body["found"], json!(true));
    assert_eq!(body["index"], json!(3));
    let steps = body["steps"].as_array().unwrap();
    assert_eq!(body["stats"]["totalSteps"], json!(steps.len()));
    assert_eq!(steps.last().unwrap()["action"], json!("FOUND"));
    assert!(body["code"].as_str().unwrap().contains("binary_search"));
}

#[tokio::test]
async fn legacy_routes_and_field_names() {
    let app = test_app();
    let (status, body) = post_json(&app, "/api/bubbleSteps", json!({ "inputs": [3, 2, 1] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sorted"], json!([1, 2, 3]));

    let (status, body) = post_json(&app, "/api/nQueenSteps", json!({ "nSize": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["solutionCount"], json!(2));

    let (status, body) = post_json(&app, "/api/gridPaths2Steps", json!({ "gridMatrix": [[0, 0, 0], [0, -1, 0], [0, 0, 0]] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPaths"], json!(2));
}

#[tokio::test]
async fn exact_big_results_survive_the_wire() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/algorithms/fibonacci/trace")
                .header("content-type", "application/json")
                .body(Body::from(r#"{ "n": 100 }"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    // fib(100) is above u64::MAX, so check the raw text rather than a parsed Value.
    let text = String::from_utf8(body_bytes.to_vec()).unwrap();
    assert!(text.contains(r#""result":354224848179261915075,"isValid":true"#));
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = test_app();
    let (status, body) = post_raw(&app, "/algorithms/lcs/trace", b"{ not json".to_vec()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));
}

#[tokio::test]
async fn wrong_shape_is_400() {
    let app = test_app();
    let (status, body) = post_json(&app, "/algorithms/knapsack01/trace", json!({ "weights": [1], "capacity": 3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("values"));
}

#[tokio::test]
async fn limits_are_413() {
    let limits = InputLimits {
        max_array_len: 3,
        ..InputLimits::default()
    };
    let app = build_router(AppState::new(limits));
    let (status, body) = post_json(&app, "/algorithms/merge/trace", json!({ "numbers": [4, 3, 2, 1] })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], json!("LIMIT_EXCEEDED"));
    assert_eq!(body["error"]["details"], json!({ "limit": 3, "actual": 4 }));
}

#[tokio::test]
async fn repeated_neighbors_are_413() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/algorithms/dfs/trace",
        json!({ "adjacency": { "A": vec!["B"; 5_000] }, "start": "A" }),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["details"], json!({ "limit": 1000, "actual": 5000 }));
}

#[tokio::test]
async fn engine_level_errors_are_still_200() {
    let app = test_app();
    let (status, body) = post_json(&app, "/algorithms/bfs/trace", json!({ "adjacency": { "A": ["B"] }, "start": "Z" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["traversal"], json!([]));
    assert_eq!(body["steps"][0]["action"], json!("ERROR"));
}
