mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{fixture_dictionary, Workspace};
use lexicon::server::router;
use lexicon::DictionaryService;

fn app(static_dir: Option<&Path>) -> Router {
    router(Arc::new(DictionaryService::new(fixture_dictionary())), static_dir)
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app(None), Method::GET, uri).await;
    (status, serde_json::from_str(&body).unwrap_or_else(|e| panic!("{} is not JSON: {}", body, e)))
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn lookup_returns_meanings() {
    let (status, body) = get_json("/api/v1/words/apple").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "word": "apple", "meanings": ["A round fruit.", "A technology company."] })
    );
}

#[tokio::test]
async fn lookup_decodes_percent_encoded_words() {
    let (status, body) = get_json("/api/v1/words/caf%C3%A9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word"], "café");
}

#[tokio::test]
async fn lookup_miss_is_404_with_body() {
    let (status, body) = get_json("/api/v1/words/Apple").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Word not found", "word": "Apple" }));
}

#[tokio::test]
async fn suggest_is_case_insensitive_and_counted() {
    let (status, body) = get_json("/api/v1/suggest/AP?limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "prefix": "AP", "suggestions": ["apple", "Apply", "apricot"], "count": 3 })
    );
}

#[tokio::test]
async fn suggest_limit_bounds_results() {
    let (_, body) = get_json("/api/v1/suggest/a?limit=2").await;
    assert_eq!(body["suggestions"], json!(["apple", "Apply"]));

    let (_, body) = get_json("/api/v1/suggest/a?limit=0").await;
    assert_eq!(body["count"], 3);

    let (_, body) = get_json("/api/v1/suggest/a").await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn suggest_rejects_non_numeric_limit() {
    let (status, body) = send(app(None), Method::GET, "/api/v1/suggest/a?limit=ten").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid limit parameter");
}

#[tokio::test]
async fn suggest_rejects_padded_limit() {
    for uri in ["/api/v1/suggest/a?limit=%205", "/api/v1/suggest/a?limit=5%20"] {
        let (status, body) = send(app(None), Method::GET, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, "Invalid limit parameter");
    }
}

#[tokio::test]
async fn empty_segments_are_bad_requests() {
    let (status, body) = send(app(None), Method::GET, "/api/v1/words/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Word parameter is required");

    let (status, body) = send(app(None), Method::GET, "/api/v1/suggest/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Prefix parameter is required");
}

#[tokio::test]
async fn stats_counts_words() {
    let (status, body) = get_json("/api/v1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "total_words": 7 }));
}

#[tokio::test]
async fn non_get_methods_are_not_allowed() {
    let (status, _) = send(app(None), Method::POST, "/api/v1/stats").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cors_headers_are_present() {
    let response = app(None)
        .oneshot(
            Request::builder()
                .uri("/api/v1/stats")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn static_files_fall_back_to_index() {
    let ws = Workspace::new();
    let static_dir = ws.root().join("static");
    fs::create_dir_all(&static_dir).unwrap();
    fs::write(static_dir.join("index.html"), "<html>lexicon</html>").unwrap();
    fs::write(static_dir.join("app.js"), "console.log('hi')").unwrap();

    let (status, body) = send(app(Some(&static_dir)), Method::GET, "/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log('hi')");

    let (status, body) = send(app(Some(&static_dir)), Method::GET, "/words/apple").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>lexicon</html>");

    let (status, _) = send(app(Some(&static_dir)), Method::GET, "/api/v2/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app(Some(&static_dir)), Method::GET, "/api/v1/stats").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_static_dir_serves_api_only() {
    let ws = Workspace::new();
    let (status, _) = send(app(Some(&ws.path("nope"))), Method::GET, "/index.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
