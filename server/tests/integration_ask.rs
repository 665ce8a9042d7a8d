use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

fn build_tiny_corpus(dir: &std::path::Path) {
    fs::write(dir.join("rust.txt"), "Rust is a systems language.\nGraydon Hoare started Rust at Mozilla. Rust is fast.").unwrap();
    fs::write(dir.join("python.txt"), "Python is a scripting language. Guido van Rossum created Python.").unwrap();
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn ask_returns_best_file_and_sentence() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = server::build_app(&dir.path().to_string_lossy(), None).unwrap();

    let (status, json) = call(app, "/ask?q=who+started+rust&highlight=true").await;
    assert_eq!(status, StatusCode::OK);
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "rust.txt");
    let sentences = json["sentences"].as_array().unwrap();
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0]["text"], "Graydon Hoare started Rust at Mozilla.");
    assert_eq!(sentences[0]["highlighted"], "Graydon Hoare <em>started</em> <em>Rust</em> at Mozilla.");
    assert_eq!(json["terms"], serde_json::json!(["rust", "started"]));
}

#[tokio::test]
async fn ask_respects_counts() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = server::build_app(&dir.path().to_string_lossy(), None).unwrap();

    let (status, json) = call(app, "/ask?q=language&files=5&sentences=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["files"].as_array().unwrap().len(), 2);
    let scores: Vec<f64> = json["files"].as_array().unwrap().iter().map(|f| f["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn doc_lookup_and_not_found() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = server::build_app(&dir.path().to_string_lossy(), None).unwrap();

    let (status, json) = call(app.clone(), "/docs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!(["python.txt", "rust.txt"]));

    let (status, json) = call(app.clone(), "/doc/python.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["text"].as_str().unwrap().starts_with("Python"));

    let (status, _) = call(app, "/doc/missing.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn empty_corpus_fails_at_startup() {
    let dir = tempdir().unwrap();
    assert!(server::build_app(&dir.path().to_string_lossy(), None).is_err());
}

#[tokio::test]
async fn any_origin_is_allowed_by_default() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = server::build_app(&dir.path().to_string_lossy(), None).unwrap();

    let req = Request::get("/health").header("origin", "https://elsewhere.example").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}
