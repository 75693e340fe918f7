//! End-to-end HTTP tests over the bundled catalog.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use cinecheck_api::config::ApiConfig;
use cinecheck_api::generation::{GenerationError, TextGenerator};
use cinecheck_api::{create_app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../catalog/movies.yaml");

fn state() -> AppState {
    let config = ApiConfig::from_vars(|key| match key {
        "CINECHECK_CATALOG" => Some(CATALOG.to_string()),
        "CINECHECK_WIKIDATA" => Some("off".to_string()),
        _ => None,
    })
    .unwrap();
    AppState::from_config(&config).unwrap()
}

async fn call(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, text) = call(app, "POST", uri, Some(&body.to_string())).await;
    (status, serde_json::from_str(&text).unwrap())
}

// =============================================================================
// POST /verify
// =============================================================================

#[tokio::test]
async fn test_braveheart_report() {
    let app = create_app(state());
    let (status, body) = post_json(
        app,
        "/verify",
        json!({ "sentence": "Braveheart was released in 1995 and won three Oscars." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["claim"], "Braveheart was released in 1995");
    assert_eq!(results[0]["status"], "Supported");
    assert_eq!(results[1]["claim"], "Braveheart won three Oscars");
    assert_eq!(results[1]["status"], "Contradicted");
    assert!(results[1]["explanation"].as_str().unwrap().contains("Oscar wins: 5"));

    let mean = (results[0]["confidence"].as_f64().unwrap() + results[1]["confidence"].as_f64().unwrap()) / 2.0;
    assert!((body["overallConfidence"].as_f64().unwrap() - mean).abs() < 1e-9);
    assert!(body["summary"].as_str().unwrap().contains("Braveheart won three Oscars"));
    assert_eq!(body["counts"]["supported"], 1);
    assert_eq!(body["counts"]["contradicted"], 1);
    assert!(body["requestId"].is_string());
    assert!(body["generatedAt"].is_string());
}

#[tokio::test]
async fn test_unknown_movie_is_unverifiable_not_an_error() {
    let app = create_app(state());
    let (status, body) = post_json(
        app,
        "/verify",
        json!({ "sentence": "Paddington 2 was released in 2017." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["status"], "Unverifiable");
    assert_eq!(body["overallConfidence"], 0.0);
    assert_eq!(body["grade"], "None");
}

#[tokio::test]
async fn test_person_oscar_claims_need_the_person() {
    let app = create_app(state());
    let (status, body) = post_json(
        app,
        "/verify",
        json!({ "sentence": "Leonardo DiCaprio won an Oscar for The Revenant. \
            Tom Hardy won an Oscar for The Revenant. \
            Kate Winslet won an Oscar for Titanic. \
            Tom Hanks won an Oscar for Toy Story." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["Supported", "Unverifiable", "Unverifiable", "Contradicted"]);
    assert!(body["results"][1]["explanation"]
        .as_str()
        .unwrap()
        .contains("does not list Tom Hardy"));
}

#[tokio::test]
async fn test_nominations_are_not_contradicted_as_wins() {
    let app = create_app(state());
    let (status, body) = post_json(app, "/verify", json!({ "sentence": "Titanic received 14 Oscar nominations." })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["status"], "Unverifiable");
}

#[tokio::test]
async fn test_huge_numbers_get_a_report() {
    let app = create_app(state());
    let (status, body) = post_json(
        app,
        "/verify",
        json!({ "sentence": "Titanic won over 4294967295 Oscars. Titanic runs 99999999 hours." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_sentence_is_bad_request() {
    let app = create_app(state());
    let (status, body) = post_json(app, "/verify", json!({ "sentence": "   " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("EXTRACT/EMPTY"));
    assert!(body.get("results").is_none());
}

#[tokio::test]
async fn test_nothing_to_verify_is_bad_request() {
    let app = create_app(state());
    let (status, body) = post_json(app, "/verify", json!({ "sentence": "What a great film! Did you like it?" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("EXTRACT/NO_CLAIMS"));
}

#[tokio::test]
async fn test_malformed_payload_is_bad_request() {
    let app = create_app(state());
    let (status, text) = call(app, "POST", "/verify", Some("{\"text\": 1}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert!(body["error"].is_string());
}

// =============================================================================
// POST /generate
// =============================================================================

struct Canned(Result<&'static str, ()>);

#[async_trait]
impl TextGenerator for Canned {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.0
            .map(str::to_string)
            .map_err(|_| GenerationError::Upstream("503 Service Unavailable".into()))
    }
}

#[tokio::test]
async fn test_generate_without_generator() {
    let app = create_app(state());
    let (status, body) = post_json(app, "/generate", json!({ "prompt": "Tell me about Titanic" })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_generate_with_generator() {
    let app = create_app(state().with_generator(Arc::new(Canned(Ok("Titanic was released in 1997.")))));
    let (status, body) = post_json(app, "/generate", json!({ "prompt": "Tell me about Titanic" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Titanic was released in 1997.");
}

#[tokio::test]
async fn test_generate_upstream_failure_is_bad_gateway() {
    let app = create_app(state().with_generator(Arc::new(Canned(Err(())))));
    let (status, body) = post_json(app, "/generate", json!({ "prompt": "Tell me about Titanic" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().starts_with("GENERATE/UPSTREAM"));
}

// =============================================================================
// GET /health, GET /metrics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, text) = call(create_app(state()), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], cinecheck_core::ENGINE_VERSION);
}

#[tokio::test]
async fn test_metrics_count_verdicts() {
    let app = create_app(state());
    let (status, _) = post_json(
        app.clone(),
        "/verify",
        json!({ "sentence": "Braveheart was released in 1995 and won three Oscars." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, text) = call(app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("cinecheck_verdicts_total{status=\"Supported\"} 1"));
    assert!(text.contains("cinecheck_verdicts_total{status=\"Contradicted\"} 1"));
    assert!(text.contains("cinecheck_requests_total{outcome=\"ok\"} 1"));
}
