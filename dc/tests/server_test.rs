//! Integration tests for the HTTP API
//!
//! Requests go through the full router with a fake completion client.

mod common;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use common::{FakeClient, generator};
use dealcoach::config::ServerConfig;
use dealcoach::server::{AppState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(client: &Arc<FakeClient>) -> Router {
    app_with(client, &ServerConfig::default())
}

fn app_with(client: &Arc<FakeClient>, config: &ServerConfig) -> Router {
    router(AppState::new(generator(client.clone()), config), Path::new("does-not-exist"))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = app(&FakeClient::echo());
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "dealcoach");
}

// =============================================================================
// Stateless routes
// =============================================================================

#[tokio::test]
async fn test_generate_account_plan() {
    let client = FakeClient::scripted(vec!["THE PLAN"]);
    let app = app(&client);

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-account-plan",
        Some(json!({"company": "Initech", "contacts": "", "competitors": "Acme"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accountPlan"], "THE PLAN");
    assert!(client.prompts()[0].contains("research and identify the key security contacts yourself"));
}

#[tokio::test]
async fn test_blank_company_is_bad_request() {
    let client = FakeClient::echo();
    let app = app(&client);

    let (status, body) = send(&app, "POST", "/api/generate-account-plan", Some(json!({"company": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "company is required");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app(&FakeClient::echo());
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyst-report")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_stateless_battlecards_resolve_competitor() {
    let client = FakeClient::scripted(vec!["CARDS"]);
    let app = app(&client);

    let (status, body) = send(
        &app,
        "POST",
        "/api/competitor-battlecards",
        Some(json!({"company": "Initech", "competitors": "Acme, Globex"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["battlecards"], "CARDS");
    assert_eq!(body["primaryCompetitor"], "Acme");
}

#[tokio::test]
async fn test_stateless_coaching_chat_passes_history() {
    let client = FakeClient::scripted(vec!["Our firewalls handle that."]);
    let app = app(&client);

    let (status, body) = send(
        &app,
        "POST",
        "/api/coaching-chat",
        Some(json!({
            "company": "Initech",
            "conversationHistory": "user: Hi\nciso: Hello",
            "userMessage": "What about lateral movement?"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Our firewalls handle that.");
    let prompt = &client.prompts()[0];
    assert!(prompt.contains("user: Hi\nciso: Hello"));
    assert!(prompt.contains("The sales rep says: What about lateral movement?"));
}

#[tokio::test]
async fn test_stateless_advisor_requires_artifact() {
    let client = FakeClient::echo();
    let app = app(&client);

    let (status, body) = send(
        &app,
        "POST",
        "/api/sales-analyst-chat",
        Some(json!({"company": "Initech", "message": "How do I open?"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "accountPlan is required");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_completion_failure_is_bad_gateway() {
    let client = FakeClient::with_script(vec![None]);
    let app = app(&client);

    let (status, body) = send(
        &app,
        "POST",
        "/api/analyst-report",
        Some(json!({"company": "Initech"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("scripted failure"));
}

// =============================================================================
// Session routes
// =============================================================================

#[tokio::test]
async fn test_session_lifecycle() {
    let client = FakeClient::echo();
    let app = app(&client);

    let (status, created) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"company": "Initech", "competitors": "Acme, Globex"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["accountPlan"], "reply 1");
    assert_eq!(created["primaryCompetitor"], "Acme");
    assert!(created["battlecards"].is_string());
    assert!(created["report"].is_string());
    assert_eq!(created["errors"], json!([]));
    let id = created["sessionId"].as_str().unwrap().to_string();

    let (status, reply) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/coaching", id),
        Some(json!({"message": "Hi, I'm with Aviatrix"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["response"], "reply 4");

    let (status, reply) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/advisors/competitor", id),
        Some(json!({"message": "How do you win?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["response"], "reply 5");

    let (status, snapshot) = send(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["company"], "Initech");
    assert_eq!(snapshot["displayCompetitor"], "Acme");
    let threads = snapshot["threads"].as_array().unwrap();
    assert_eq!(threads.len(), 4);
    assert_eq!(threads[0]["kind"], "coaching");
    assert_eq!(threads[0]["turns"].as_array().unwrap().len(), 2);
    assert_eq!(threads[2]["kind"], "competitor-advisor");
    assert_eq!(threads[2]["state"], "active");

    let (status, feedback) = send(&app, "POST", &format!("/api/sessions/{}/coaching/feedback", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feedback["feedback"], "reply 6");

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn test_session_without_prepare_all() {
    let client = FakeClient::echo();
    let app = app(&client);

    let (status, created) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"company": "Initech", "prepareAll": false})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["battlecards"].is_null());
    assert_eq!(client.calls(), 1);
    let id = created["sessionId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/advisors/company", id),
        Some(json!({"message": "Where are our gaps?"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Generate the analyst report first");

    let (status, report) = send(&app, "POST", &format!("/api/sessions/{}/analyst-report", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["report"], "reply 2");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/advisors/company", id),
        Some(json!({"message": "Where are our gaps?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_session_reports_secondary_failures() {
    let client = FakeClient::with_script(vec![Some("PLAN".to_string()), None, None]);
    let app = app(&client);

    let (status, created) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"company": "Initech", "competitors": "Acme"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["accountPlan"], "PLAN");
    assert!(created["battlecards"].is_null());
    assert!(created["report"].is_null());
    assert_eq!(created["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_session_and_advisor() {
    let client = FakeClient::echo();
    let app = app(&client);

    let (status, _) = send(&app, "GET", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/sessions/0190b0a0-0000-7000-8000-000000000000/coaching",
        Some(json!({"message": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, created) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"company": "Initech", "prepareAll": false})),
    )
    .await;
    let id = created["sessionId"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/advisors/ciso", id),
        Some(json!({"message": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unknown advisor"));
}

#[tokio::test]
async fn test_blank_session_message_is_rejected() {
    let client = FakeClient::echo();
    let app = app(&client);

    let (_, created) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"company": "Initech", "prepareAll": false})),
    )
    .await;
    let id = created["sessionId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/coaching", id),
        Some(json!({"message": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "message is required");
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_full_registry_drops_oldest_session() {
    let client = FakeClient::echo();
    let config = ServerConfig {
        max_sessions: 1,
        ..ServerConfig::default()
    };
    let app = app_with(&client, &config);

    let body = json!({"company": "Initech", "prepareAll": false});
    let (_, first) = send(&app, "POST", "/api/sessions", Some(body.clone())).await;
    let (_, second) = send(&app, "POST", "/api/sessions", Some(body)).await;

    let first = first["sessionId"].as_str().unwrap();
    let second = second["sessionId"].as_str().unwrap();
    let (status, _) = send(&app, "GET", &format!("/api/sessions/{}", first), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/api/sessions/{}", second), None).await;
    assert_eq!(status, StatusCode::OK);
}
