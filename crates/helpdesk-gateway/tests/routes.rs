// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route tests driving the axum router in-process.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use helpdesk_assistant::{BackendInfo, TicketAssistant, TicketOperations};
use helpdesk_core::{
    AiResponse, CategorizationResult, HealthStatus, HelpdeskError, SolutionResult, Ticket,
    TicketSource,
};
use helpdesk_gateway::{router, GatewayState};
use helpdesk_test_utils::MockProvider;
use serde_json::Value;
use tower::ServiceExt;

fn app_with(provider: &MockProvider) -> Router {
    let assistant = TicketAssistant::new(Arc::new(provider.clone()), 512);
    router(GatewayState::new(Arc::new(assistant)), "/api/ai")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn query_returns_ai_response() {
    let provider = MockProvider::with_responses([
        "ODPOWIEDŹ: Sprawdź drukarkę\nPEWNOŚĆ: 85\nŹRÓDŁA: T-1, T-2",
    ]);
    let (status, body) = send(
        app_with(&provider),
        post_json("/api/ai/query", r#"{"query": "drukarka"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Sprawdź drukarkę");
    assert_eq!(body["confidence"], 0.85);
    assert_eq!(body["sources"][1]["ticketId"], "T-2");
    assert!(body["queryId"].as_str().unwrap().starts_with("gemini_"));
}

#[tokio::test]
async fn missing_or_empty_query_is_rejected() {
    for payload in [r#"{}"#, r#"{"query": ""}"#, r#"{"query": 42}"#] {
        let provider = MockProvider::new();
        let (status, body) = send(app_with(&provider), post_json("/api/ai/query", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body["error"], "Query is required and must be a string");
        assert_eq!(provider.call_count().await, 0);
    }
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let provider = MockProvider::new();
    let (status, body) = send(app_with(&provider), post_json("/api/ai/similar", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn non_post_methods_are_not_allowed() {
    for (method, uri) in [
        (Method::GET, "/api/ai/query"),
        (Method::PUT, "/api/ai/similar"),
        (Method::DELETE, "/api/ai/analyze"),
        (Method::GET, "/api/ai/solution"),
    ] {
        let provider = MockProvider::new();
        let request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app_with(&provider), request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(body["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn similar_returns_ranked_sources() {
    let provider = MockProvider::with_responses([
        "ID: T-1\nPODOBIEŃSTWO: 35\nDOPASOWANA_TREŚĆ: a\n---\nID: T-2\nPODOBIEŃSTWO: 80\nDOPASOWANA_TREŚĆ: b",
    ]);
    let tickets = serde_json::to_string(&helpdesk_test_utils::fixtures::sample_tickets()).unwrap();
    let payload = format!(r#"{{"query": "EKG", "tickets": {tickets}}}"#);
    let (status, body) = send(app_with(&provider), post_json("/api/ai/similar", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["ticketId"], "T-2");
    assert_eq!(body[1]["ticketId"], "T-1");
    assert!(provider.prompts().await[0].contains("ID: T-3"));
}

#[tokio::test]
async fn analyze_omits_reasoning() {
    let provider = MockProvider::with_responses([
        "KATEGORIA: overdue\nPRIORYTET: urgent\nTAGI: ekg\nUZASADNIENIE: sprzęt ratunkowy",
    ]);
    let (status, body) = send(
        app_with(&provider),
        post_json("/api/ai/analyze", r#"{"content": "Defibrylator nie działa"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"category": "overdue", "priority": "urgent", "suggestedTags": ["ekg"]})
    );
}

#[tokio::test]
async fn analyze_requires_content() {
    let provider = MockProvider::new();
    let (status, body) = send(
        app_with(&provider),
        post_json("/api/ai/analyze", r#"{"text": "x"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content is required and must be a string");
}

#[tokio::test]
async fn solution_requires_description() {
    let provider = MockProvider::new();
    let (status, body) = send(
        app_with(&provider),
        post_json("/api/ai/solution", r#"{"similarTickets": []}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Description is required and must be a string");
}

#[tokio::test]
async fn solution_returns_steps() {
    let provider = MockProvider::with_responses([
        "ROZWIĄZANIE: Restart\nKROKI:\n1. Wyłącz\n2. Włącz\nPEWNOŚĆ: 90\nBAZUJE_NA: T-2",
    ]);
    let (status, body) = send(
        app_with(&provider),
        post_json("/api/ai/solution", r#"{"description": "Router nie działa"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["solution"], "Restart");
    assert_eq!(body["steps"], serde_json::json!(["1. Wyłącz", "2. Włącz"]));
    assert_eq!(body["confidence"], 0.9);
    assert_eq!(body["basedOnTickets"], serde_json::json!(["T-2"]));
}

#[tokio::test]
async fn provider_failure_is_a_500() {
    let provider = MockProvider::new();
    provider.add_failure("quota exceeded").await;

    let (status, body) = send(
        app_with(&provider),
        post_json("/api/ai/query", r#"{"query": "VPN"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Gemini analysis failed: quota exceeded");
}

/// Operations double that rejects every call as invalid input.
struct Rejecting;

#[async_trait]
impl TicketOperations for Rejecting {
    fn backend_info(&self) -> BackendInfo {
        BackendInfo {
            name: "rejecting".into(),
            version: None,
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        Err(HelpdeskError::Internal("health check failed".into()))
    }

    async fn query(&self, _: &str, _: &[Ticket]) -> Result<AiResponse, HelpdeskError> {
        Err(HelpdeskError::InvalidInput("Query cannot be empty".into()))
    }

    async fn find_similar(&self, _: &str, _: &[Ticket]) -> Result<Vec<TicketSource>, HelpdeskError> {
        Err(HelpdeskError::InvalidInput("Query cannot be empty".into()))
    }

    async fn categorize(&self, _: &str) -> Result<CategorizationResult, HelpdeskError> {
        Err(HelpdeskError::Internal("unreachable".into()))
    }

    async fn generate_solution(&self, _: &str, _: &[Ticket]) -> Result<SolutionResult, HelpdeskError> {
        Err(HelpdeskError::Internal("unreachable".into()))
    }
}

#[tokio::test]
async fn invalid_input_from_operations_is_a_400() {
    let app = router(GatewayState::new(Arc::new(Rejecting)), "/api/ai");
    let (status, body) = send(app, post_json("/api/ai/similar", r#"{"query": "   "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query cannot be empty");
}

#[tokio::test]
async fn custom_base_path_is_honored() {
    let provider = MockProvider::with_responses(["KATEGORIA: afternoon"]);
    let assistant = TicketAssistant::new(Arc::new(provider.clone()), 512);
    let app = router(GatewayState::new(Arc::new(assistant)), "/internal/ai/");

    let (status, body) = send(
        app.clone(),
        post_json("/internal/ai/analyze", r#"{"content": "x"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "afternoon");

    let (status, _) = send(app, post_json("/api/ai/analyze", r#"{"content": "x"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn get_health() -> Request<Body> {
    Request::builder().uri("/health").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_version_and_backend() {
    let provider = MockProvider::new();
    let (status, body) = send(app_with(&provider), get_health()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(
        body["backend"],
        serde_json::json!({"name": "mock-provider", "version": "0.1.0"})
    );
    assert!(body.get("detail").is_none());
}

#[tokio::test]
async fn degraded_provider_is_still_a_200() {
    let provider = MockProvider::new();
    provider
        .set_health(HealthStatus::Degraded("rate limited".into()))
        .await;
    let (status, body) = send(app_with(&provider), get_health()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["detail"], "rate limited");
}

#[tokio::test]
async fn unhealthy_provider_is_a_503() {
    let provider = MockProvider::new();
    provider
        .set_health(HealthStatus::Unhealthy("key revoked".into()))
        .await;
    let (status, body) = send(app_with(&provider), get_health()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["detail"], "key revoked");
}

#[tokio::test]
async fn failed_health_check_is_a_503() {
    let app = router(GatewayState::new(Arc::new(Rejecting)), "/api/ai");
    let (status, body) = send(app, get_health()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["detail"], "health check failed");
    assert_eq!(body["backend"]["name"], "rejecting");
    assert!(body["backend"].get("version").is_none());
}
