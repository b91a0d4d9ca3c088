// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the assistant routes.
//!
//! Handles POST {base}/query, {base}/similar, {base}/analyze,
//! {base}/solution and GET /health.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use helpdesk_assistant::operations::BackendInfo;
use helpdesk_core::{
    AiResponse, HealthStatus, HelpdeskError, SolutionResult, Ticket, TicketCategory,
    TicketPriority, TicketSource,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::server::GatewayState;

const QUERY_REQUIRED: &str = "Query is required and must be a string";
const CONTENT_REQUIRED: &str = "Content is required and must be a string";
const DESCRIPTION_REQUIRED: &str = "Description is required and must be a string";

/// Response body for POST {base}/analyze. `reasoning` is not exposed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub suggested_tags: Vec<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, `degraded` or `unhealthy`.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the router was built.
    pub uptime_secs: u64,
    /// What the routes are served by.
    pub backend: BackendInfo,
    /// Reason given by a degraded or unhealthy backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// A status code and message rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Maps an operation failure, logging anything that is not the caller's fault.
    fn from_failure(route: &'static str, err: HelpdeskError) -> Self {
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(route, error = %err, "API error");
        } else {
            warn!(route, error = %err, "rejected request");
        }
        Self {
            status,
            message: err.detail(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Fallback for every non-POST method on the assistant routes.
pub async fn method_not_allowed() -> ApiError {
    ApiError {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: "Method not allowed".to_string(),
    }
}

/// POST {base}/query
pub async fn post_query(
    State(state): State<GatewayState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AiResponse>, ApiError> {
    let body = json_body(payload)?;
    let query = required_str(&body, "query", QUERY_REQUIRED)?;
    let tickets = optional_tickets(&body, "tickets")?;

    let response = state
        .ops
        .query(query, &tickets)
        .await
        .map_err(|e| ApiError::from_failure("query", e))?;
    Ok(Json(response))
}

/// POST {base}/similar
pub async fn post_similar(
    State(state): State<GatewayState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<TicketSource>>, ApiError> {
    let body = json_body(payload)?;
    let query = required_str(&body, "query", QUERY_REQUIRED)?;
    let tickets = optional_tickets(&body, "tickets")?;

    let sources = state
        .ops
        .find_similar(query, &tickets)
        .await
        .map_err(|e| ApiError::from_failure("similar", e))?;
    Ok(Json(sources))
}

/// POST {base}/analyze
pub async fn post_analyze(
    State(state): State<GatewayState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let body = json_body(payload)?;
    let content = required_str(&body, "content", CONTENT_REQUIRED)?;

    let result = state
        .ops
        .categorize(content)
        .await
        .map_err(|e| ApiError::from_failure("analyze", e))?;
    Ok(Json(AnalyzeResponse {
        category: result.category,
        priority: result.priority,
        suggested_tags: result.suggested_tags,
    }))
}

/// POST {base}/solution
pub async fn post_solution(
    State(state): State<GatewayState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SolutionResult>, ApiError> {
    let body = json_body(payload)?;
    let description = required_str(&body, "description", DESCRIPTION_REQUIRED)?;
    let similar = optional_tickets(&body, "similarTickets")?;

    let solution = state
        .ops
        .generate_solution(description, &similar)
        .await
        .map_err(|e| ApiError::from_failure("solution", e))?;
    Ok(Json(solution))
}

/// GET /health
///
/// Reports the backend's own health check. Unhealthy (or a failed check)
/// answers 503; degraded still answers 200.
pub async fn get_health(State(state): State<GatewayState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, detail) = match state.ops.health_check().await {
        Ok(HealthStatus::Healthy) => ("healthy", None),
        Ok(HealthStatus::Degraded(reason)) => ("degraded", Some(reason)),
        Ok(HealthStatus::Unhealthy(reason)) => ("unhealthy", Some(reason)),
        Err(e) => ("unhealthy", Some(e.detail())),
    };

    let code = if status == "unhealthy" {
        warn!(detail = detail.as_deref().unwrap_or_default(), "backend unhealthy");
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: state.started_at.elapsed().as_secs(),
            backend: state.ops.backend_info(),
            detail,
        }),
    )
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// A present, non-empty string field.
fn required_str<'a>(
    body: &'a Value,
    field: &str,
    message: &'static str,
) -> Result<&'a str, ApiError> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

/// An optional ticket list. Absent or `null` means empty.
fn optional_tickets(body: &Value, field: &str) -> Result<Vec<Ticket>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| ApiError::bad_request(format!("Invalid {field}: {e}"))),
    }
}
