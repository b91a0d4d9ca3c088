// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use helpdesk_assistant::TicketOperations;
use helpdesk_core::HelpdeskError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Operations the routes are served by.
    pub ops: Arc<dyn TicketOperations>,
    /// Process start time for uptime calculation.
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(ops: Arc<dyn TicketOperations>) -> Self {
        Self {
            ops,
            started_at: Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors the `[gateway]` and `[fallback]`
/// config sections).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Path prefix of the assistant routes, e.g. `/api/ai`.
    pub base_path: String,
}

/// Builds the router:
/// - POST {base}/query, {base}/similar, {base}/analyze, {base}/solution
/// - GET /health
///
/// Any other method on an assistant route answers 405.
pub fn router(state: GatewayState, base_path: &str) -> Router {
    let api = Router::new()
        .route(
            "/query",
            post(handlers::post_query).fallback(handlers::method_not_allowed),
        )
        .route(
            "/similar",
            post(handlers::post_similar).fallback(handlers::method_not_allowed),
        )
        .route(
            "/analyze",
            post(handlers::post_analyze).fallback(handlers::method_not_allowed),
        )
        .route(
            "/solution",
            post(handlers::post_solution).fallback(handlers::method_not_allowed),
        );

    let base = base_path.trim_end_matches('/');
    let routes = Router::new().route("/health", get(handlers::get_health));
    let routes = if base.is_empty() {
        routes.merge(api)
    } else {
        routes.nest(base, api)
    };

    routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server and serve until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), HelpdeskError> {
    let app = router(state, &config.base_path);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HelpdeskError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(base_path = config.base_path, "Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| HelpdeskError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
