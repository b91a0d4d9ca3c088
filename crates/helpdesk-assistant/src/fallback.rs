// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the same-origin fallback routes.
//!
//! Used when no model credential is configured: the request is forwarded to
//! `{endpoint}/query`, `{endpoint}/similar` or `{endpoint}/analyze` and the
//! JSON reply is returned as-is. One request per call, no retry.

use helpdesk_config::model::FallbackConfig;
use helpdesk_core::{AiResponse, CategorizationResult, HelpdeskError, Ticket, TicketSource};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    tickets: &'a [Ticket],
}

#[derive(Serialize)]
struct ContentBody<'a> {
    content: &'a str,
}

/// `{error}` body returned by the routes on failure.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the `/query`, `/similar` and `/analyze` fallback routes.
#[derive(Debug, Clone)]
pub struct FallbackClient {
    client: reqwest::Client,
    endpoint: String,
}

impl FallbackClient {
    /// Creates a client for the routes under `config.endpoint()`.
    pub fn new(config: &FallbackConfig) -> Result<Self, HelpdeskError> {
        Self::with_endpoint(config.endpoint())
    }

    /// Creates a client for an explicit route prefix, e.g. `http://host/api/ai`.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, HelpdeskError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| HelpdeskError::Fallback {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    /// Route prefix requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `/query`.
    pub async fn query(&self, query: &str, tickets: &[Ticket]) -> Result<AiResponse, HelpdeskError> {
        self.post("query", &QueryBody { query, tickets }, "AI service error")
            .await
    }

    /// POST `/similar`.
    pub async fn similar(
        &self,
        query: &str,
        tickets: &[Ticket],
    ) -> Result<Vec<TicketSource>, HelpdeskError> {
        self.post("similar", &QueryBody { query, tickets }, "Similar tickets error")
            .await
    }

    /// POST `/analyze`. The route omits `reasoning`, which comes back empty.
    pub async fn analyze(&self, content: &str) -> Result<CategorizationResult, HelpdeskError> {
        self.post("analyze", &ContentBody { content }, "Content analysis error")
            .await
    }

    async fn post<B, R>(&self, route: &str, body: &B, context: &str) -> Result<R, HelpdeskError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{route}", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| HelpdeskError::Fallback {
                message: format!("{context}: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, url, "fallback response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(context, status, &body));
        }

        response.json::<R>().await.map_err(|e| HelpdeskError::Fallback {
            message: format!("{context}: invalid response body: {e}"),
            status: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })
    }
}

/// Builds the error for a non-2xx reply, appending the route's `{error}` text.
fn status_error(context: &str, status: StatusCode, body: &str) -> HelpdeskError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error }) if !error.is_empty() => format!("{context}: {status} ({error})"),
        _ => format!("{context}: {status}"),
    };
    HelpdeskError::Fallback {
        message,
        status: Some(status.as_u16()),
        source: None,
    }
}
