// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the external ticket API.
//!
//! The assistant owns no ticket store. Context tickets for queries,
//! similarity ranking and solution drafting are read from this API:
//!
//! | Call | Request |
//! |---|---|
//! | [`TicketSearchClient::search_tickets`] | GET `{base}/tickets/search?q&limit&offset[&filters]` |
//! | [`TicketSearchClient::tickets_by_category`] | GET `{base}/tickets/category/{code}` |
//! | [`TicketSearchClient::resolved_tickets`] | GET `{base}/tickets?status=resolved&limit` |
//! | [`TicketSearchClient::ticket_by_id`] | GET `{base}/tickets/{id}`, 404 is `None` |

use helpdesk_config::model::SearchConfig;
use helpdesk_core::{HelpdeskError, SearchFilters, SearchResult, Ticket, TicketCategory, TicketStatus};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Page size used by `search_tickets` callers that do not pick one.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// `{error}` body the ticket API may return on failure.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Read-only client for the ticket API.
#[derive(Debug, Clone)]
pub struct TicketSearchClient {
    client: reqwest::Client,
    base: Url,
}

impl TicketSearchClient {
    /// Creates a client for `config.base_url`.
    pub fn new(config: &SearchConfig) -> Result<Self, HelpdeskError> {
        Self::with_base_url(&config.base_url)
    }

    /// Creates a client for an explicit API prefix, e.g. `http://host/api`.
    pub fn with_base_url(base_url: &str) -> Result<Self, HelpdeskError> {
        let base = Url::parse(base_url).map_err(|e| {
            HelpdeskError::Config(format!("invalid ticket API URL `{base_url}`: {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(HelpdeskError::Config(format!(
                "invalid ticket API URL `{base_url}`"
            )));
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| HelpdeskError::Search {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client, base })
    }

    /// API prefix requests are sent to.
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Full-text search with optional filters, one page at a time.
    pub async fn search_tickets(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: u32,
        offset: u32,
    ) -> Result<SearchResult, HelpdeskError> {
        let mut url = self.url(&["tickets", "search"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("limit", &limit.to_string())
                .append_pair("offset", &offset.to_string());
            for (key, value) in filters.query_pairs() {
                pairs.append_pair(key, &value);
            }
        }
        let context = "Search error";
        let response = self.send(url, context).await?;
        read_json(response, context).await
    }

    /// Every ticket in one category.
    pub async fn tickets_by_category(
        &self,
        category: TicketCategory,
    ) -> Result<Vec<Ticket>, HelpdeskError> {
        let url = self.url(&["tickets", "category", &category.to_string()]);
        let context = "Category search error";
        let response = self.send(url, context).await?;
        read_json(response, context).await
    }

    /// Up to `limit` resolved tickets, the usual solution context.
    pub async fn resolved_tickets(&self, limit: u32) -> Result<Vec<Ticket>, HelpdeskError> {
        let mut url = self.url(&["tickets"]);
        url.query_pairs_mut()
            .append_pair("status", &TicketStatus::Resolved.to_string())
            .append_pair("limit", &limit.to_string());
        let context = "Resolved tickets error";
        let response = self.send(url, context).await?;
        read_json(response, context).await
    }

    /// One ticket by id. An unknown id is `Ok(None)`, not an error.
    pub async fn ticket_by_id(&self, id: &str) -> Result<Option<Ticket>, HelpdeskError> {
        let url = self.url(&["tickets", id]);
        let context = "Ticket fetch error";
        let response = self.send(url, context).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(id, "ticket not found");
            return Ok(None);
        }
        read_json(response, context).await.map(Some)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `with_base_url` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, url: Url, context: &str) -> Result<Response, HelpdeskError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| HelpdeskError::Search {
                message: format!("{context}: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;
        debug!(status = %response.status(), url = %url, "ticket API response received");
        Ok(response)
    }
}

async fn read_json<R: DeserializeOwned>(response: Response, context: &str) -> Result<R, HelpdeskError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) if !error.is_empty() => format!("{context}: {status} ({error})"),
            _ => format!("{context}: {status}"),
        };
        return Err(HelpdeskError::Search {
            message,
            status: Some(status.as_u16()),
            source: None,
        });
    }

    response.json::<R>().await.map_err(|e| HelpdeskError::Search {
        message: format!("{context}: invalid response body: {e}"),
        status: Some(status.as_u16()),
        source: Some(Box::new(e)),
    })
}
