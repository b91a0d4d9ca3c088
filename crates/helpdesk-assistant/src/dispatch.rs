// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch facade choosing between the in-process model and the HTTP
//! fallback routes.
//!
//! The backend is picked once, when the [`Dispatcher`] is built from
//! configuration: a resolvable Gemini credential selects
//! [`Backend::Model`], anything else selects [`Backend::Remote`].
//!
//! | Operation | Model | Remote |
//! |---|---|---|
//! | `query` | in-process | POST `/query` |
//! | `find_similar` | in-process with tickets, else POST `/similar` | POST `/similar` |
//! | `categorize` | in-process | POST `/analyze` |
//! | `generate_solution` | in-process | fixed placeholder, no network |

use std::sync::Arc;

use async_trait::async_trait;
use helpdesk_config::HelpdeskConfig;
use helpdesk_core::{
    AiResponse, CategorizationResult, HealthStatus, HelpdeskError, SolutionResult, Ticket,
    TicketSource,
};
use helpdesk_gemini::GeminiProvider;
use strum::Display;
use tracing::{debug, info};

use crate::assistant::TicketAssistant;
use crate::fallback::FallbackClient;
use crate::operations::{BackendInfo, TicketOperations};

/// Confidence reported by the placeholder solution.
pub const PLACEHOLDER_CONFIDENCE: f64 = 0.1;

/// Where operations are executed.
pub enum Backend {
    /// Prompt, model call and parse in this process.
    Model(TicketAssistant),
    /// Forward to the same-origin HTTP routes.
    Remote,
}

/// Discriminant of [`Backend`], for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BackendKind {
    Model,
    Remote,
}

/// Explicitly constructed facade over the four helpdesk operations.
///
/// Build it once and share it by reference or `Arc`; it holds no mutable
/// state.
pub struct Dispatcher {
    backend: Backend,
    fallback: FallbackClient,
}

impl Dispatcher {
    pub fn new(backend: Backend, fallback: FallbackClient) -> Self {
        Self { backend, fallback }
    }

    /// Builds a dispatcher from configuration, selecting the backend by
    /// whether a Gemini credential resolves.
    pub fn from_config(config: &HelpdeskConfig) -> Result<Self, HelpdeskError> {
        let fallback = FallbackClient::new(&config.fallback)?;
        let backend = if config.gemini.resolve_api_key().is_some() {
            let provider = GeminiProvider::new(&config.gemini)?;
            Backend::Model(TicketAssistant::new(
                Arc::new(provider),
                config.gemini.max_output_tokens,
            ))
        } else {
            Backend::Remote
        };

        let dispatcher = Self::new(backend, fallback);
        info!(
            backend = %dispatcher.backend_kind(),
            fallback = dispatcher.fallback.endpoint(),
            "dispatcher initialized"
        );
        Ok(dispatcher)
    }

    /// Which backend this dispatcher uses.
    pub fn backend_kind(&self) -> BackendKind {
        match self.backend {
            Backend::Model(_) => BackendKind::Model,
            Backend::Remote => BackendKind::Remote,
        }
    }

    /// Answers a free-text query.
    pub async fn query(&self, query: &str, tickets: &[Ticket]) -> Result<AiResponse, HelpdeskError> {
        require_query(query)?;
        match &self.backend {
            Backend::Model(assistant) => assistant.analyze_query(query, tickets).await,
            Backend::Remote => {
                debug!("query via fallback route");
                self.fallback.query(query, tickets).await
            }
        }
    }

    /// Finds tickets similar to `query`.
    ///
    /// The model path needs candidates to rank; without tickets the call
    /// goes to the fallback route even when a model is configured.
    pub async fn find_similar(
        &self,
        query: &str,
        tickets: &[Ticket],
    ) -> Result<Vec<TicketSource>, HelpdeskError> {
        require_query(query)?;
        match &self.backend {
            Backend::Model(assistant) if !tickets.is_empty() => {
                assistant.find_similar(query, tickets).await
            }
            _ => {
                debug!(tickets = tickets.len(), "similarity via fallback route");
                self.fallback.similar(query, tickets).await
            }
        }
    }

    /// Suggests a category, priority and tags.
    pub async fn categorize(&self, content: &str) -> Result<CategorizationResult, HelpdeskError> {
        match &self.backend {
            Backend::Model(assistant) => assistant.categorize(content).await,
            Backend::Remote => {
                debug!("categorization via fallback route");
                self.fallback.analyze(content).await
            }
        }
    }

    /// Drafts a solution. Without a model this returns a low-confidence
    /// placeholder and makes no network call.
    pub async fn generate_solution(
        &self,
        description: &str,
        similar_tickets: &[Ticket],
    ) -> Result<SolutionResult, HelpdeskError> {
        match &self.backend {
            Backend::Model(assistant) => {
                assistant.generate_solution(description, similar_tickets).await
            }
            Backend::Remote => {
                debug!("no model configured, returning placeholder solution");
                Ok(placeholder_solution())
            }
        }
    }
}

#[async_trait]
impl TicketOperations for Dispatcher {
    fn backend_info(&self) -> BackendInfo {
        match &self.backend {
            Backend::Model(assistant) => assistant.backend_info(),
            Backend::Remote => BackendInfo {
                name: BackendKind::Remote.to_string(),
                version: None,
            },
        }
    }

    /// The remote routes report no health of their own.
    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        match &self.backend {
            Backend::Model(assistant) => TicketOperations::health_check(assistant).await,
            Backend::Remote => Ok(HealthStatus::Healthy),
        }
    }

    async fn query(&self, query: &str, tickets: &[Ticket]) -> Result<AiResponse, HelpdeskError> {
        Dispatcher::query(self, query, tickets).await
    }

    async fn find_similar(
        &self,
        query: &str,
        tickets: &[Ticket],
    ) -> Result<Vec<TicketSource>, HelpdeskError> {
        Dispatcher::find_similar(self, query, tickets).await
    }

    async fn categorize(&self, content: &str) -> Result<CategorizationResult, HelpdeskError> {
        Dispatcher::categorize(self, content).await
    }

    async fn generate_solution(
        &self,
        description: &str,
        similar_tickets: &[Ticket],
    ) -> Result<SolutionResult, HelpdeskError> {
        Dispatcher::generate_solution(self, description, similar_tickets).await
    }
}

fn require_query(query: &str) -> Result<(), HelpdeskError> {
    if query.trim().is_empty() {
        return Err(HelpdeskError::InvalidInput("Query cannot be empty".into()));
    }
    Ok(())
}

fn placeholder_solution() -> SolutionResult {
    SolutionResult {
        solution: "Usługa AI jest niedostępna. Skontaktuj się z działem IT w celu analizy problemu."
            .to_string(),
        steps: vec!["1. Skontaktuj się z administratorem systemu".to_string()],
        confidence: PLACEHOLDER_CONFIDENCE,
        based_on_tickets: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_test_utils::fixtures::sample_tickets;
    use helpdesk_test_utils::MockProvider;

    fn unreachable_fallback() -> FallbackClient {
        FallbackClient::with_endpoint("http://127.0.0.1:1/api/ai").unwrap()
    }

    fn model_dispatcher(provider: &MockProvider) -> Dispatcher {
        let assistant = TicketAssistant::new(Arc::new(provider.clone()), 512);
        Dispatcher::new(Backend::Model(assistant), unreachable_fallback())
    }

    #[tokio::test]
    async fn blank_query_is_rejected_before_any_call() {
        let provider = MockProvider::new();
        let dispatcher = model_dispatcher(&provider);

        let err = dispatcher.query("   ", &[]).await.unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidInput(ref m) if m == "Query cannot be empty"));
        let err = dispatcher.find_similar("", &sample_tickets()).await.unwrap_err();
        assert_eq!(err.http_status(), 400);
        assert_eq!(provider.call_count().await, 0);
    }

    #[tokio::test]
    async fn model_backend_runs_in_process() {
        let provider = MockProvider::with_responses([
            "ODPOWIEDŹ: Zrestartuj\nPEWNOŚĆ: 60",
            "KATEGORIA: overdue",
        ]);
        let dispatcher = model_dispatcher(&provider);
        assert_eq!(dispatcher.backend_kind(), BackendKind::Model);

        let answer = dispatcher.query("VPN", &[]).await.unwrap();
        assert_eq!(answer.response, "Zrestartuj");
        let category = dispatcher.categorize("EKG").await.unwrap();
        assert_eq!(category.category, helpdesk_core::TicketCategory::Overdue);
        assert_eq!(provider.call_count().await, 2);
    }

    #[tokio::test]
    async fn remote_solution_is_placeholder() {
        let dispatcher = Dispatcher::new(Backend::Remote, unreachable_fallback());
        assert_eq!(dispatcher.backend_kind(), BackendKind::Remote);

        let result = dispatcher.generate_solution("Drukarka", &[]).await.unwrap();
        assert_eq!(result.confidence, PLACEHOLDER_CONFIDENCE);
        assert_eq!(result.steps.len(), 1);
        assert!(result.based_on_tickets.is_empty());
    }

    #[tokio::test]
    async fn remote_failures_surface_as_fallback_errors() {
        let dispatcher = Dispatcher::new(Backend::Remote, unreachable_fallback());
        let err = dispatcher.categorize("x").await.unwrap_err();
        assert!(matches!(err, HelpdeskError::Fallback { .. }));
        assert!(err.to_string().contains("Content analysis error"));
    }

    #[tokio::test]
    async fn health_follows_the_backend() {
        let provider = MockProvider::new();
        provider
            .set_health(HealthStatus::Degraded("slow".into()))
            .await;
        let model = model_dispatcher(&provider);
        assert_eq!(model.backend_info().name, "mock-provider");
        assert_eq!(
            model.health_check().await.unwrap(),
            HealthStatus::Degraded("slow".into())
        );

        let remote = Dispatcher::new(Backend::Remote, unreachable_fallback());
        assert_eq!(
            remote.backend_info(),
            BackendInfo {
                name: "remote".into(),
                version: None,
            }
        );
        assert_eq!(remote.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[test]
    fn backend_kind_displays_snake_case() {
        assert_eq!(BackendKind::Model.to_string(), "model");
        assert_eq!(BackendKind::Remote.to_string(), "remote");
    }
}
