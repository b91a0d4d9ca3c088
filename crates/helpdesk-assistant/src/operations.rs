// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The operation set shared by the CLI, the gateway and their test doubles.

use async_trait::async_trait;
use helpdesk_core::{
    AiResponse, CategorizationResult, HealthStatus, HelpdeskError, PluginAdapter, SolutionResult,
    Ticket, TicketSource,
};
use serde::Serialize;

use crate::assistant::TicketAssistant;

/// Identity of whatever answers the operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The four helpdesk operations, plus identity and health of the backend.
#[async_trait]
pub trait TicketOperations: Send + Sync {
    fn backend_info(&self) -> BackendInfo;

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError>;

    async fn query(&self, query: &str, tickets: &[Ticket]) -> Result<AiResponse, HelpdeskError>;

    async fn find_similar(
        &self,
        query: &str,
        tickets: &[Ticket],
    ) -> Result<Vec<TicketSource>, HelpdeskError>;

    async fn categorize(&self, content: &str) -> Result<CategorizationResult, HelpdeskError>;

    async fn generate_solution(
        &self,
        description: &str,
        similar_tickets: &[Ticket],
    ) -> Result<SolutionResult, HelpdeskError>;
}

/// Always in-process. This is what the gateway routes serve; health is the
/// provider's own report.
#[async_trait]
impl TicketOperations for TicketAssistant {
    fn backend_info(&self) -> BackendInfo {
        let provider = self.provider();
        BackendInfo {
            name: provider.name().to_string(),
            version: Some(provider.version().to_string()),
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        self.provider().health_check().await
    }

    async fn query(&self, query: &str, tickets: &[Ticket]) -> Result<AiResponse, HelpdeskError> {
        self.analyze_query(query, tickets).await
    }

    async fn find_similar(
        &self,
        query: &str,
        tickets: &[Ticket],
    ) -> Result<Vec<TicketSource>, HelpdeskError> {
        TicketAssistant::find_similar(self, query, tickets).await
    }

    async fn categorize(&self, content: &str) -> Result<CategorizationResult, HelpdeskError> {
        TicketAssistant::categorize(self, content).await
    }

    async fn generate_solution(
        &self,
        description: &str,
        similar_tickets: &[Ticket],
    ) -> Result<SolutionResult, HelpdeskError> {
        TicketAssistant::generate_solution(self, description, similar_tickets).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use helpdesk_test_utils::MockProvider;

    #[test]
    fn assistant_identifies_its_provider() {
        let assistant = TicketAssistant::new(Arc::new(MockProvider::new()), 64);
        assert_eq!(
            assistant.backend_info(),
            BackendInfo {
                name: "mock-provider".into(),
                version: Some("0.1.0".into()),
            }
        );
    }

    #[tokio::test]
    async fn assistant_health_is_the_provider_health() {
        let provider = MockProvider::new();
        provider
            .set_health(HealthStatus::Unhealthy("no key".into()))
            .await;
        let assistant = TicketAssistant::new(Arc::new(provider), 64);
        assert_eq!(
            TicketOperations::health_check(&assistant).await.unwrap(),
            HealthStatus::Unhealthy("no key".into())
        );
    }

    #[test]
    fn version_is_omitted_when_unknown() {
        let info = BackendInfo {
            name: "remote".into(),
            version: None,
        };
        assert_eq!(serde_json::to_value(&info).unwrap(), serde_json::json!({"name": "remote"}));
    }
}
