// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use helpdesk_core::traits::adapter::PluginAdapter;
use helpdesk_core::traits::provider::ProviderAdapter;
use helpdesk_core::types::{HealthStatus, ProviderRequest, ProviderResponse, TokenUsage};
use helpdesk_core::HelpdeskError;

/// A scripted reply: text or a provider failure.
#[derive(Debug, Clone)]
enum Scripted {
    Text(String),
    Failure(String),
}

/// A mock LLM provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. Every prompt received is
/// recorded for later inspection.
#[derive(Clone)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    health: Arc<Mutex<HealthStatus>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self::with_responses(std::iter::empty::<String>())
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = responses
            .into_iter()
            .map(|text| Scripted::Text(text.into()))
            .collect();
        Self {
            replies: Arc::new(Mutex::new(queue)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            health: Arc::new(Mutex::new(HealthStatus::Healthy)),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(Scripted::Text(text.into()));
    }

    /// Queue a provider failure with the given message.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(Scripted::Failure(message.into()));
    }

    /// Status every later `health_check` reports.
    pub async fn set_health(&self, status: HealthStatus) {
        *self.health.lock().await = status;
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    /// Number of completion calls made.
    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }

    async fn next_reply(&self) -> Scripted {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Scripted::Text("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        Ok(self.health.lock().await.clone())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HelpdeskError> {
        self.prompts.lock().await.push(request.prompt.clone());

        match self.next_reply().await {
            Scripted::Text(text) => Ok(ProviderResponse {
                id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
                content: text,
                model: request.model.unwrap_or_else(|| "mock-model".to_string()),
                finish_reason: Some("STOP".to_string()),
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
            }),
            Scripted::Failure(message) => Err(HelpdeskError::provider(message)),
        }
    }
}
