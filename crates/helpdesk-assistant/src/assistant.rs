// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process assistant: prompt, one model call, parse.

use std::sync::Arc;

use chrono::Utc;
use helpdesk_core::answer::generate_id;
use helpdesk_core::{
    AiResponse, CategorizationResult, HelpdeskError, ProviderAdapter, ProviderRequest,
    SolutionResult, Ticket, TicketSource,
};
use tracing::{debug, error};

use crate::parser::{LabelFormat, ReplyFormat};
use crate::prompts;

/// Runs the four helpdesk operations against an LLM provider.
///
/// Each call makes exactly one provider request. Provider failures are
/// wrapped with an operation-specific message; malformed replies are not
/// errors.
#[derive(Clone)]
pub struct TicketAssistant {
    provider: Arc<dyn ProviderAdapter>,
    format: Arc<dyn ReplyFormat>,
    max_tokens: u32,
}

impl TicketAssistant {
    /// Creates an assistant that reads replies with [`LabelFormat`].
    pub fn new(provider: Arc<dyn ProviderAdapter>, max_tokens: u32) -> Self {
        Self {
            provider,
            format: Arc::new(LabelFormat),
            max_tokens,
        }
    }

    /// Replaces the reply format.
    pub fn with_format(mut self, format: Arc<dyn ReplyFormat>) -> Self {
        self.format = format;
        self
    }

    pub(crate) fn provider(&self) -> &dyn ProviderAdapter {
        self.provider.as_ref()
    }

    /// Answers a free-text query, optionally grounded in `tickets`.
    pub async fn analyze_query(
        &self,
        query: &str,
        tickets: &[Ticket],
    ) -> Result<AiResponse, HelpdeskError> {
        let prompt = prompts::build_analysis_prompt(query, tickets);
        let text = self
            .complete(prompt)
            .await
            .map_err(|e| wrap("Gemini analysis failed", e))?;

        let parsed = self.format.parse_analysis(&text, query);
        Ok(AiResponse {
            id: generate_id("gemini"),
            query_id: generate_id("gemini"),
            response: parsed.answer,
            confidence: parsed.confidence,
            sources: parsed.sources,
            timestamp: Utc::now(),
        })
    }

    /// Ranks `tickets` by similarity to `query`.
    pub async fn find_similar(
        &self,
        query: &str,
        tickets: &[Ticket],
    ) -> Result<Vec<TicketSource>, HelpdeskError> {
        let prompt = prompts::build_similarity_prompt(query, tickets);
        let text = self
            .complete(prompt)
            .await
            .map_err(|e| wrap("Gemini similarity search failed", e))?;
        Ok(self.format.parse_similar(&text))
    }

    /// Suggests a category, priority and tags for ticket text.
    pub async fn categorize(&self, content: &str) -> Result<CategorizationResult, HelpdeskError> {
        let prompt = prompts::build_categorization_prompt(content);
        let text = self
            .complete(prompt)
            .await
            .map_err(|e| wrap("Gemini categorization failed", e))?;
        Ok(self.format.parse_categorization(&text))
    }

    /// Drafts a step-by-step solution, using resolved `similar_tickets` as context.
    pub async fn generate_solution(
        &self,
        description: &str,
        similar_tickets: &[Ticket],
    ) -> Result<SolutionResult, HelpdeskError> {
        let prompt = prompts::build_solution_prompt(description, similar_tickets);
        let text = self
            .complete(prompt)
            .await
            .map_err(|e| wrap("Gemini solution generation failed", e))?;
        Ok(self.format.parse_solution(&text))
    }

    async fn complete(&self, prompt: String) -> Result<String, HelpdeskError> {
        let response = self
            .provider
            .complete(ProviderRequest::new(prompt, self.max_tokens))
            .await?;
        debug!(
            provider = self.provider.name(),
            model = response.model,
            output_tokens = response.usage.output_tokens,
            "model reply received"
        );
        Ok(response.content)
    }
}

/// Prefixes a provider failure with the operation that hit it.
fn wrap(context: &str, err: HelpdeskError) -> HelpdeskError {
    error!(error = %err, "{context}");
    HelpdeskError::Provider {
        message: format!("{context}: {}", err.detail()),
        source: Some(Box::new(err)),
    }
}
