// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for the helpdesk assistant.
//!
//! This crate implements [`ProviderAdapter`] for the Gemini `generateContent`
//! API. One prompt in, one complete text reply out.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use helpdesk_config::model::{GeminiConfig, GEMINI_API_KEY_ENV};
use helpdesk_core::error::HelpdeskError;
use helpdesk_core::traits::{PluginAdapter, ProviderAdapter};
use helpdesk_core::types::{HealthStatus, ProviderRequest, ProviderResponse, TokenUsage};
use helpdesk_core::answer::generate_id;
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

/// Gemini provider implementing [`ProviderAdapter`].
///
/// API key resolution order: `gemini.api_key` -> `GOOGLE_GEMINI_API_KEY` -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the given configuration.
    ///
    /// Fails with [`HelpdeskError::Config`] when no non-empty credential is
    /// available.
    pub fn new(config: &GeminiConfig) -> Result<Self, HelpdeskError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| HelpdeskError::Config(format!("{GEMINI_API_KEY_ENV} is not configured")))?;

        let client = GeminiClient::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )?;

        info!(model = config.model, "Gemini provider initialized");

        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        // A test request would spend quota.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, HelpdeskError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.client.default_model().to_string());
        let api_request = GenerateContentRequest::user_text(request.prompt, request.max_tokens);
        let response = self.client.generate_content(&model, &api_request).await?;

        let finish_reason = response.finish_reason();
        let content = response.text().ok_or_else(|| {
            HelpdeskError::provider(format!(
                "Gemini returned no text (finish reason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

        let usage = response
            .usage_metadata
            .as_ref()
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        debug!(
            model,
            output_tokens = usage.output_tokens,
            "Gemini completion finished"
        );

        Ok(ProviderResponse {
            id: response
                .response_id
                .clone()
                .unwrap_or_else(|| generate_id("gemini")),
            content,
            model: response.model_version.clone().unwrap_or(model),
            finish_reason,
            usage,
        })
    }
}
