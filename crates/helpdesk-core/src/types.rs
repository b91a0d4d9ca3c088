// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider request/response types and adapter health reporting.

use serde::{Deserialize, Serialize};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// A single-shot text generation request to an LLM provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// Model override. `None` uses the provider's configured model.
    pub model: Option<String>,
    /// The fully rendered prompt.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl ProviderRequest {
    /// Creates a request for the provider's default model.
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: None,
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// The complete text reply from an LLM provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Provider-assigned or locally generated response id.
    pub id: String,
    /// Concatenated text of the reply.
    pub content: String,
    /// Model that produced the reply.
    pub model: String,
    /// Why generation stopped, if reported.
    pub finish_reason: Option<String>,
    /// Token accounting, zero when the provider does not report it.
    pub usage: TokenUsage,
}

/// Token counts reported alongside a provider response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
