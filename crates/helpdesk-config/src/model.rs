// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the helpdesk assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Environment variable consulted when `gemini.api_key` is not set.
pub const GEMINI_API_KEY_ENV: &str = "GOOGLE_GEMINI_API_KEY";

/// Top-level helpdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HelpdeskConfig {
    /// Process-level settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Gemini model provider settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Same-origin HTTP fallback used when no credential is configured.
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// HTTP server exposing the fallback routes.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// External ticket API the context tickets are fetched from.
    #[serde(default)]
    pub search: SearchConfig,
}

impl HelpdeskConfig {
    /// Returns a copy safe for display, with secrets masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.gemini.api_key.is_some() {
            copy.gemini.api_key = Some("[REDACTED]".to_string());
        }
        copy
    }
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` falls back to `GOOGLE_GEMINI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// API origin, without the `/v1beta` path.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Maximum tokens to generate per reply.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Optional request timeout. `None` leaves the transport default in place.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_gemini_base_url(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    /// Resolves the credential: config value first, then the environment.
    ///
    /// Empty strings count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return Some(key.to_string());
            }
        }
        std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_max_output_tokens() -> u32 {
    2048
}

/// Same-origin fallback route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    /// Scheme, host and port the fallback routes are served from.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path prefix of the fallback routes.
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            base_path: default_base_path(),
        }
    }
}

impl FallbackConfig {
    /// Full URL prefix for the fallback routes, e.g. `http://127.0.0.1:8080/api/ai`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            self.base_path.trim_matches('/')
        )
    }
}

fn default_origin() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_base_path() -> String {
    "/api/ai".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Ticket API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// URL prefix of the ticket API, e.g. `http://127.0.0.1:8080/api`.
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// How many resolved tickets to fetch as solution context.
    #[serde(default = "default_resolved_limit")]
    pub resolved_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            resolved_limit: default_resolved_limit(),
        }
    }
}

fn default_search_base_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

fn default_resolved_limit() -> u32 {
    100
}
