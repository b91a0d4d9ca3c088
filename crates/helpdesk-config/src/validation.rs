// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, route prefixes and bind addresses.

use crate::diagnostic::ConfigError;
use crate::model::HelpdeskConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HelpdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    if config.gemini.max_output_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.max_output_tokens must be greater than 0".to_string(),
        });
    }

    if config.gemini.request_timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "gemini.request_timeout_secs must be greater than 0 when set".to_string(),
        });
    }

    if !is_http_url(&config.gemini.base_url) {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.base_url `{}` must start with http:// or https://",
                config.gemini.base_url
            ),
        });
    }

    if !is_http_url(&config.fallback.origin) {
        errors.push(ConfigError::Validation {
            message: format!(
                "fallback.origin `{}` must start with http:// or https://",
                config.fallback.origin
            ),
        });
    }

    if !config.fallback.base_path.starts_with('/') {
        errors.push(ConfigError::Validation {
            message: format!(
                "fallback.base_path `{}` must start with `/`",
                config.fallback.base_path
            ),
        });
    }

    if !is_http_url(&config.search.base_url) {
        errors.push(ConfigError::Validation {
            message: format!(
                "search.base_url `{}` must start with http:// or https://",
                config.search.base_url
            ),
        });
    }

    if config.search.resolved_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "search.resolved_limit must be greater than 0".to_string(),
        });
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.trim_matches('/').is_empty())
}
