// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the helpdesk assistant.

use thiserror::Error;

/// The primary error type used across the provider, fallback and dispatch layers.
///
/// Only transport and validation failures are represented here. Malformed
/// model output is never an error: the reply parser degrades to defaults.
#[derive(Debug, Error)]
pub enum HelpdeskError {
    /// Configuration errors (missing credential, invalid header values, bad URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// A required request field was missing, empty or of the wrong type.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// LLM provider errors (HTTP failure, non-2xx status, unreadable body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failures talking to the same-origin HTTP fallback routes.
    #[error("fallback error: {message}")]
    Fallback {
        message: String,
        /// HTTP status returned by the fallback route, if a response arrived.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failures talking to the external ticket API.
    #[error("ticket search error: {message}")]
    Search {
        message: String,
        /// HTTP status returned by the ticket API, if a response arrived.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HelpdeskError {
    /// Builds a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// The error message without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Config(message) | Self::InvalidInput(message) | Self::Internal(message) => {
                message.clone()
            }
            Self::Provider { message, .. }
            | Self::Fallback { message, .. }
            | Self::Search { message, .. } => message.clone(),
        }
    }

    /// Returns the HTTP status a gateway should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            _ => 500,
        }
    }
}
