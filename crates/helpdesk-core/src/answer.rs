// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Records produced by the assistant for a single request.
//!
//! None of these outlive the call that created them. Scores are always
//! normalized to the `[0, 1]` range before they reach a caller.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ticket::{TicketCategory, TicketPriority};

/// A reference from an AI answer back to a ticket judged relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSource {
    /// Id of the referenced ticket. A reference, not ownership.
    pub ticket_id: String,
    /// Relevance in `[0, 1]`.
    pub relevance_score: f64,
    /// Free text explaining what matched.
    pub matched_content: String,
}

/// Answer to a free-text helpdesk query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    pub id: String,
    pub query_id: String,
    /// The answer prose.
    pub response: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub sources: Vec<TicketSource>,
    pub timestamp: DateTime<Utc>,
}

/// Suggested classification for a new ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizationResult {
    #[serde(default, deserialize_with = "lenient_code")]
    pub category: TicketCategory,
    #[serde(default, deserialize_with = "lenient_code")]
    pub priority: TicketPriority,
    #[serde(default)]
    pub suggested_tags: Vec<String>,
    /// Short justification. The fallback route does not return it.
    #[serde(default)]
    pub reasoning: String,
}

impl Default for CategorizationResult {
    fn default() -> Self {
        Self {
            category: TicketCategory::default(),
            priority: TicketPriority::default(),
            suggested_tags: Vec::new(),
            reasoning: String::new(),
        }
    }
}

/// Reads a category or priority code case-insensitively. Unknown or null
/// codes become the default, matching what the reply parser does.
fn lenient_code<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code
        .and_then(|code| code.trim().parse().ok())
        .unwrap_or_default())
}

/// Step-by-step solution draft for a problem description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionResult {
    pub solution: String,
    /// Ordered steps, each kept verbatim including its `N.` prefix.
    pub steps: Vec<String>,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Ids of the tickets the solution draws on.
    pub based_on_tickets: Vec<String>,
}

/// Generates a response id of the form `<prefix>_<unix-millis>_<9 chars>`.
pub fn generate_id(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}
