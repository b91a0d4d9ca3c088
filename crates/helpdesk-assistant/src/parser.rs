// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant parsing of labelled model replies.
//!
//! Parsing never fails. Missing or malformed fields fall back to defaults:
//! confidence 0.7, empty lists, the `long_term`/`medium` classification, and
//! the raw reply text in place of a missing answer or solution.

use std::str::FromStr;
use std::sync::LazyLock;

use helpdesk_core::{
    CategorizationResult, SolutionResult, TicketCategory, TicketPriority, TicketSource,
};
use regex::Regex;
use tracing::warn;

use crate::prompts::labels;

/// Confidence on the 0-100 scale used when the reply has none.
const DEFAULT_CONFIDENCE: i64 = 70;

/// Similarity blocks at or below this score are dropped.
const SIMILARITY_THRESHOLD: i64 = 30;

static STEP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.").expect("valid regex")
});

/// Fields read from a query analysis reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnalysis {
    pub answer: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub sources: Vec<TicketSource>,
}

/// Turns raw model replies into typed records.
///
/// Implementations must be total: any input text yields a value.
pub trait ReplyFormat: Send + Sync {
    /// Parses a query analysis reply. `query` is echoed into each source's
    /// `matched_content`.
    fn parse_analysis(&self, text: &str, query: &str) -> ParsedAnalysis;

    /// Parses a similarity reply, sorted by descending relevance.
    fn parse_similar(&self, text: &str) -> Vec<TicketSource>;

    /// Parses a categorization reply.
    fn parse_categorization(&self, text: &str) -> CategorizationResult;

    /// Parses a solution reply.
    fn parse_solution(&self, text: &str) -> SolutionResult;
}

/// Line-prefix parser for the Polish label format requested by
/// [`crate::prompts`].
///
/// Each line is tested against the labels in order; the first match wins and
/// the rest of the line, trimmed, becomes the field value. Unlabelled lines
/// are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelFormat;

impl ReplyFormat for LabelFormat {
    fn parse_analysis(&self, text: &str, query: &str) -> ParsedAnalysis {
        let mut answer = String::new();
        let mut confidence = DEFAULT_CONFIDENCE;
        let mut sources = Vec::new();
        let mut recognized = false;

        for line in text.split('\n') {
            if let Some(rest) = line.strip_prefix(labels::ANSWER) {
                answer = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix(labels::CONFIDENCE) {
                confidence = parse_confidence(rest);
            } else if let Some(rest) = line.strip_prefix(labels::SOURCES) {
                // Sources take the confidence seen so far.
                let relevance = normalize_score(confidence);
                sources.extend(split_list(rest).into_iter().map(|ticket_id| TicketSource {
                    ticket_id,
                    relevance_score: relevance,
                    matched_content: query.to_string(),
                }));
            } else {
                continue;
            }
            recognized = true;
        }

        if !recognized {
            warn!(len = text.len(), "analysis reply had no recognizable labels");
        }

        ParsedAnalysis {
            answer: if answer.is_empty() { text.to_string() } else { answer },
            confidence: normalize_score(confidence),
            sources,
        }
    }

    fn parse_similar(&self, text: &str) -> Vec<TicketSource> {
        let mut sources = Vec::new();

        for section in text.split(labels::BLOCK_SEPARATOR) {
            let mut ticket_id = String::new();
            let mut similarity = 0;
            let mut matched_content = String::new();

            for line in section.trim().split('\n') {
                if let Some(rest) = line.strip_prefix(labels::ID) {
                    ticket_id = rest.trim().to_string();
                } else if let Some(rest) = line.strip_prefix(labels::SIMILARITY) {
                    similarity = parse_leading_int(rest).unwrap_or(0);
                } else if let Some(rest) = line.strip_prefix(labels::MATCHED_CONTENT) {
                    matched_content = rest.trim().to_string();
                }
            }

            if !ticket_id.is_empty() && similarity > SIMILARITY_THRESHOLD {
                sources.push(TicketSource {
                    ticket_id,
                    relevance_score: normalize_score(similarity),
                    matched_content,
                });
            }
        }

        // Stable: equal scores keep reply order.
        sources.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        sources
    }

    fn parse_categorization(&self, text: &str) -> CategorizationResult {
        let mut result = CategorizationResult::default();
        let mut recognized = false;

        for line in text.split('\n') {
            if let Some(rest) = line.strip_prefix(labels::CATEGORY) {
                result.category = parse_code(rest.trim(), "category");
            } else if let Some(rest) = line.strip_prefix(labels::PRIORITY) {
                result.priority = parse_code(rest.trim(), "priority");
            } else if let Some(rest) = line.strip_prefix(labels::TAGS) {
                result.suggested_tags = split_list(rest);
            } else if let Some(rest) = line.strip_prefix(labels::REASONING) {
                result.reasoning = rest.trim().to_string();
            } else {
                continue;
            }
            recognized = true;
        }

        if !recognized {
            warn!(
                len = text.len(),
                "categorization reply had no recognizable labels, using defaults"
            );
        }

        result
    }

    fn parse_solution(&self, text: &str) -> SolutionResult {
        let mut solution = String::new();
        let mut steps = Vec::new();
        let mut confidence = DEFAULT_CONFIDENCE;
        let mut based_on_tickets = Vec::new();
        let mut in_steps = false;

        for line in text.split('\n') {
            if let Some(rest) = line.strip_prefix(labels::SOLUTION) {
                solution = rest.trim().to_string();
            } else if line.starts_with(labels::STEPS) {
                in_steps = true;
            } else if let Some(rest) = line.strip_prefix(labels::CONFIDENCE) {
                confidence = parse_confidence(rest);
                in_steps = false;
            } else if let Some(rest) = line.strip_prefix(labels::BASED_ON) {
                based_on_tickets.extend(split_list(rest));
                in_steps = false;
            } else if in_steps {
                let step = line.trim();
                if STEP_LINE.is_match(step) {
                    steps.push(step.to_string());
                }
            }
        }

        if solution.is_empty() {
            warn!(len = text.len(), "solution reply had no solution label");
        }

        SolutionResult {
            solution: if solution.is_empty() { text.to_string() } else { solution },
            steps,
            confidence: normalize_score(confidence),
            based_on_tickets,
        }
    }
}

/// Reads a leading integer the way a lenient `parseInt` does: leading
/// whitespace, an optional sign, then the longest run of ASCII digits.
/// Trailing text is ignored. Returns `None` when there are no digits.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // All digits, so the only failure is overflow.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses a 0-100 confidence value. Zero and unparsable values yield the default.
fn parse_confidence(value: &str) -> i64 {
    match parse_leading_int(value) {
        Some(0) | None => DEFAULT_CONFIDENCE,
        Some(n) => n,
    }
}

/// Converts a 0-100 score to `[0, 1]`.
fn normalize_score(score: i64) -> f64 {
    (score as f64 / 100.0).clamp(0.0, 1.0)
}

/// Splits a comma-separated list, trimming entries and dropping empties.
fn split_list(value: &str) -> Vec<String> {
    value
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a category or priority code, degrading to the default.
fn parse_code<T: FromStr + Default>(code: &str, field: &'static str) -> T {
    T::from_str(code).unwrap_or_else(|_| {
        warn!(field, code, "unknown code in reply, using default");
        T::default()
    })
}
