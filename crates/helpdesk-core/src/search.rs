// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query and result types for the external ticket API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ticket::{Ticket, TicketCategory, TicketPriority, TicketStatus};

/// One page of tickets matching a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub tickets: Vec<Ticket>,
    /// Matches across all pages.
    pub total_count: u64,
    /// The query as the API understood it.
    pub query: String,
    /// Server-side search time in milliseconds.
    pub execution_time: f64,
}

/// Inclusive creation-date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Narrows a ticket search. Empty lists do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<TicketStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<TicketPriority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<TicketCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl SearchFilters {
    /// Renders the filters as query parameters: comma-joined codes, and
    /// `dateFrom`/`dateTo` as RFC 3339 with milliseconds.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_joined(&mut pairs, "status", &self.status);
        push_joined(&mut pairs, "priority", &self.priority);
        push_joined(&mut pairs, "category", &self.category);
        push_joined(&mut pairs, "tags", &self.tags);
        if let Some(range) = &self.date_range {
            pairs.push(("dateFrom", range.from.to_rfc3339_opts(SecondsFormat::Millis, true)));
            pairs.push(("dateTo", range.to.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        pairs
    }
}

fn push_joined<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, values: &[T]) {
    if values.is_empty() {
        return;
    }
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    pairs.push((key, joined));
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn empty_filters_add_no_parameters() {
        assert!(SearchFilters::default().query_pairs().is_empty());
    }

    #[test]
    fn filters_render_as_joined_codes() {
        let filters = SearchFilters {
            status: vec![TicketStatus::Open, TicketStatus::InProgress],
            priority: vec![TicketPriority::Urgent],
            category: Vec::new(),
            tags: vec!["vpn".into(), "sieć".into()],
            date_range: Some(DateRange {
                from: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
                to: Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap(),
            }),
        };

        assert_eq!(
            filters.query_pairs(),
            vec![
                ("status", "open,in_progress".to_string()),
                ("priority", "urgent".to_string()),
                ("tags", "vpn,sieć".to_string()),
                ("dateFrom", "2026-01-01T00:00:00.000Z".to_string()),
                ("dateTo", "2026-01-31T23:59:59.000Z".to_string()),
            ]
        );
    }

    #[test]
    fn search_result_uses_camel_case() {
        let json = r#"{"tickets":[],"totalCount":42,"query":"vpn","executionTime":12.5}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_count, 42);
        assert!((result.execution_time - 12.5).abs() < f64::EPSILON);
    }
}
