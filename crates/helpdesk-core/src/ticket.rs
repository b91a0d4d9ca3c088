// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ticket record model.
//!
//! Tickets are passive values: the assistant never mutates, stores or
//! indexes them. They are only read and echoed into prompts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle state of a ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
    Pending,
}

/// Urgency of a ticket.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    /// Polish label shown to operators.
    pub fn label_pl(&self) -> &'static str {
        match self {
            Self::Low => "Niski",
            Self::Medium => "Średni",
            Self::High => "Wysoki",
            Self::Urgent => "Pilny",
        }
    }
}

/// Work queue a ticket belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TicketCategory {
    /// Handled on afternoon or night shifts.
    Afternoon,
    /// Needs a longer time to resolve.
    #[default]
    LongTerm,
    /// Overdue or waiting for verification.
    Overdue,
}

impl TicketCategory {
    /// Polish label shown to operators.
    pub fn label_pl(&self) -> &'static str {
        match self {
            Self::Afternoon => "Popołudniowe",
            Self::LongTerm => "Długofalowe",
            Self::Overdue => "Zaległe",
        }
    }

    /// Polish description of when the category applies.
    pub fn description_pl(&self) -> &'static str {
        match self {
            Self::Afternoon => "do realizacji na zmianach popołudniowych/nocnych",
            Self::LongTerm => "wymagające dłuższego czasu realizacji",
            Self::Overdue => "zalegające lub wymagające weryfikacji",
        }
    }
}

/// A reported problem or unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl Ticket {
    /// Creates an open ticket with the given id, title and description.
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status: TicketStatus::default(),
            priority: TicketPriority::default(),
            category: TicketCategory::default(),
            created_at: now,
            updated_at: now,
            resolved_at: None,
            assigned_to: None,
            tags: Vec::new(),
            solution: None,
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: TicketCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the ticket resolved with the given solution text.
    pub fn resolved_with(mut self, solution: impl Into<String>) -> Self {
        let now = Utc::now();
        self.status = TicketStatus::Resolved;
        self.solution = Some(solution.into());
        self.resolved_at = Some(now);
        self.updated_at = now;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn enum_codes_match_wire_format() {
        assert_eq!(TicketStatus::InProgress.to_string(), "in_progress");
        assert_eq!(TicketCategory::LongTerm.to_string(), "long_term");
        assert_eq!(TicketPriority::Urgent.to_string(), "urgent");
        assert_eq!(
            serde_json::to_string(&TicketCategory::Afternoon).unwrap(),
            "\"afternoon\""
        );
    }

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!(TicketCategory::from_str("Overdue").unwrap(), TicketCategory::Overdue);
        assert_eq!(TicketPriority::from_str("HIGH").unwrap(), TicketPriority::High);
        assert!(TicketCategory::from_str("weekend").is_err());
    }

    #[test]
    fn defaults_are_long_term_and_medium() {
        assert_eq!(TicketCategory::default(), TicketCategory::LongTerm);
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
    }

    #[test]
    fn ticket_json_uses_camel_case() {
        let ticket = Ticket::new("T-1", "Drukarka", "Nie drukuje")
            .with_tags(["drukarka", "sieć"])
            .resolved_with("Restart spoolera");
        let json = serde_json::to_value(&ticket).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("resolvedAt").is_some());
        assert!(json.get("assignedTo").is_none());
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["tags"][1], "sieć");
    }

    #[test]
    fn ticket_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "T-9",
            "title": "Brak internetu",
            "description": "Router nie odpowiada",
            "status": "open",
            "priority": "high",
            "category": "afternoon",
            "createdAt": "2024-05-01T08:00:00Z",
            "updatedAt": "2024-05-01T08:00:00Z"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.priority, TicketPriority::High);
        assert!(ticket.tags.is_empty());
        assert!(ticket.solution.is_none());
    }

    #[test]
    fn variants_iterate_in_declaration_order() {
        use strum::IntoEnumIterator;

        let categories: Vec<String> = TicketCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(categories, ["afternoon", "long_term", "overdue"]);
        let priorities: Vec<String> = TicketPriority::iter().map(|p| p.to_string()).collect();
        assert_eq!(priorities, ["low", "medium", "high", "urgent"]);
    }

    #[test]
    fn polish_labels() {
        assert_eq!(TicketCategory::Overdue.label_pl(), "Zaległe");
        assert_eq!(TicketPriority::Medium.label_pl(), "Średni");
    }
}
