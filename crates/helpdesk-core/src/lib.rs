// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the helpdesk assistant.
//!
//! This crate provides the ticket record model, the records the assistant
//! returns, ticket-search filters, the shared error type, and the provider
//! adapter traits that model integrations implement.

pub mod answer;
pub mod error;
pub mod search;
pub mod ticket;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use answer::{AiResponse, CategorizationResult, SolutionResult, TicketSource};
pub use error::HelpdeskError;
pub use search::{DateRange, SearchFilters, SearchResult};
pub use ticket::{Ticket, TicketCategory, TicketPriority, TicketStatus};
pub use types::{HealthStatus, ProviderRequest, ProviderResponse, TokenUsage};

pub use traits::{PluginAdapter, ProviderAdapter};
