// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpdesk assistant core.
//!
//! Builds Polish prompts for four operations (query analysis, similar-ticket
//! ranking, categorization, solution drafting), sends each to an LLM
//! provider in a single call, and reads the labelled reply back into typed
//! records. [`Dispatcher`] routes each operation to the in-process model or
//! to the same-origin HTTP fallback routes. [`TicketSearchClient`] reads
//! context tickets from the external ticket API.

pub mod assistant;
pub mod dispatch;
pub mod fallback;
pub mod operations;
pub mod parser;
pub mod prompts;
pub mod search;

pub use assistant::TicketAssistant;
pub use dispatch::{Backend, BackendKind, Dispatcher};
pub use fallback::FallbackClient;
pub use operations::{BackendInfo, TicketOperations};
pub use parser::{LabelFormat, ParsedAnalysis, ReplyFormat};
pub use search::{TicketSearchClient, DEFAULT_SEARCH_LIMIT};
