// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the helpdesk assistant.
//!
//! Serves the four assistant operations as POST routes under a configurable
//! prefix (`/api/ai` by default). These are the routes the dispatcher's
//! remote backend calls when no model credential is configured locally.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState, ServerConfig};
