// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for helpdesk integration tests.
//!
//! Provides a scripted provider and ticket fixtures for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock LLM provider with pre-configured replies
//! - [`fixtures`] - Representative helpdesk tickets

pub mod fixtures;
pub mod mock_provider;

pub use mock_provider::MockProvider;
