// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that every external integration implements.

use async_trait::async_trait;

use crate::error::HelpdeskError;
use crate::types::HealthStatus;

/// The base trait for helpdesk adapters.
///
/// Provides identity and health reporting. Adapters hold no per-request
/// state, so there is no shutdown hook.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError>;
}
