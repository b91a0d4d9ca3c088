// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `helpdesk serve` command implementation.
//!
//! Serves the assistant routes from an in-process [`TicketAssistant`]. The
//! routes are the ones a credential-less [`helpdesk_assistant::Dispatcher`]
//! forwards to, so the server itself always needs a Gemini credential.

use std::sync::Arc;

use helpdesk_assistant::TicketAssistant;
use helpdesk_config::HelpdeskConfig;
use helpdesk_core::HelpdeskError;
use helpdesk_gateway::{GatewayState, ServerConfig};
use helpdesk_gemini::GeminiProvider;
use tracing::info;

/// Runs the `helpdesk serve` command.
pub async fn run_serve(config: HelpdeskConfig) -> Result<(), HelpdeskError> {
    info!("starting helpdesk serve");

    let state = gateway_state(&config)?;
    helpdesk_gateway::start_server(&server_config(&config), state).await
}

/// Builds the route state. Fails with a configuration error when no
/// credential resolves.
fn gateway_state(config: &HelpdeskConfig) -> Result<GatewayState, HelpdeskError> {
    let provider = GeminiProvider::new(&config.gemini)?;
    let assistant = TicketAssistant::new(Arc::new(provider), config.gemini.max_output_tokens);
    Ok(GatewayState::new(Arc::new(assistant)))
}

/// Bind address from `[gateway]`, route prefix from `[fallback]`.
fn server_config(config: &HelpdeskConfig) -> ServerConfig {
    ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
        base_path: config.fallback.base_path.clone(),
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so
/// `--json` output stays machine-readable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("helpdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_config::model::GEMINI_API_KEY_ENV;
    use serial_test::serial;

    #[test]
    fn server_config_combines_gateway_and_fallback_sections() {
        let config = helpdesk_config::load_and_validate_str(
            "[gateway]\nhost = \"0.0.0.0\"\nport = 9090\n\n[fallback]\nbase_path = \"/internal/ai\"\n",
        )
        .unwrap();

        let server = server_config(&config);
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 9090);
        assert_eq!(server.base_path, "/internal/ai");
    }

    #[test]
    #[serial]
    fn serving_requires_a_credential() {
        // SAFETY: every test touching the environment is #[serial].
        unsafe { std::env::remove_var(GEMINI_API_KEY_ENV) };

        let config = HelpdeskConfig::default();
        let err = gateway_state(&config).err().expect("missing credential must fail");
        assert!(matches!(err, HelpdeskError::Config(_)));
        assert!(err.to_string().contains("GOOGLE_GEMINI_API_KEY is not configured"));
    }

    #[test]
    #[serial]
    fn configured_key_builds_state() {
        let mut config = HelpdeskConfig::default();
        config.gemini.api_key = Some("test-key".into());
        assert!(gateway_state(&config).is_ok());
    }
}
