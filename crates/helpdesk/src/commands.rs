// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot commands.
//!
//! The assistant commands build a [`Dispatcher`] from configuration and
//! make a single call; the ticket API commands (`search`, `ticket`,
//! `resolved`, `category`) make a single [`TicketSearchClient`] request.
//! Each prints either a human-readable summary or, with `--json`, the raw
//! record.

use std::fmt::Write as _;
use std::path::Path;

use helpdesk_assistant::{Dispatcher, TicketSearchClient, DEFAULT_SEARCH_LIMIT};
use helpdesk_config::HelpdeskConfig;
use helpdesk_core::{
    AiResponse, CategorizationResult, HelpdeskError, SearchFilters, SearchResult, SolutionResult,
    Ticket, TicketCategory, TicketSource,
};
use serde::Serialize;
use tracing::debug;

/// Where an assistant command reads its context tickets from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context<'a> {
    /// A local JSON array, or no tickets at all.
    File(Option<&'a Path>),
    /// The first page of an API search for this text.
    Search(&'a str),
    /// Resolved tickets from the API, up to `search.resolved_limit`.
    Resolved,
}

/// Reads the context tickets for one command.
pub async fn load_context(
    config: &HelpdeskConfig,
    context: Context<'_>,
) -> Result<Vec<Ticket>, HelpdeskError> {
    let tickets = match context {
        Context::File(path) => return load_tickets(path),
        Context::Search(query) => {
            TicketSearchClient::new(&config.search)?
                .search_tickets(query, &SearchFilters::default(), DEFAULT_SEARCH_LIMIT, 0)
                .await?
                .tickets
        }
        Context::Resolved => {
            TicketSearchClient::new(&config.search)?
                .resolved_tickets(config.search.resolved_limit)
                .await?
        }
    };
    debug!(count = tickets.len(), "context tickets fetched from ticket API");
    Ok(tickets)
}

/// Reads a JSON array of tickets. No path means no tickets.
pub fn load_tickets(path: Option<&Path>) -> Result<Vec<Ticket>, HelpdeskError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        HelpdeskError::InvalidInput(format!("cannot read tickets file {}: {e}", path.display()))
    })?;
    let tickets: Vec<Ticket> = serde_json::from_str(&content).map_err(|e| {
        HelpdeskError::InvalidInput(format!("invalid tickets file {}: {e}", path.display()))
    })?;

    debug!(path = %path.display(), count = tickets.len(), "tickets loaded");
    Ok(tickets)
}

/// Runs `helpdesk ask`.
pub async fn run_ask(
    config: &HelpdeskConfig,
    query: &str,
    tickets: &[Ticket],
    json: bool,
) -> Result<(), HelpdeskError> {
    let dispatcher = Dispatcher::from_config(config)?;
    let response = dispatcher.query(query, tickets).await?;
    emit(&response, json, render_answer)
}

/// Runs `helpdesk similar`.
pub async fn run_similar(
    config: &HelpdeskConfig,
    query: &str,
    tickets: &[Ticket],
    json: bool,
) -> Result<(), HelpdeskError> {
    let dispatcher = Dispatcher::from_config(config)?;
    let sources = dispatcher.find_similar(query, tickets).await?;
    emit(&sources, json, |s| render_sources(s))
}

/// Runs `helpdesk categorize`.
pub async fn run_categorize(
    config: &HelpdeskConfig,
    content: &str,
    json: bool,
) -> Result<(), HelpdeskError> {
    let dispatcher = Dispatcher::from_config(config)?;
    let result = dispatcher.categorize(content).await?;
    emit(&result, json, render_categorization)
}

/// Runs `helpdesk solve`.
pub async fn run_solve(
    config: &HelpdeskConfig,
    description: &str,
    similar_tickets: &[Ticket],
    json: bool,
) -> Result<(), HelpdeskError> {
    let dispatcher = Dispatcher::from_config(config)?;
    let solution = dispatcher.generate_solution(description, similar_tickets).await?;
    emit(&solution, json, render_solution)
}

/// Runs `helpdesk search`.
pub async fn run_search(
    config: &HelpdeskConfig,
    query: &str,
    filters: &SearchFilters,
    limit: u32,
    offset: u32,
    json: bool,
) -> Result<(), HelpdeskError> {
    let client = TicketSearchClient::new(&config.search)?;
    let result = client.search_tickets(query, filters, limit, offset).await?;
    emit(&result, json, render_search)
}

/// Runs `helpdesk ticket`. An unknown id is not an error.
pub async fn run_ticket(config: &HelpdeskConfig, id: &str, json: bool) -> Result<(), HelpdeskError> {
    let client = TicketSearchClient::new(&config.search)?;
    let ticket = client.ticket_by_id(id).await?;
    emit(&ticket, json, |ticket| match ticket {
        Some(ticket) => render_tickets(std::slice::from_ref(ticket)),
        None => format!("Nie znaleziono zgłoszenia {id}.\n"),
    })
}

/// Runs `helpdesk resolved`.
pub async fn run_resolved(config: &HelpdeskConfig, limit: u32, json: bool) -> Result<(), HelpdeskError> {
    let client = TicketSearchClient::new(&config.search)?;
    let tickets = client.resolved_tickets(limit).await?;
    emit(&tickets, json, |t| render_tickets(t))
}

/// Runs `helpdesk category`.
pub async fn run_category(
    config: &HelpdeskConfig,
    category: TicketCategory,
    json: bool,
) -> Result<(), HelpdeskError> {
    let client = TicketSearchClient::new(&config.search)?;
    let tickets = client.tickets_by_category(category).await?;
    emit(&tickets, json, |t| render_tickets(t))
}

/// Runs `helpdesk config`.
pub fn run_config(config: &HelpdeskConfig) -> Result<(), HelpdeskError> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| HelpdeskError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

fn emit<T: Serialize>(
    value: &T,
    json: bool,
    render: impl FnOnce(&T) -> String,
) -> Result<(), HelpdeskError> {
    if json {
        let out = serde_json::to_string_pretty(value)
            .map_err(|e| HelpdeskError::Internal(format!("failed to serialize output: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", render(value));
    }
    Ok(())
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

pub fn render_answer(response: &AiResponse) -> String {
    let mut out = format!("{}\n\nPewność: {}\n", response.response, percent(response.confidence));
    if !response.sources.is_empty() {
        let ids: Vec<&str> = response.sources.iter().map(|s| s.ticket_id.as_str()).collect();
        let _ = writeln!(out, "Źródła: {}", ids.join(", "));
    }
    out
}

pub fn render_sources(sources: &[TicketSource]) -> String {
    if sources.is_empty() {
        return "Brak podobnych zgłoszeń.\n".to_string();
    }
    let mut out = String::new();
    for source in sources {
        let _ = writeln!(
            out,
            "{:<10} {:>4}  {}",
            source.ticket_id,
            percent(source.relevance_score),
            source.matched_content
        );
    }
    out
}

/// One line per ticket: id, status, priority, category and title.
pub fn render_tickets(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return "Brak zgłoszeń.\n".to_string();
    }
    let mut out = String::new();
    for ticket in tickets {
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:<8} {:<10} {}",
            ticket.id, ticket.status, ticket.priority, ticket.category, ticket.title
        );
    }
    out
}

pub fn render_search(result: &SearchResult) -> String {
    let mut out = render_tickets(&result.tickets);
    let _ = writeln!(
        out,
        "\nWyników: {} z {} ({:.0} ms)",
        result.tickets.len(),
        result.total_count,
        result.execution_time
    );
    out
}

pub fn render_categorization(result: &CategorizationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Kategoria: {} ({})", result.category.label_pl(), result.category);
    let _ = writeln!(out, "Priorytet: {} ({})", result.priority.label_pl(), result.priority);
    if !result.suggested_tags.is_empty() {
        let _ = writeln!(out, "Tagi: {}", result.suggested_tags.join(", "));
    }
    if !result.reasoning.is_empty() {
        let _ = writeln!(out, "Uzasadnienie: {}", result.reasoning);
    }
    out
}

pub fn render_solution(solution: &SolutionResult) -> String {
    let mut out = format!("{}\n", solution.solution);
    if !solution.steps.is_empty() {
        out.push_str("\nKroki:\n");
        for step in &solution.steps {
            let _ = writeln!(out, "  {step}");
        }
    }
    let _ = writeln!(out, "\nPewność: {}", percent(solution.confidence));
    if !solution.based_on_tickets.is_empty() {
        let _ = writeln!(out, "Na podstawie: {}", solution.based_on_tickets.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_core::answer::generate_id;
    use helpdesk_core::{TicketCategory, TicketPriority};
    use helpdesk_test_utils::fixtures::sample_tickets;
    use std::io::Write;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_config(server: &MockServer) -> HelpdeskConfig {
        let mut config = HelpdeskConfig::default();
        config.search.base_url = format!("{}/api", server.uri());
        config
    }

    #[test]
    fn no_path_means_no_tickets() {
        assert!(load_tickets(None).unwrap().is_empty());
    }

    #[test]
    fn loads_ticket_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&sample_tickets()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let tickets = load_tickets(Some(file.path())).unwrap();
        assert_eq!(tickets.len(), 3);
        assert_eq!(tickets[1].id, "T-2");
    }

    #[test]
    fn malformed_tickets_file_is_invalid_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"id": "T-1"}"#).unwrap();

        let err = load_tickets(Some(file.path())).unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidInput(_)));
        assert!(err.to_string().contains("invalid tickets file"));
    }

    #[test]
    fn missing_tickets_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tickets(Some(&dir.path().join("none.json"))).unwrap_err();
        assert!(err.to_string().contains("cannot read tickets file"));
    }

    #[test]
    fn answer_lists_sources() {
        let response = AiResponse {
            id: generate_id("gemini"),
            query_id: generate_id("gemini"),
            response: "Sprawdź kabel".into(),
            confidence: 0.85,
            sources: vec![TicketSource {
                ticket_id: "T-1".into(),
                relevance_score: 0.8,
                matched_content: "drukarka".into(),
            }],
            timestamp: chrono::Utc::now(),
        };
        let text = render_answer(&response);
        assert!(text.starts_with("Sprawdź kabel\n"));
        assert!(text.contains("Pewność: 85%"));
        assert!(text.contains("Źródła: T-1"));
    }

    #[test]
    fn empty_similarity_list_has_a_message() {
        assert_eq!(render_sources(&[]), "Brak podobnych zgłoszeń.\n");
    }

    #[test]
    fn categorization_shows_polish_labels_and_codes() {
        let text = render_categorization(&CategorizationResult {
            category: TicketCategory::Overdue,
            priority: TicketPriority::Urgent,
            suggested_tags: vec!["ekg".into(), "sprzęt".into()],
            reasoning: String::new(),
        });
        assert!(text.contains("Kategoria: Zaległe (overdue)"));
        assert!(text.contains("Priorytet: Pilny (urgent)"));
        assert!(text.contains("Tagi: ekg, sprzęt"));
        assert!(!text.contains("Uzasadnienie"));
    }

    #[tokio::test]
    async fn file_context_reads_the_file() {
        let config = HelpdeskConfig::default();
        let tickets = load_context(&config, Context::File(None)).await.unwrap();
        assert!(tickets.is_empty());
    }

    #[tokio::test]
    async fn search_context_uses_first_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tickets/search"))
            .and(query_param("q", "EKG"))
            .and(query_param("limit", "20"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tickets": sample_tickets(),
                "totalCount": 3,
                "query": "EKG",
                "executionTime": 1.0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = api_config(&server);
        let tickets = load_context(&config, Context::Search("EKG")).await.unwrap();
        assert_eq!(tickets.len(), 3);
    }

    #[tokio::test]
    async fn resolved_context_honors_configured_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tickets"))
            .and(query_param("status", "resolved"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = api_config(&server);
        config.search.resolved_limit = 5;
        let tickets = load_context(&config, Context::Resolved).await.unwrap();
        assert!(tickets.is_empty());
    }

    #[tokio::test]
    async fn api_failure_is_not_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = load_context(&api_config(&server), Context::Resolved)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Resolved tickets error: 502"));
    }

    #[test]
    fn ticket_lines_show_codes_and_title() {
        let text = render_tickets(&sample_tickets()[..1]);
        assert!(text.starts_with("T-1"));
        assert!(text.contains("open"));
        assert!(text.trim_end().ends_with(&sample_tickets()[0].title));
        assert_eq!(render_tickets(&[]), "Brak zgłoszeń.\n");
    }

    #[test]
    fn search_summary_counts_pages() {
        let text = render_search(&SearchResult {
            tickets: sample_tickets(),
            total_count: 42,
            query: "x".into(),
            execution_time: 12.4,
        });
        assert!(text.ends_with("Wyników: 3 z 42 (12 ms)\n"));
    }

    #[test]
    fn solution_prints_steps_in_order() {
        let text = render_solution(&SolutionResult {
            solution: "Restart".into(),
            steps: vec!["1. Wyłącz".into(), "2. Włącz".into()],
            confidence: 0.1,
            based_on_tickets: Vec::new(),
        });
        let first = text.find("1. Wyłącz").unwrap();
        let second = text.find("2. Włącz").unwrap();
        assert!(first < second);
        assert!(text.contains("Pewność: 10%"));
        assert!(!text.contains("Na podstawie"));
    }
}
