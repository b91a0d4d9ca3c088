// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates for the four assistant operations.
//!
//! Every builder is a pure, total function. Ticket fields and user text are
//! interpolated verbatim; the replies are read back by
//! [`crate::parser::LabelFormat`], so the label literals here and there
//! must stay in sync.

use helpdesk_core::{Ticket, TicketCategory, TicketPriority};
use strum::IntoEnumIterator;

/// Label literals shared by the prompt templates and the reply parser.
pub mod labels {
    pub const ANSWER: &str = "ODPOWIEDŹ:";
    pub const CONFIDENCE: &str = "PEWNOŚĆ:";
    pub const SOURCES: &str = "ŹRÓDŁA:";

    pub const ID: &str = "ID:";
    pub const SIMILARITY: &str = "PODOBIEŃSTWO:";
    pub const MATCHED_CONTENT: &str = "DOPASOWANA_TREŚĆ:";
    pub const BLOCK_SEPARATOR: &str = "---";

    pub const CATEGORY: &str = "KATEGORIA:";
    pub const PRIORITY: &str = "PRIORYTET:";
    pub const TAGS: &str = "TAGI:";
    pub const REASONING: &str = "UZASADNIENIE:";

    pub const SOLUTION: &str = "ROZWIĄZANIE:";
    pub const STEPS: &str = "KROKI:";
    pub const BASED_ON: &str = "BAZUJE_NA:";
}

/// Builds the free-text query analysis prompt.
///
/// The optional ticket context block is omitted when `tickets` is empty.
pub fn build_analysis_prompt(query: &str, tickets: &[Ticket]) -> String {
    let context = if tickets.is_empty() {
        String::new()
    } else {
        let blocks: Vec<String> = tickets
            .iter()
            .map(|t| {
                format!(
                    "ID: {}\nTytuł: {}\nOpis: {}\nStatus: {}\nRozwiązanie: {}\n---",
                    t.id,
                    t.title,
                    t.description,
                    t.status,
                    t.solution.as_deref().unwrap_or("Brak"),
                )
            })
            .collect();
        format!("\n\nDostępne zgłoszenia do analizy:\n{}", blocks.join("\n"))
    };

    format!(
        r#"Jesteś asystentem AI dla systemu zgłoszeń firmy EOT (Emergency Operations Technology).
Twoja rola to pomoc w analizie i rozwiązywaniu problemów technicznych związanych z:
- Systemami medycznymi (defibrylatory, EKG)
- Aplikacjami mobilnymi (Analityk, automapa)
- Infrastrukturą IT (drukarki, łączność internetowa)
- Systemami SWD PRM

Pytanie użytkownika: "{query}"
{context}

Przeanalizuj pytanie i udziel pomocnej odpowiedzi w języku polskim. Jeśli masz dostęp do podobnych zgłoszeń, wykorzystaj je do udzielenia lepszej odpowiedzi.

Format odpowiedzi:
ODPOWIEDŹ: [Twoja odpowiedź]
PEWNOŚĆ: [0-100]
ŹRÓDŁA: [ID zgłoszeń, które wykorzystałeś, oddzielone przecinkami]"#
    )
}

/// Builds the similarity ranking prompt. One block is rendered per ticket.
pub fn build_similarity_prompt(query: &str, tickets: &[Ticket]) -> String {
    let blocks: Vec<String> = tickets
        .iter()
        .map(|t| {
            format!(
                "ID: {}\nTytuł: {}\nOpis: {}\nKategoria: {}\nTagi: {}\n---",
                t.id,
                t.title,
                t.description,
                t.category,
                t.tags.join(", "),
            )
        })
        .collect();
    let blocks = blocks.join("\n");

    format!(
        r#"Znajdź zgłoszenia podobne do zapytania: "{query}"

Dostępne zgłoszenia:
{blocks}

Oceń podobieństwo każdego zgłoszenia do zapytania w skali 0-100 i zwróć tylko te z oceną powyżej 30.

Format odpowiedzi:
ID: [id_zgłoszenia]
PODOBIEŃSTWO: [0-100]
DOPASOWANA_TREŚĆ: [fragment tekstu, który pasuje do zapytania]
---"#
    )
}

/// Builds the category/priority classification prompt.
pub fn build_categorization_prompt(content: &str) -> String {
    let categories = TicketCategory::iter()
        .map(|c| format!("- {c} ({}) - {}", c.label_pl(), c.description_pl()))
        .collect::<Vec<_>>()
        .join("\n");
    let priorities = TicketPriority::iter()
        .map(|p| format!("- {p} ({})", p.label_pl()))
        .collect::<Vec<_>>()
        .join("\n");
    let category_codes = TicketCategory::iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("/");
    let priority_codes = TicketPriority::iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("/");

    format!(
        r#"Skategoryzuj następujące zgłoszenie:

"{content}"

Dostępne kategorie:
{categories}

Dostępne priorytety:
{priorities}

Format odpowiedzi:
KATEGORIA: [{category_codes}]
PRIORYTET: [{priority_codes}]
TAGI: [tag1, tag2, tag3]
UZASADNIENIE: [krótkie uzasadnienie decyzji]"#
    )
}

/// Builds the step-by-step solution prompt.
///
/// A ticket without a solution renders an empty `Rozwiązanie:` line.
pub fn build_solution_prompt(description: &str, similar_tickets: &[Ticket]) -> String {
    let context = if similar_tickets.is_empty() {
        String::new()
    } else {
        let blocks: Vec<String> = similar_tickets
            .iter()
            .map(|t| {
                format!(
                    "Problem: {}\nRozwiązanie: {}\n---",
                    t.title,
                    t.solution.as_deref().unwrap_or_default(),
                )
            })
            .collect();
        format!("\n\nPodobne rozwiązane zgłoszenia:\n{}", blocks.join("\n"))
    };

    format!(
        r#"Zaproponuj rozwiązanie dla następującego problemu:

"{description}"
{context}

Bazując na dostępnych informacjach i podobnych przypadkach, zaproponuj krok po kroku rozwiązanie problemu.

Format odpowiedzi:
ROZWIĄZANIE: [ogólne rozwiązanie]
KROKI:
1. [pierwszy krok]
2. [drugi krok]
3. [trzeci krok]
PEWNOŚĆ: [0-100]
BAZUJE_NA: [ID zgłoszeń, które wykorzystałeś]"#
    )
}
