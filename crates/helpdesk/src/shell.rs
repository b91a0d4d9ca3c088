// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `helpdesk shell` command implementation.
//!
//! Interactive chat with readline history. Plain lines are questions;
//! `/similar`, `/categorize` and `/solve` reach the other operations. A
//! failed call prints a fixed apology and the session continues.

use colored::Colorize;
use helpdesk_assistant::Dispatcher;
use helpdesk_config::HelpdeskConfig;
use helpdesk_core::{HelpdeskError, Ticket};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn};

use crate::commands::{render_answer, render_categorization, render_solution, render_sources};

/// Shown instead of any failure detail.
pub const FAILURE_MESSAGE: &str =
    "Przepraszam, wystąpił błąd podczas przetwarzania zapytania. Spróbuj ponownie.";

const HELP: &str = "\
  <pytanie>              zadaj pytanie
  /similar <zapytanie>   znajdź podobne zgłoszenia
  /categorize <treść>    zaproponuj kategorię i priorytet
  /solve <opis>          zaproponuj rozwiązanie
  /help                  pokaż tę pomoc
  /quit, /exit           zakończ";

/// One line of shell input.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Ask(&'a str),
    Similar(&'a str),
    Categorize(&'a str),
    Solve(&'a str),
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

impl<'a> ShellCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Ask(line);
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name {
            "quit" | "exit" => Self::Quit,
            "help" => Self::Help,
            "similar" => Self::Similar(arg),
            "categorize" => Self::Categorize(arg),
            "solve" => Self::Solve(arg),
            _ => Self::Unknown(name),
        }
    }
}

/// Runs the `helpdesk shell` interactive REPL.
///
/// `tickets` are passed as context to every question, similarity search and
/// solution request in the session.
pub async fn run_shell(config: &HelpdeskConfig, tickets: Vec<Ticket>) -> Result<(), HelpdeskError> {
    let dispatcher = Dispatcher::from_config(config)?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| HelpdeskError::Internal(format!("failed to initialize readline: {e}")))?;

    println!(
        "{}",
        format!(
            "helpdesk shell ({} backend, {} tickets). /help for commands.",
            dispatcher.backend_kind(),
            tickets.len()
        )
        .green()
        .bold()
    );
    info!(backend = %dispatcher.backend_kind(), tickets = tickets.len(), "shell session started");

    loop {
        let line = match rl.readline(&format!("{} ", ">".cyan().bold())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };

        let command = ShellCommand::parse(&line);
        if command != ShellCommand::Empty {
            let _ = rl.add_history_entry(line.as_str());
        }

        let outcome = match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Unknown(name) => {
                println!("Nieznane polecenie /{name}. Wpisz /help.");
                continue;
            }
            ShellCommand::Ask(query) => dispatcher
                .query(query, &tickets)
                .await
                .map(|r| render_answer(&r)),
            ShellCommand::Similar(query) => dispatcher
                .find_similar(query, &tickets)
                .await
                .map(|s| render_sources(&s)),
            ShellCommand::Categorize(content) => dispatcher
                .categorize(content)
                .await
                .map(|c| render_categorization(&c)),
            ShellCommand::Solve(description) => dispatcher
                .generate_solution(description, &tickets)
                .await
                .map(|s| render_solution(&s)),
        };

        match outcome {
            Ok(text) => println!("{text}"),
            Err(e) => {
                warn!(error = %e, "shell request failed");
                println!("{}\n", FAILURE_MESSAGE.red());
            }
        }
    }

    println!("Do widzenia!");
    Ok(())
}
