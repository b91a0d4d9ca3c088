// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpdesk - IT-helpdesk assistant backed by Gemini.
//!
//! This is the binary entry point: one-shot ticket operations, an
//! interactive shell, and the HTTP routes the dispatcher falls back to.

mod commands;
mod serve;
mod shell;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use helpdesk_assistant::DEFAULT_SEARCH_LIMIT;
use helpdesk_config::HelpdeskConfig;
use helpdesk_core::{
    DateRange, HelpdeskError, SearchFilters, TicketCategory, TicketPriority, TicketStatus,
};

use crate::commands::Context;

/// Helpdesk - IT-helpdesk assistant backed by Gemini.
#[derive(Parser, Debug)]
#[command(name = "helpdesk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where context tickets come from.
#[derive(Args, Debug, Default, PartialEq)]
struct ContextArgs {
    /// JSON array of tickets to use as context.
    #[arg(long, value_name = "FILE", conflicts_with = "api")]
    tickets: Option<PathBuf>,
    /// Read context tickets from the ticket API instead.
    #[arg(long)]
    api: bool,
}

impl ContextArgs {
    /// Context for a query: a file, an API search for `query`, or nothing.
    fn for_query<'a>(&'a self, query: &'a str) -> Context<'a> {
        if self.api {
            Context::Search(query)
        } else {
            Context::File(self.tickets.as_deref())
        }
    }

    /// Context for solution drafting: a file, resolved API tickets, or nothing.
    fn for_solutions(&self) -> Context<'_> {
        if self.api {
            Context::Resolved
        } else {
            Context::File(self.tickets.as_deref())
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the assistant HTTP routes (requires a Gemini API key).
    Serve,
    /// Ask a free-text question, optionally grounded in known tickets.
    Ask {
        query: String,
        #[command(flatten)]
        context: ContextArgs,
        /// Print the raw JSON record.
        #[arg(long)]
        json: bool,
    },
    /// Rank known tickets by similarity to a query.
    Similar {
        query: String,
        #[command(flatten)]
        context: ContextArgs,
        #[arg(long)]
        json: bool,
    },
    /// Suggest a category, priority and tags for ticket text.
    Categorize {
        content: String,
        #[arg(long)]
        json: bool,
    },
    /// Draft a step-by-step solution from similar resolved tickets.
    Solve {
        description: String,
        #[command(flatten)]
        context: ContextArgs,
        #[arg(long)]
        json: bool,
    },
    /// Launch an interactive chat session.
    Shell {
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Search the ticket API.
    Search {
        query: String,
        /// Comma-separated status codes.
        #[arg(long, value_delimiter = ',')]
        status: Vec<TicketStatus>,
        /// Comma-separated priority codes.
        #[arg(long, value_delimiter = ',')]
        priority: Vec<TicketPriority>,
        /// Comma-separated category codes.
        #[arg(long, value_delimiter = ',')]
        category: Vec<TicketCategory>,
        /// Tag to match; repeat for more.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Created at or after (RFC 3339).
        #[arg(long, requires = "to")]
        from: Option<DateTime<Utc>>,
        /// Created at or before (RFC 3339).
        #[arg(long, requires = "from")]
        to: Option<DateTime<Utc>>,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long)]
        json: bool,
    },
    /// Fetch one ticket from the ticket API.
    Ticket {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// List resolved tickets from the ticket API.
    Resolved {
        /// Defaults to `search.resolved_limit`.
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// List the tickets in one category.
    Category {
        category: TicketCategory,
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            helpdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.agent.log_level);

    let Some(command) = cli.command else {
        println!("helpdesk: use --help for available commands");
        return;
    };

    if let Err(e) = run(command, config).await {
        eprintln!("{}: {e}", "error".red().bold());
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<HelpdeskConfig, Vec<helpdesk_config::ConfigError>> {
    match path {
        Some(path) => helpdesk_config::load_and_validate_path(path),
        None => helpdesk_config::load_and_validate(),
    }
}

async fn run(command: Commands, config: HelpdeskConfig) -> Result<(), HelpdeskError> {
    match command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Ask {
            query,
            context,
            json,
        } => {
            let tickets = commands::load_context(&config, context.for_query(&query)).await?;
            commands::run_ask(&config, &query, &tickets, json).await
        }
        Commands::Similar {
            query,
            context,
            json,
        } => {
            let tickets = commands::load_context(&config, context.for_query(&query)).await?;
            commands::run_similar(&config, &query, &tickets, json).await
        }
        Commands::Categorize { content, json } => {
            commands::run_categorize(&config, &content, json).await
        }
        Commands::Solve {
            description,
            context,
            json,
        } => {
            let tickets = commands::load_context(&config, context.for_solutions()).await?;
            commands::run_solve(&config, &description, &tickets, json).await
        }
        Commands::Shell { context } => {
            let tickets = commands::load_context(&config, context.for_solutions()).await?;
            shell::run_shell(&config, tickets).await
        }
        Commands::Search {
            query,
            status,
            priority,
            category,
            tags,
            from,
            to,
            limit,
            offset,
            json,
        } => {
            let filters = SearchFilters {
                status,
                priority,
                category,
                tags,
                date_range: from.zip(to).map(|(from, to)| DateRange { from, to }),
            };
            commands::run_search(&config, &query, &filters, limit, offset, json).await
        }
        Commands::Ticket { id, json } => commands::run_ticket(&config, &id, json).await,
        Commands::Resolved { limit, json } => {
            let limit = limit.unwrap_or(config.search.resolved_limit);
            commands::run_resolved(&config, limit, json).await
        }
        Commands::Category { category, json } => {
            commands::run_category(&config, category, json).await
        }
        Commands::Config => commands::run_config(&config),
    }
}
