//! talk-session - Manage stored editing sessions
//!
//! List, inspect, and delete the sessions held in the local store.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use libtalklog::config::Config;
use libtalklog::db::{Database, Session};
use libtalklog::SessionRepository;
use serde::Serialize;
use tracing::error;

#[derive(Parser)]
#[command(name = "talk-session")]
#[command(version, about = "Manage stored editing sessions")]
#[command(long_about = r#"Manage the editing sessions in the local store.

EXAMPLES:
    # Show the 20 most recently edited sessions (default)
    talk-session list

    # JSON output for scripting
    talk-session list --format json
    talk-session list --format json | jq -r '.[] | .id'

    # Inspect one session's post
    talk-session show 4f1c...

    # Remove a session
    talk-session delete 4f1c...

OUTPUT FORMATS:
    text  - Human-readable (default)
    json  - JSON array
    jsonl - JSON lines, one object per line

EXIT CODES:
    0 - Success (including empty results)
    1 - Error (config, database)
    3 - Session not found
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List stored sessions, most recently updated first
    List {
        /// Maximum number of sessions to return
        #[arg(short, long, default_value = "20", value_name = "N")]
        limit: usize,

        /// Output format
        #[arg(short, long, default_value = "text", value_name = "FORMAT")]
        #[arg(value_parser = ["text", "json", "jsonl"])]
        format: String,
    },
    /// Show one session's post
    Show {
        /// Session id
        id: String,

        /// Output format
        #[arg(short, long, default_value = "text", value_name = "FORMAT")]
        #[arg(value_parser = ["text", "json"])]
        format: String,
    },
    /// Delete a session
    Delete {
        /// Session id
        id: String,
    },
}

/// Listing row, flattened for machine output
#[derive(Debug, Serialize)]
struct SessionSummary {
    id: String,
    title: String,
    blocks: usize,
    tags: Vec<String>,
    created_at: i64,
    updated_at: i64,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            blocks: session.post.content.len(),
            tags: session.post.tags.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

fn format_timestamp(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn print_list(sessions: &[Session], format: &str) -> Result<()> {
    let summaries: Vec<SessionSummary> = sessions.iter().map(SessionSummary::from).collect();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summaries)?),
        "jsonl" => {
            for summary in &summaries {
                println!("{}", serde_json::to_string(summary)?);
            }
        }
        _ => {
            if summaries.is_empty() {
                println!("No sessions.");
                return Ok(());
            }
            for summary in &summaries {
                let title = if summary.title.is_empty() {
                    "(untitled)"
                } else {
                    summary.title.as_str()
                };
                println!(
                    "{}  {}  {} block(s)  {}",
                    summary.id,
                    format_timestamp(summary.updated_at),
                    summary.blocks,
                    title,
                );
            }
        }
    }
    Ok(())
}

fn print_session(session: &Session, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&session.post)?);
        return Ok(());
    }

    println!("Session:  {}", session.id);
    println!("Updated:  {}", format_timestamp(session.updated_at));
    let title = if session.post.title.is_empty() {
        "(untitled)"
    } else {
        session.post.title.as_str()
    };
    println!("Title:    {}", title);
    if !session.post.tags.is_empty() {
        let tags: Vec<String> = session.post.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("Tags:     {}", tags.join(" "));
    }
    println!();
    for block in &session.post.content {
        println!("[{}] {}", block.kind, block.value);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    libtalklog::logging::init_with_verbosity(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    let db = Database::new(&config.database.path)
        .await
        .context("Failed to initialize database")?;

    match cli.command {
        Command::List { limit, format } => {
            let sessions = db.list_sessions(limit).await?;
            print_list(&sessions, &format)?;
        }
        Command::Show { id, format } => match db.get_session(&id).await? {
            Some(session) => print_session(&session, &format)?,
            None => {
                error!("Session not found: {}", id);
                std::process::exit(3);
            }
        },
        Command::Delete { id } => {
            let mut repo = SessionRepository::new(Arc::new(db));
            if let Err(e) = repo.delete(&id).await {
                error!("{}", e);
                std::process::exit(e.exit_code());
            }
            println!("Deleted session {}", id);
        }
    }

    Ok(())
}
