//! talk-export - Export a session's post for publishing
//!
//! Emits the clipboard-ready HTML fragment or the plain-text fallback for
//! a stored session, for pasting into an external blog editor.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use libtalklog::config::Config;
use libtalklog::db::Database;
use libtalklog::export;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "talk-export")]
#[command(version, about = "Export a session's post as HTML or plain text")]
#[command(long_about = r#"Export a stored session's post for publishing.

EXAMPLES:
    # Print the HTML fragment for a session
    talk-export --session 4f1c... --format html

    # Plain-text fallback
    talk-export --session 4f1c... --format text

    # Write to a file instead of stdout
    talk-export --session 4f1c... --format html --output draft.html

EXIT CODES:
    0 - Success
    1 - Error (config, database)
    3 - Session not found
"#)]
struct Cli {
    /// Session id to export
    #[arg(short, long, value_name = "ID")]
    session: String,

    /// Export format (default: export.default_format from config)
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// Rich-text HTML fragment
    Html,
    /// Plain-text fallback
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "text" => Ok(ExportFormat::Text),
            _ => Err(format!(
                "Invalid export format: '{}'. Valid options: html, text",
                s
            )),
        }
    }
}

/// The --format flag wins; otherwise fall back to the configured default
fn resolve_format(flag: Option<ExportFormat>, config: &Config) -> Result<ExportFormat> {
    match flag {
        Some(format) => Ok(format),
        None => config
            .export
            .default_format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("Invalid export.default_format in config"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    libtalklog::logging::init_with_verbosity(cli.verbose);

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize database
    let db = Database::new(&config.database.path)
        .await
        .context("Failed to initialize database")?;

    let session = match db.get_session(&cli.session).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            error!("Session not found: {}", cli.session);
            std::process::exit(3);
        }
        Err(e) => {
            error!("Failed to load session: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let rendered = match resolve_format(cli.format, &config)? {
        ExportFormat::Html => export::render_html(&session.post),
        ExportFormat::Text => export::render_text(&session.post),
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path))?;
            info!("Exported session {} to {}", session.id, path);
        }
        None => {
            println!("{}", rendered);
        }
    }

    Ok(())
}
