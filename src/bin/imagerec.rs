//! CLI binary for imagerec.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ClientConfig`, runs one query (or an interactive session), and prints
//! results.

use anyhow::{bail, Context, Result};
use clap::Parser;
use imagerec::{
    recommend, ClientConfig, Document, ImageMode, QueryInput, Recommendation, RecommendClient,
    SessionHistory,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Query with typed text (stock images)
  imagerec --api-url http://localhost:8000 "a lighthouse at dusk"

  # AI-generated images instead
  imagerec --mode ai "a lighthouse at dusk"

  # Extract the query text from a document (txt, docx, pdf)
  imagerec --file report.pdf

  # Check the service without querying
  imagerec --status-only

  # Interactive session with history
  imagerec -i

  # Raw JSON result
  imagerec --json "winter forest"

INTERACTIVE COMMANDS:
  :status          probe the service
  :mode ai|stock   switch recommendation mode
  :load <path>     query with a document's extracted text
  :history         show this session's past recommendations
  :quit            leave

ENVIRONMENT VARIABLES:
  IMAGEREC_API_URL   Base URL of the recommendation service (required
                     unless --api-url is passed)
  IMAGEREC_TIMEOUT   Per-request timeout in seconds (default 30)
"#;

/// Get image recommendations for text, typed or extracted from documents.
#[derive(Parser, Debug)]
#[command(
    name = "imagerec",
    version,
    about = "Get image recommendations for text, typed or extracted from documents",
    long_about = "Send text to a recommendation service and display the image references it \
returns. The query text is typed directly or extracted from a plain-text, DOCX, or PDF \
document. Each successful query is kept in a session history.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Query text. Omit when using --file, --interactive, or --status-only.
    text: Option<String>,

    /// Extract the query text from this document (txt, docx, pdf).
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Base URL of the recommendation service.
    #[arg(long, env = "IMAGEREC_API_URL")]
    api_url: String,

    /// Recommendation mode: ai or stock.
    #[arg(long, value_enum, default_value = "ai")]
    mode: ModeArg,

    /// Per-request timeout in seconds.
    #[arg(long, env = "IMAGEREC_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Print the result as JSON instead of a reference list.
    #[arg(long)]
    json: bool,

    /// Probe the service status and exit.
    #[arg(long)]
    status_only: bool,

    /// Interactive session: query repeatedly, keep a history.
    #[arg(short, long)]
    interactive: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Ai,
    Stock,
}

impl From<ModeArg> for ImageMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Ai => ImageMode::Ai,
            ModeArg::Stock => ImageMode::Stock,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build client ─────────────────────────────────────────────────────
    let config = ClientConfig::builder()
        .base_url(&cli.api_url)
        .api_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;
    let client = RecommendClient::new(config).context("Failed to build HTTP client")?;

    // ── Status-only mode ─────────────────────────────────────────────────
    if cli.status_only {
        let status = client.check_status().await;
        println!("API Status: {status}");
        return Ok(());
    }

    let mode = ImageMode::from(cli.mode);
    let mut history = SessionHistory::new();

    // ── Interactive session ──────────────────────────────────────────────
    if cli.interactive {
        return run_session(&client, mode, &mut history).await;
    }

    // ── One-shot query ───────────────────────────────────────────────────
    let input = if let Some(ref path) = cli.file {
        QueryInput::Document(Document::from_path(path)?)
    } else if let Some(text) = cli.text.clone() {
        QueryInput::Text(text)
    } else {
        bail!("Provide query text, --file, --interactive, or --status-only");
    };

    let result = recommend(input, mode, &client, &mut history)
        .await
        .context("Recommendation failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialise result")?
        );
    } else {
        print_result(&result);
    }

    Ok(())
}

/// Read-eval loop: each line is a query, `:`-prefixed lines are commands.
///
/// Every error is printed and the loop continues; nothing here is fatal,
/// the user just tries again.
async fn run_session(
    client: &RecommendClient,
    mut mode: ImageMode,
    history: &mut SessionHistory,
) -> Result<()> {
    let status = client.check_status().await;
    println!("Connected to {}", bold(client.base_url()));
    println!("API Status: {status}");
    println!("Mode: {mode}  {}", dim("(switch with :mode ai|stock)"));
    println!("Type text to get recommendations, :help for commands.\n");

    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).context("Failed to read stdin")? == 0 {
            break; // EOF
        }
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":q" | ":exit" => break,
            ":help" => {
                println!(":status          probe the service");
                println!(":mode ai|stock   switch recommendation mode");
                println!(":load <path>     query with a document's extracted text");
                println!(":history         show past recommendations");
                println!(":quit            leave");
            }
            ":status" => {
                let status = client.check_status().await;
                println!("API Status: {status}");
            }
            ":mode" => println!("Mode: {mode}"),
            ":mode ai" => {
                mode = ImageMode::Ai;
                println!("Mode: {mode}");
            }
            ":mode stock" => {
                mode = ImageMode::Stock;
                println!("Mode: {mode}");
            }
            ":history" => print_history(history),
            _ if line.starts_with(":load ") => {
                let path = line[":load ".len()..].trim();
                match Document::from_path(path) {
                    Ok(doc) => submit(QueryInput::Document(doc), mode, client, history).await,
                    Err(e) => eprintln!("{} {e}", red("error:")),
                }
            }
            _ if line.starts_with(':') => {
                eprintln!("{} unknown command '{line}', try :help", red("error:"));
            }
            text => submit(QueryInput::Text(text.to_owned()), mode, client, history).await,
        }
    }

    Ok(())
}

/// Run one query and report the outcome; errors never end the session.
async fn submit(
    input: QueryInput,
    mode: ImageMode,
    client: &RecommendClient,
    history: &mut SessionHistory,
) {
    match recommend(input, mode, client, history).await {
        Ok(result) => print_result(&result),
        Err(e) => eprintln!("{} {e}", red("error:")),
    }
}

/// Print the image references of one result, or the raw payload when the
/// service sent something that is not a plain list.
fn print_result(result: &Recommendation) {
    match result.image_refs() {
        Some(refs) if !refs.is_empty() => {
            println!("{}", bold(&format!("Recommended {}:", result.mode)));
            for r in refs {
                println!("  {} {r}", green("•"));
            }
        }
        _ => println!("{}", result.images),
    }
}

/// Render the session history, oldest first.
fn print_history(history: &SessionHistory) {
    if history.is_empty() {
        println!("No history available yet.");
        return;
    }
    for entry in history.iter() {
        println!(
            "{} {}",
            bold("Timestamp:"),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        println!("{} {}", bold("Text:"), entry.query);
        match entry.image_refs() {
            Some(refs) if !refs.is_empty() => {
                println!("{} {}", bold(&format!("{}:", entry.mode)), refs.join(", "))
            }
            _ => println!("{} {}", bold("Payload:"), entry.images),
        }
        println!("{}", dim("---"));
    }
}
