//! CLI binary for icr-extract.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig`, uploads the document and prints the page.

use anyhow::{Context, Result};
use clap::Parser;
use icr_extract::{
    extract, render_saved, write_page, ExtractionConfig, ExtractionOutcome, UploadSource,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit code when the extraction API answered with a non-200 status.
const EXIT_UPSTREAM_ERROR: u8 = 2;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

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
  # Upload and print the HTML page (stdout)
  icr invoice.pdf

  # Write the page to a file
  icr invoice.pdf -o invoice.html

  # Use another extraction endpoint, give up after 60s
  icr --endpoint http://localhost:8080/auto_extraction --timeout 60 invoice.pdf

  # Re-render a response saved earlier (no upload)
  icr --from-json response.json -o invoice.html

  # Structured output: decoded response, padded table, stats
  icr --json invoice.pdf > invoice.json

EXIT STATUS:
  0  page rendered
  1  failure (unreadable file, network error, malformed response, …)
  2  the extraction API answered with a non-200 status; its text was printed

ENVIRONMENT VARIABLES:
  ICR_ENDPOINT   Extraction API URL
  ICR_TIMEOUT    Request timeout in seconds (unset = wait forever)
  ICR_OUTPUT     Output file
  RUST_LOG       Log filter, e.g. icr_extract=debug
"#;

/// Upload an invoice PDF to the extraction API and render the result as HTML.
#[derive(Parser, Debug)]
#[command(
    name = "icr",
    version,
    about = "Upload an invoice PDF to the extraction API and render the result as HTML",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path of the PDF to upload.
    #[arg(required_unless_present = "from_json")]
    input: Option<PathBuf>,

    /// Render a saved API response (JSON body) instead of uploading.
    #[arg(long, value_name = "FILE", conflicts_with = "input")]
    from_json: Option<PathBuf>,

    /// Write the page to this file instead of stdout.
    #[arg(short, long, env = "ICR_OUTPUT")]
    output: Option<PathBuf>,

    /// Extraction API endpoint.
    #[arg(long, env = "ICR_ENDPOINT", default_value = icr_extract::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[arg(long, env = "ICR_TIMEOUT",
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Page title shown under the logo.
    #[arg(long, env = "ICR_TITLE")]
    title: Option<String>,

    /// Do not make the table editable in the browser.
    #[arg(long)]
    no_editable: bool,

    /// Output structured JSON (ExtractionOutput) instead of HTML.
    #[arg(long, env = "ICR_JSON")]
    json: bool,

    /// Disable the upload spinner.
    #[arg(long, env = "ICR_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "ICR_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "ICR_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers the upload; INFO logs would tear it.
    let show_progress = !cli.quiet && !cli.no_progress && cli.from_json.is_none();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    // ── Obtain the outcome ───────────────────────────────────────────────
    let outcome = if let Some(ref saved) = cli.from_json {
        let body = tokio::fs::read_to_string(saved)
            .await
            .with_context(|| format!("Failed to read saved response {:?}", saved))?;
        let output = render_saved(&body, &config.render).context("Failed to render response")?;
        ExtractionOutcome::Rendered(Box::new(output))
    } else {
        let input = cli
            .input
            .as_deref()
            .context("No input PDF given")?;
        let spinner = show_progress.then(|| upload_spinner(input));
        let result = extract(&UploadSource::new(input), &config).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }
        result.context("Extraction failed")?
    };

    // ── Emit ─────────────────────────────────────────────────────────────
    let text = if cli.json {
        match &outcome {
            ExtractionOutcome::Rendered(output) => {
                serde_json::to_string_pretty(output).context("Failed to serialise output")?
            }
            ExtractionOutcome::UpstreamError { .. } => outcome.page_text(),
        }
    } else {
        outcome.page_text()
    };

    if let Some(ref path) = cli.output {
        write_page(path, &text)
            .await
            .context("Failed to write output")?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
        if !text.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    // ── Summary ──────────────────────────────────────────────────────────
    match &outcome {
        ExtractionOutcome::Rendered(output) => {
            if !cli.quiet {
                let s = &output.stats;
                let target = cli
                    .output
                    .as_ref()
                    .map(|p| format!("  →  {}", bold(&p.display().to_string())))
                    .unwrap_or_default();
                eprintln!(
                    "{}  {} fields, {}×{} table{}",
                    green("✔"),
                    s.fields,
                    s.columns,
                    s.rows,
                    target
                );
                eprintln!(
                    "   {}",
                    dim(&format!(
                        "{} bytes up / {} bytes down  —  {}ms request, {} padded cells",
                        s.upload_bytes, s.response_bytes, s.request_ms, s.padded_cells
                    ))
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        ExtractionOutcome::UpstreamError { status, .. } => {
            if !cli.quiet {
                eprintln!(
                    "{} extraction API answered {}",
                    red("✘"),
                    bold(&status.to_string())
                );
            }
            Ok(ExitCode::from(EXIT_UPSTREAM_ERROR))
        }
    }
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .endpoint(cli.endpoint.clone())
        .editable_table(!cli.no_editable);

    if let Some(secs) = cli.timeout {
        builder = builder.timeout_secs(secs);
    }
    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }

    builder.build().context("Invalid configuration")
}

fn upload_spinner(input: &Path) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Extracting");
    bar.set_message(input.display().to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
