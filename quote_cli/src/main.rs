//! # Quotation CLI
//!
//! Command-line front end for the quotation engine.
//!
//! ```text
//! quote_cli calc   request.json                 # price the request, print JSON
//! quote_cli render request.json --out-dir out   # write Quotation-<no>.pdf
//! quote_cli layout request.json [--out-dir out] # recorded draw operations as JSON
//! ```
//!
//! Settings come from `--config`, else the `QUOTE_SETTINGS` environment
//! variable, else built-in defaults. Log verbosity follows `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use quote_core::canvas::{Canvas, RecordingCanvas, TypstCanvas};
use quote_core::composer::{compose_quote, export_quote};
use quote_core::format::format_currency;
use quote_core::{finalize_quote, load_request, QuoteError, QuoteSettings, SavedQuote};

/// Environment variable naming a settings file
const SETTINGS_ENV: &str = "QUOTE_SETTINGS";

#[derive(Parser)]
#[command(name = "quote_cli", version, about = "Freight quotation calculator and document generator")]
struct Cli {
    /// Settings file (TOML). Overrides $QUOTE_SETTINGS.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a quote request and print the saved quote as JSON
    Calc {
        /// Quote request JSON file
        request: PathBuf,
    },
    /// Render the quotation as a PDF
    Render {
        /// Quote request JSON file
        request: PathBuf,
        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Record the page layout as JSON draw operations
    Layout {
        /// Quote request JSON file
        request: PathBuf,
        /// Write Quotation-<no>.json here instead of printing to stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(quote_error) = e.downcast_ref::<QuoteError>() {
                if let Ok(json) = serde_json::to_string_pretty(quote_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Calc { request } => {
            let quote = price(&request, &settings)?;
            print_summary(&quote, &settings);
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Commands::Render { request, out_dir } => {
            let quote = price(&request, &settings)?;
            let mut canvas = TypstCanvas::a4();
            let path = export_quote(&quote, &settings, &mut canvas, &out_dir)
                .with_context(|| format!("rendering quote {}", quote.quote_no))?;
            println!("{}", path.display());
        }
        Commands::Layout { request, out_dir } => {
            let quote = price(&request, &settings)?;
            let mut canvas = RecordingCanvas::default();
            match out_dir {
                Some(dir) => {
                    let path = export_quote(&quote, &settings, &mut canvas, &dir)
                        .with_context(|| format!("recording layout of quote {}", quote.quote_no))?;
                    println!("{}", path.display());
                }
                None => {
                    let layout = compose_quote(&quote, &settings, &mut canvas)?;
                    debug!(?layout, "layout computed");
                    let bytes = canvas.finish()?;
                    println!("{}", String::from_utf8_lossy(&bytes));
                }
            }
        }
    }

    Ok(())
}

/// `--config`, then `$QUOTE_SETTINGS`, then defaults.
fn load_settings(flag: Option<&Path>) -> Result<QuoteSettings> {
    let from_env = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
    let path = flag.map(Path::to_path_buf).or(from_env);

    match &path {
        Some(p) => info!(path = %p.display(), "loading settings"),
        None => debug!("no settings file, using defaults"),
    }

    QuoteSettings::load_or_default(path.as_deref()).context("loading settings")
}

fn price(request_path: &Path, settings: &QuoteSettings) -> Result<SavedQuote> {
    let request = load_request(request_path)
        .with_context(|| format!("reading request {}", request_path.display()))?;
    let quote = finalize_quote(&request, settings)
        .with_context(|| format!("pricing quote {}", request.quote_no))?;
    Ok(quote)
}

fn print_summary(quote: &SavedQuote, settings: &QuoteSettings) {
    let currency = settings.currency.as_str();

    eprintln!("═══════════════════════════════════════");
    eprintln!("  QUOTATION {}", quote.quote_no);
    eprintln!("═══════════════════════════════════════");
    eprintln!("  Issued:      {}", quote.issue_date);
    eprintln!("  Valid until: {}", quote.valid_until);
    eprintln!();
    for item in &quote.items {
        eprintln!(
            "  #{:<3} {:<20} billed {:>8.2} kg  {}",
            item.item_number,
            item.description,
            item.billed_weight_kg,
            format_currency(item.line_total, currency)
        );
    }
    eprintln!();
    eprintln!("  Subtotal:    {}", format_currency(quote.totals.subtotal, currency));
    for adjustment in &quote.totals.adjustments {
        eprintln!("  {}: {}", adjustment.label, format_currency(adjustment.amount, currency));
    }
    eprintln!("  Grand total: {}", format_currency(quote.totals.grand_total, currency));
    eprintln!("═══════════════════════════════════════");
}
