//! csfd-export main entry point
//!
//! This is the command-line interface for exporting ČSFD ratings and watchlists.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use csfd_export::config::{load_config_with_hash, validate, Config};
use csfd_export::crawler::{export, ExportMode, Progress, ProgressReporter};
use csfd_export::output::print_summary;
use csfd_export::url::Listing;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// csfd-export: export ČSFD ratings and watchlists to CSV
///
/// Logs in with the configured account, walks the rating history or the
/// "Chci vidět" list page by page and writes the result as CSV. Watchlist
/// entries are enriched from their detail pages, filtered to rated titles
/// and sorted by rating count.
#[derive(Parser, Debug)]
#[command(name = "csfd-export")]
#[command(version = "1.0.0")]
#[command(about = "Export ČSFD ratings and watchlists to CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// What to export
    #[arg(value_enum, value_name = "MODE")]
    mode: Mode,

    /// Watchlist only: add English title, genres and plot columns
    #[arg(long)]
    enriched: bool,

    /// Watchlist only: filmType query value (overrides the config)
    #[arg(long, value_name = "N")]
    film_type: Option<u8>,

    /// Stop after this many listing pages (overrides the config)
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Output CSV path (overrides the config)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be exported without logging in
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// The user's rating history
    Ratings,
    /// The logged-in user's want-to-see list
    Watchlist,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let mode = match cli.mode {
        Mode::Ratings => ExportMode::Ratings,
        Mode::Watchlist => ExportMode::Watchlist {
            enriched: cli.enriched,
        },
    };

    apply_cli_overrides(&mut config, &cli, mode);
    validate(&config).context("Invalid configuration after command-line overrides")?;

    if cli.dry_run {
        return handle_dry_run(&config, mode);
    }

    handle_export(config, mode, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries progress and the summary.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("csfd_export=info,warn"),
            1 => EnvFilter::new("csfd_export=debug,info"),
            2 => EnvFilter::new("csfd_export=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli, mode: ExportMode) {
    if let Some(film_type) = cli.film_type {
        config.watchlist.film_type = film_type;
    }

    if cli.max_pages.is_some() {
        config.fetch.max_pages = cli.max_pages;
    }

    if let Some(ref output) = cli.output {
        let output = output.display().to_string();
        match mode {
            ExportMode::Ratings => config.output.ratings_path = output,
            ExportMode::Watchlist { .. } => config.output.watchlist_path = output,
        }
    }
}

/// Handles the --dry-run mode: shows what would be exported
fn handle_dry_run(config: &Config, mode: ExportMode) -> anyhow::Result<()> {
    println!("=== csfd-export Dry Run ===\n");

    println!("Account:");
    println!(
        "  Login: {}",
        if config.account.cookie.is_some() {
            "session cookie"
        } else {
            "browser"
        }
    );
    println!(
        "  Username: {}",
        config.account.username.as_deref().unwrap_or("-")
    );
    println!(
        "  User id: {}",
        config.account.user_id.as_deref().unwrap_or("-")
    );

    println!("\nFetching:");
    println!("  Origin: {}", config.site.origin);
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!(
        "  Retries: {} ({}ms apart)",
        config.fetch.retry_count, config.fetch.retry_delay_ms
    );
    match config.fetch.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unlimited"),
    }

    let listing = match mode {
        ExportMode::Ratings => Listing::Ratings {
            user_id: config
                .account
                .user_id
                .clone()
                .context("ratings export needs [account] user-id or CSFD_USER_ID")?,
        },
        ExportMode::Watchlist { .. } => Listing::Watchlist {
            film_type: config.watchlist.film_type,
        },
    };
    let origin = url::Url::parse(&config.site.origin)?;

    println!("\nExport:");
    println!("  Mode: {}", mode.label());
    if let ExportMode::Watchlist { enriched } = mode {
        println!("  Enriched: {}", enriched);
    }
    println!("  First page: {}", listing.page_url(&origin, 1)?);
    match mode {
        ExportMode::Ratings => println!("  Output: {}", config.output.ratings_path),
        ExportMode::Watchlist { .. } => println!("  Output: {}", config.output.watchlist_path),
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main export operation
async fn handle_export(config: Config, mode: ExportMode, quiet: bool) -> anyhow::Result<()> {
    tracing::info!("Starting {} export from {}", mode.label(), config.site.origin);

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_progress(rx, quiet));

    let result = export(config, mode, ProgressReporter::new(tx)).await;

    // The sender is dropped with the exporter, which ends the printer
    if let Err(e) = printer.await {
        tracing::debug!("Progress printer ended abnormally: {}", e);
    }

    match result {
        Ok(summary) => {
            tracing::info!("Export completed successfully");
            if !quiet {
                println!();
                print_summary(&summary);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            Err(e.into())
        }
    }
}

/// Renders progress events as console lines
async fn print_progress(mut rx: mpsc::UnboundedReceiver<Progress>, quiet: bool) {
    let mut stdout = std::io::stdout();

    while let Some(event) = rx.recv().await {
        if quiet {
            continue;
        }

        match event {
            Progress::PageScraped { page, items } => {
                println!("Page {}: {} titles", page, items);
            }
            Progress::ListingDone { pages, items } => {
                println!("Listing done: {} titles on {} pages", items, pages);
            }
            Progress::Enriched { current, total, .. } => {
                print!("\rProcessed: {} / {} titles", current, total);
                let _ = stdout.flush();
                if current == total {
                    println!();
                }
            }
            Progress::Written { path, records } => {
                println!("Saved {} rows to {}", records, path.display());
            }
        }
    }
}
