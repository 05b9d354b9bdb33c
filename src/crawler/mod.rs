//! Crawler module for listing traversal and enrichment
//!
//! This module contains the scrape-and-enrich pipeline, including:
//! - HTTP fetching with courtesy delay and retry logic
//! - HTML extraction for listing and detail pages
//! - The pagination state machine
//! - Overall export coordination

mod coordinator;
mod fetcher;
mod pagination;
mod parser;
mod progress;

pub use coordinator::{ExportMode, Exporter};
pub use fetcher::{FetchResult, PageFetcher, RequestKind};
pub use pagination::{
    should_stop, HttpListing, ListingSource, PaginationOutcome, PaginationState, Paginator,
    StopReason,
};
pub use parser::{
    extract_details, extract_ratings, extract_stubs, extract_year, parse_stars,
    EnglishTitleField, FieldExtractor, GenresField, PlotField, RatingCountField,
};
pub use progress::{Progress, ProgressReporter};

use crate::config::Config;
use crate::output::ExportSummary;
use crate::session::provider_for;
use crate::Result;

/// Runs a complete export with the provider the configuration selects
///
/// This is the main entry point. It will:
/// 1. Log in (browser or cookie)
/// 2. Walk the listing pages
/// 3. Enrich watchlist entries
/// 4. Write the CSV
///
/// # Example
///
/// ```no_run
/// use csfd_export::config::load_config;
/// use csfd_export::crawler::{export, ExportMode, ProgressReporter};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let summary = export(config, ExportMode::Watchlist { enriched: true }, ProgressReporter::silent()).await?;
/// println!("{} rows", summary.written);
/// # Ok(())
/// # }
/// ```
pub async fn export(
    config: Config,
    mode: ExportMode,
    progress: ProgressReporter,
) -> Result<ExportSummary> {
    let provider = provider_for(&config);
    let exporter = Exporter::new(config).with_progress(progress);
    exporter.run(provider.as_ref(), mode).await
}
