//! Run summary
//!
//! Counts gathered while exporting, printed once the CSV is written.

use std::path::PathBuf;
use std::time::Duration;

/// Export run summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    /// "ratings" or "watchlist"
    pub mode: &'static str,

    /// Listing pages accepted
    pub pages: u32,

    /// Records found across all listing pages
    pub listed: usize,

    /// Detail pages fetched successfully
    pub enriched: usize,

    /// Detail pages that could not be fetched and were zeroed
    pub degraded: usize,

    /// Watchlist records dropped for having no ratings
    pub dropped_unrated: usize,

    /// Rows written to the CSV
    pub written: usize,

    pub output_path: PathBuf,

    pub elapsed: Duration,
}

impl ExportSummary {
    /// Share of detail pages fetched successfully, as a percentage
    pub fn enrichment_rate(&self) -> f64 {
        let attempted = self.enriched + self.degraded;
        if attempted == 0 {
            return 0.0;
        }
        (self.enriched as f64 / attempted as f64) * 100.0
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &ExportSummary) {
    println!("=== Export Summary ({}) ===\n", summary.mode);

    println!("Listing:");
    println!("  Pages read: {}", summary.pages);
    println!("  Records found: {}", summary.listed);
    println!();

    if summary.enriched + summary.degraded > 0 {
        println!("Detail pages:");
        println!("  Fetched: {}", summary.enriched);
        println!("  Failed (zeroed): {}", summary.degraded);
        println!("  Success rate: {:.1}%", summary.enrichment_rate());
        println!("  Dropped without ratings: {}", summary.dropped_unrated);
        println!();
    }

    println!(
        "Wrote {} rows to {} in {:.1}s",
        summary.written,
        summary.output_path.display(),
        summary.elapsed.as_secs_f64()
    );
}
