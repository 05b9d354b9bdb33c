//! Output module for writing export results
//!
//! This module handles:
//! - Turning enriched stubs into the final result set (filter + sort)
//! - The three CSV layouts and their persistence
//! - The end-of-run summary

mod csv_output;
mod records;
pub mod stats;

pub use csv_output::{read_records, write_records};
pub use records::{CsvRecord, EnrichedRow, RatingRow, WatchlistRow};
pub use stats::{print_summary, ExportSummary};

use crate::model::{ItemStub, RatedTitle};
use crate::Result;
use std::path::Path;

/// Builds the result set from enriched stubs
///
/// Stubs without ratings are dropped; the rest are sorted by rating count,
/// highest first. The sort is stable, so equal counts keep discovery order.
pub fn prepare_result_set(mut stubs: Vec<ItemStub>) -> Vec<ItemStub> {
    stubs.retain(|stub| stub.rating_count > 0);
    stubs.sort_by(|a, b| b.rating_count.cmp(&a.rating_count));
    stubs
}

/// Writes the watchlist result set in the basic or enriched layout
pub fn write_watchlist(path: &Path, result_set: &[ItemStub], enriched: bool) -> Result<usize> {
    if enriched {
        let rows: Vec<EnrichedRow> = result_set.iter().map(EnrichedRow::from).collect();
        write_records(path, &rows)
    } else {
        let rows: Vec<WatchlistRow> = result_set.iter().map(WatchlistRow::from).collect();
        write_records(path, &rows)
    }
}

/// Writes the rating history
pub fn write_ratings(path: &Path, ratings: &[RatedTitle]) -> Result<usize> {
    let rows: Vec<RatingRow> = ratings.iter().map(RatingRow::from).collect();
    write_records(path, &rows)
}
