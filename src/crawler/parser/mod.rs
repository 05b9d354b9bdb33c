//! HTML extraction for listing and detail pages
//!
//! Every extractor degrades instead of failing: a missing element yields an
//! empty list or the field's default, never an error.

mod detail;
mod listing;

pub use detail::{
    extract_details, EnglishTitleField, FieldExtractor, GenresField, PlotField, RatingCountField,
};
pub use listing::{extract_ratings, extract_stubs, extract_year, parse_stars};

use scraper::{ElementRef, Selector};

/// Parses a hardcoded CSS selector
fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Text content of an element with runs of whitespace collapsed to one space
fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
