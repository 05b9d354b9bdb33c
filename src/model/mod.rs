//! Domain records produced by the scraper
//!
//! - `ItemStub`: a watchlist entry, enriched once from its detail page
//! - `DetailFields`: the enrichment extracted from a detail page
//! - `RatedTitle`: one row of the user's rating history

mod item;
mod rating;

pub use item::{DetailFields, ItemStub, GENRE_SEPARATOR};
pub use rating::RatedTitle;

/// Year placeholder used when a listing row carries no 4-digit year
pub const YEAR_UNKNOWN: &str = "N/A";

/// A record found on a listing page
///
/// Pagination compares the ordered titles of consecutive pages to detect
/// a site that repeats its last page instead of returning an empty one.
pub trait Listed {
    fn title(&self) -> &str;
}

impl Listed for ItemStub {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Listed for RatedTitle {
    fn title(&self) -> &str {
        &self.title
    }
}
