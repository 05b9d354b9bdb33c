//! Row shapes of the three CSV layouts
//!
//! The detail link is never part of a row.

use crate::model::{ItemStub, RatedTitle};
use serde::{Deserialize, Serialize};

/// A row type with a fixed header
///
/// Headers are written explicitly so an empty result still gets one.
pub trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

/// Ratings mode: `title,year,rating`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRow {
    pub title: String,
    pub year: String,
    pub rating: String,
}

impl CsvRecord for RatingRow {
    const HEADERS: &'static [&'static str] = &["title", "year", "rating"];
}

impl From<&RatedTitle> for RatingRow {
    fn from(rated: &RatedTitle) -> Self {
        Self {
            title: rated.title.clone(),
            year: rated.year.clone(),
            rating: rated.rating(),
        }
    }
}

/// Basic watchlist mode: `title,year,totalRatings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistRow {
    pub title: String,
    pub year: String,
    #[serde(rename = "totalRatings")]
    pub total_ratings: u64,
}

impl CsvRecord for WatchlistRow {
    const HEADERS: &'static [&'static str] = &["title", "year", "totalRatings"];
}

impl From<&ItemStub> for WatchlistRow {
    fn from(stub: &ItemStub) -> Self {
        Self {
            title: stub.title.clone(),
            year: stub.year.clone(),
            total_ratings: stub.rating_count,
        }
    }
}

/// Enriched watchlist mode: `title,englishTitle,year,totalRatings,genres,plot`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub title: String,
    #[serde(rename = "englishTitle")]
    pub english_title: String,
    pub year: String,
    #[serde(rename = "totalRatings")]
    pub total_ratings: u64,
    pub genres: String,
    pub plot: String,
}

impl CsvRecord for EnrichedRow {
    const HEADERS: &'static [&'static str] = &[
        "title",
        "englishTitle",
        "year",
        "totalRatings",
        "genres",
        "plot",
    ];
}

impl From<&ItemStub> for EnrichedRow {
    fn from(stub: &ItemStub) -> Self {
        Self {
            title: stub.title.clone(),
            english_title: stub.english_title.clone().unwrap_or_default(),
            year: stub.year.clone(),
            total_ratings: stub.rating_count,
            genres: stub.genres_joined(),
            plot: stub.plot.clone().unwrap_or_default(),
        }
    }
}
