use url::Url;

/// Separator used when genres are rendered as one column
pub const GENRE_SEPARATOR: &str = " / ";

/// A watchlist entry discovered on a listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStub {
    /// Original title as shown on the listing
    pub title: String,

    /// Release year, or [`crate::model::YEAR_UNKNOWN`]
    pub year: String,

    /// Absolute URL of the title's detail page
    pub detail_link: Url,

    /// Number of user ratings; zero until enriched
    pub rating_count: u64,

    /// English title, set by enrichment
    pub english_title: Option<String>,

    /// Genres in page order, set by enrichment
    pub genres: Option<Vec<String>>,

    /// Synopsis with collapsed whitespace, set by enrichment
    pub plot: Option<String>,
}

impl ItemStub {
    /// Creates an unenriched stub
    pub fn new(title: impl Into<String>, year: impl Into<String>, detail_link: Url) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            detail_link,
            rating_count: 0,
            english_title: None,
            genres: None,
            plot: None,
        }
    }

    /// Merges the fields extracted from the detail page into the stub
    pub fn enrich(&mut self, details: DetailFields) {
        self.rating_count = details.rating_count;
        self.english_title = Some(details.english_title);
        self.genres = Some(details.genres);
        self.plot = Some(details.plot);
    }

    /// Returns true once [`ItemStub::enrich`] has run
    pub fn is_enriched(&self) -> bool {
        self.genres.is_some()
    }

    /// Genres joined with `" / "`, empty when none are known
    pub fn genres_joined(&self) -> String {
        self.genres
            .as_deref()
            .map(|g| g.join(GENRE_SEPARATOR))
            .unwrap_or_default()
    }
}

/// Fields extracted from a detail page
///
/// The default value is what a record degrades to when the page could not
/// be fetched at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub rating_count: u64,
    pub english_title: String,
    pub genres: Vec<String>,
    pub plot: String,
}
