use crate::crawler::parser::{collapsed_text, selector};
use crate::model::DetailFields;
use scraper::Html;

/// One field of a detail page
///
/// Each field is extracted on its own; a miss falls back to the field's
/// default without affecting the others.
pub trait FieldExtractor {
    type Output: Default;

    /// Returns the field value, or None when the markup is absent
    fn extract(&self, document: &Html) -> Option<Self::Output>;

    fn extract_or_default(&self, document: &Html) -> Self::Output {
        self.extract(document).unwrap_or_default()
    }
}

/// Number of ratings: `li.tab-nav-item.ratings-btn.active span.counter`
///
/// Every non-digit is dropped before parsing, so `"1 234 hodnocení"` is 1234.
pub struct RatingCountField;

impl FieldExtractor for RatingCountField {
    type Output = u64;

    fn extract(&self, document: &Html) -> Option<u64> {
        let counter = selector("li.tab-nav-item.ratings-btn.active span.counter")?;
        let text: String = document.select(&counter).next()?.text().collect();
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}

/// English title: first `ul.names li[title]`
pub struct EnglishTitleField;

impl FieldExtractor for EnglishTitleField {
    type Output = String;

    fn extract(&self, document: &Html) -> Option<String> {
        let names = selector("ul.names li[title]")?;
        document.select(&names).next().map(collapsed_text)
    }
}

/// Genres: anchor texts inside `div.genres`
pub struct GenresField;

impl FieldExtractor for GenresField {
    type Output = Vec<String>;

    fn extract(&self, document: &Html) -> Option<Vec<String>> {
        let block = selector("div.genres")?;
        let anchor = selector("a")?;

        let genres = document
            .select(&block)
            .next()?
            .select(&anchor)
            .map(collapsed_text)
            .filter(|genre| !genre.is_empty())
            .collect();

        Some(genres)
    }
}

/// Synopsis: text of `div.plot-full` with whitespace collapsed
pub struct PlotField;

impl FieldExtractor for PlotField {
    type Output = String;

    fn extract(&self, document: &Html) -> Option<String> {
        let plot = selector("div.plot-full")?;
        document.select(&plot).next().map(collapsed_text)
    }
}

/// Extracts all enrichment fields from a detail page
///
/// Never fails: absent markup yields 0 or an empty value per field.
pub fn extract_details(html: &str) -> DetailFields {
    let document = Html::parse_document(html);

    DetailFields {
        rating_count: RatingCountField.extract_or_default(&document),
        english_title: EnglishTitleField.extract_or_default(&document),
        genres: GenresField.extract_or_default(&document),
        plot: PlotField.extract_or_default(&document),
    }
}
