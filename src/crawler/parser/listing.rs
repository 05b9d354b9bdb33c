use crate::crawler::parser::{collapsed_text, selector};
use crate::model::{ItemStub, RatedTitle, YEAR_UNKNOWN};
use crate::url::resolve_link;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use url::Url;

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("hardcoded regex pattern is valid"));

static TRAILING_DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)$").expect("hardcoded regex pattern is valid"));

const STUB_ANCHOR: &str = "h3.film-title-nooverflow a.film-title-name";
const STUB_INFO: &str = "span.film-title-info";

/// Extracts the watchlist entries of one listing page
///
/// # Extraction Rules
///
/// - Rows: `h3.film-title-nooverflow a.film-title-name`, in document order
/// - Title: trimmed anchor text
/// - Year: first 4-digit run in the first `span.film-title-info` after the
///   anchor, `"N/A"` when there is none
/// - Detail link: anchor `href` resolved against `origin`; rows whose link
///   cannot be resolved are skipped
///
/// An empty result means the listing is exhausted.
///
/// # Example
///
/// ```
/// use csfd_export::crawler::extract_stubs;
/// use url::Url;
///
/// let html = r#"<h3 class="film-title-nooverflow"><a class="film-title-name" href="/film/1/">Kolja</a></h3>
///               <span class="film-title-info"><span class="info">(1996)</span></span>"#;
/// let origin = Url::parse("https://www.csfd.cz").unwrap();
/// let stubs = extract_stubs(html, &origin);
/// assert_eq!(stubs[0].title, "Kolja");
/// assert_eq!(stubs[0].year, "1996");
/// ```
pub fn extract_stubs(html: &str, origin: &Url) -> Vec<ItemStub> {
    let document = Html::parse_document(html);

    let (Some(anchor_selector), Some(info_selector)) = (selector(STUB_ANCHOR), selector(STUB_INFO))
    else {
        return Vec::new();
    };

    // Elements in document order, so "the next info span" can be looked up by position
    let elements: Vec<ElementRef<'_>> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect();

    let info_positions: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, element)| info_selector.matches(element))
        .map(|(position, _)| position)
        .collect();

    let mut stubs = Vec::new();

    for (position, anchor) in elements.iter().enumerate() {
        if !anchor_selector.matches(anchor) {
            continue;
        }

        let title = anchor.text().collect::<String>().trim().to_string();

        let Some(detail_link) = anchor
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, origin))
        else {
            tracing::debug!("Skipping '{}': no usable detail link", title);
            continue;
        };

        let next_info = info_positions.partition_point(|&p| p <= position);
        let year = info_positions
            .get(next_info)
            .map(|&p| extract_year(&collapsed_text(elements[p])))
            .unwrap_or_else(|| YEAR_UNKNOWN.to_string());

        stubs.push(ItemStub::new(title, year, detail_link));
    }

    stubs
}

/// Extracts the rows of one rating-history page
///
/// A row is a `tr` holding both `.film-title-name` and `.stars`. The year
/// comes from `.film-title-info .info`; the stars from the trailing digits of
/// the last class of `.stars` (`stars-4` is four stars).
pub fn extract_ratings(html: &str) -> Vec<RatedTitle> {
    let document = Html::parse_document(html);

    let (Some(row_selector), Some(title_selector), Some(year_selector), Some(stars_selector)) = (
        selector("tr"),
        selector(".film-title-name"),
        selector(".film-title-info .info"),
        selector(".stars"),
    ) else {
        return Vec::new();
    };

    let mut ratings = Vec::new();

    for row in document.select(&row_selector) {
        let (Some(title_tag), Some(stars_tag)) = (
            row.select(&title_selector).next(),
            row.select(&stars_selector).next(),
        ) else {
            continue;
        };

        let title = title_tag.text().collect::<String>().trim().to_string();
        let year = row
            .select(&year_selector)
            .next()
            .map(|tag| extract_year(&collapsed_text(tag)))
            .unwrap_or_else(|| YEAR_UNKNOWN.to_string());
        let stars = parse_stars(stars_tag.value().attr("class").unwrap_or(""));

        ratings.push(RatedTitle::new(title, year, stars));
    }

    ratings
}

/// Returns the first 4-digit run in `text`, or `"N/A"`
pub fn extract_year(text: &str) -> String {
    YEAR_REGEX
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| YEAR_UNKNOWN.to_string())
}

/// Star count from a class attribute such as `"star-rating stars stars-4"`
///
/// Uses the trailing digits of the last class token, capped at 5. Tokens
/// without digits (e.g. the "trash" rating) count as 0.
pub fn parse_stars(class_attr: &str) -> u8 {
    class_attr
        .split_whitespace()
        .last()
        .and_then(|token| TRAILING_DIGITS_REGEX.captures(token))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .map(|stars| stars.min(5))
        .unwrap_or(0)
}
