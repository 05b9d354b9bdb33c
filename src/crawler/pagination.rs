//! Pagination driver for listing pages
//!
//! Traversal is an explicit state machine:
//!
//! ```text
//! Fetching(n) ──body──▶ Extracting(n) ──items──▶ Deciding(n) ──new titles──▶ Fetching(n+1)
//!      │                                              │
//!      └── fetch failed / page cap ──▶ Done ◀── empty page / same titles as page n-1
//! ```
//!
//! The site sometimes repeats its last page instead of serving an empty one,
//! so a page whose ordered titles equal the previous page's also ends the
//! traversal.

use crate::crawler::fetcher::{PageFetcher, RequestKind};
use crate::crawler::progress::{Progress, ProgressReporter};
use crate::model::Listed;
use crate::url::Listing;
use async_trait::async_trait;
use url::Url;

/// Supplies listing pages to the driver
#[async_trait]
pub trait ListingSource: Send + Sync {
    type Item: Listed + Send;

    /// Returns the body of page `page`, or None once fetching gave up
    async fn fetch_page(&self, page: u32) -> Option<String>;

    /// Extracts the records of one page, in document order
    fn extract(&self, body: &str) -> Vec<Self::Item>;
}

/// Listing pages fetched over HTTP
pub struct HttpListing<T> {
    fetcher: PageFetcher,
    listing: Listing,
    origin: Url,
    extractor: fn(&str, &Url) -> Vec<T>,
}

impl<T> HttpListing<T> {
    pub fn new(
        fetcher: PageFetcher,
        listing: Listing,
        origin: Url,
        extractor: fn(&str, &Url) -> Vec<T>,
    ) -> Self {
        Self {
            fetcher,
            listing,
            origin,
            extractor,
        }
    }
}

#[async_trait]
impl<T> ListingSource for HttpListing<T>
where
    T: Listed + Send + Sync,
{
    type Item = T;

    async fn fetch_page(&self, page: u32) -> Option<String> {
        let url = match self.listing.page_url(&self.origin, page) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Cannot build {} page {} URL: {}", self.listing.label(), page, e);
                return None;
            }
        };

        tracing::info!("Fetching {} page {}", self.listing.label(), page);

        let body = self
            .fetcher
            .fetch_with_retry(&url, RequestKind::Listing)
            .await
            .into_body();

        if body.is_none() {
            tracing::warn!(
                "Giving up on {} page {}; keeping the pages already read",
                self.listing.label(),
                page
            );
        }

        body
    }

    fn extract(&self, body: &str) -> Vec<T> {
        (self.extractor)(body, &self.origin)
    }
}

/// Why the traversal stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Page had no records
    EmptyPage { page: u32 },

    /// Page repeated the previous page's titles
    RepeatedPage { page: u32 },

    /// Page could not be fetched after retries
    FetchFailed { page: u32 },

    /// The configured page cap was reached
    PageLimit { pages: u32 },
}

/// States of the traversal
#[derive(Debug)]
pub enum PaginationState<T> {
    Fetching { page: u32 },
    Extracting { page: u32, body: String },
    Deciding { page: u32, items: Vec<T> },
    Done { reason: StopReason },
}

/// Result of a finished traversal
#[derive(Debug)]
pub struct PaginationOutcome<T> {
    /// Records of all accepted pages in discovery order
    pub items: Vec<T>,

    /// Number of accepted pages
    pub pages: u32,

    /// Number of page fetches issued (accepted pages plus the terminating one)
    pub fetches: u32,

    pub stop: StopReason,
}

/// Decides whether page `page` ends the traversal
///
/// Returns None when the page holds new records and traversal continues.
pub fn should_stop<T: Listed>(page: u32, items: &[T], previous_titles: &[String]) -> Option<StopReason> {
    if items.is_empty() {
        return Some(StopReason::EmptyPage { page });
    }

    let repeated = items.len() == previous_titles.len()
        && items
            .iter()
            .zip(previous_titles)
            .all(|(item, previous)| item.title() == previous);

    if repeated {
        return Some(StopReason::RepeatedPage { page });
    }

    None
}

/// Drives a [`ListingSource`] from page 1 until a termination signal
pub struct Paginator<'a, S> {
    source: &'a S,
    max_pages: Option<u32>,
    progress: ProgressReporter,
}

impl<'a, S: ListingSource> Paginator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_pages: None,
            progress: ProgressReporter::silent(),
        }
    }

    /// Stops after `max_pages` accepted pages
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    /// Runs the state machine to `Done`
    pub async fn run(&self) -> PaginationOutcome<S::Item> {
        let mut items = Vec::new();
        let mut previous_titles: Vec<String> = Vec::new();
        let mut pages = 0;
        let mut fetches = 0;

        let mut state = PaginationState::Fetching { page: 1 };

        loop {
            state = match state {
                PaginationState::Fetching { page } => {
                    if self.max_pages.is_some_and(|max| page > max) {
                        PaginationState::Done {
                            reason: StopReason::PageLimit { pages },
                        }
                    } else {
                        fetches += 1;
                        match self.source.fetch_page(page).await {
                            Some(body) => PaginationState::Extracting { page, body },
                            None => PaginationState::Done {
                                reason: StopReason::FetchFailed { page },
                            },
                        }
                    }
                }

                PaginationState::Extracting { page, body } => PaginationState::Deciding {
                    page,
                    items: self.source.extract(&body),
                },

                PaginationState::Deciding {
                    page,
                    items: page_items,
                } => match should_stop(page, &page_items, &previous_titles) {
                    Some(reason) => PaginationState::Done { reason },
                    None => {
                        tracing::debug!("Page {}: {} records", page, page_items.len());
                        self.progress.emit(Progress::PageScraped {
                            page,
                            items: page_items.len(),
                        });

                        previous_titles = page_items.iter().map(|i| i.title().to_string()).collect();
                        items.extend(page_items);
                        pages += 1;

                        PaginationState::Fetching { page: page + 1 }
                    }
                },

                PaginationState::Done { reason } => {
                    tracing::info!(
                        "Listing finished after {} pages ({} records): {:?}",
                        pages,
                        items.len(),
                        reason
                    );
                    self.progress.emit(Progress::ListingDone {
                        pages,
                        items: items.len(),
                    });

                    return PaginationOutcome {
                        items,
                        pages,
                        fetches,
                        stop: reason,
                    };
                }
            };
        }
    }
}
