//! HTTP fetcher implementation
//!
//! This module handles all page requests of a run:
//! - GET through the session client (fixed User-Agent and timeout)
//! - A fixed courtesy pause after every request
//! - A bounded retry on non-200 responses and network errors
//! - Error classification

use crate::config::FetchConfig;
use crate::session::Session;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Page returned 200
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Any other HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true for a 200 response
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Consumes the result, returning the body of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Which kind of page is requested; selects the courtesy pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Listing,
    Detail,
}

/// Issues GET requests with the run's timing and retry policy
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    listing_delay: Duration,
    detail_delay: Duration,
    retry_count: u32,
    retry_delay: Duration,
}

impl PageFetcher {
    /// Creates a fetcher that replays the session's cookies
    pub fn new(session: &Session, config: &FetchConfig) -> Self {
        Self {
            client: session.client().clone(),
            listing_delay: Duration::from_millis(config.listing_delay_ms),
            detail_delay: Duration::from_millis(config.detail_delay_ms),
            retry_count: config.retry_count.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Fetches a URL once, then pauses for the courtesy delay
    pub async fn fetch(&self, url: &Url, kind: RequestKind) -> FetchResult {
        tracing::debug!("GET {}", url);

        let result = match self.client.get(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();

                if status != StatusCode::OK {
                    FetchResult::HttpError {
                        status_code: status.as_u16(),
                    }
                } else {
                    match response.text().await {
                        Ok(body) => FetchResult::Success {
                            status_code: status.as_u16(),
                            body,
                        },
                        Err(e) => FetchResult::NetworkError {
                            error: e.to_string(),
                        },
                    }
                }
            }
            Err(e) => {
                // Classify error
                if e.is_timeout() {
                    FetchResult::NetworkError {
                        error: "Request timeout".to_string(),
                    }
                } else if e.is_connect() {
                    FetchResult::NetworkError {
                        error: "Connection refused".to_string(),
                    }
                } else {
                    FetchResult::NetworkError {
                        error: e.to_string(),
                    }
                }
            }
        };

        tokio::time::sleep(self.courtesy_delay(kind)).await;

        result
    }

    /// Fetches a URL, retrying unsuccessful attempts
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 200 | Return immediately |
    /// | Other HTTP status | Retry after `retry-delay` |
    /// | Timeout / network error | Retry after `retry-delay` |
    ///
    /// At most `retry-count` attempts are made; the last result is returned.
    pub async fn fetch_with_retry(&self, url: &Url, kind: RequestKind) -> FetchResult {
        let mut attempt = 1;

        loop {
            let result = self.fetch(url, kind).await;

            match &result {
                FetchResult::Success { .. } => return result,
                FetchResult::HttpError { status_code } => {
                    tracing::warn!(
                        "HTTP {} for {} (attempt {}/{})",
                        status_code,
                        url,
                        attempt,
                        self.retry_count
                    );
                }
                FetchResult::NetworkError { error } => {
                    tracing::warn!(
                        "{} for {} (attempt {}/{})",
                        error,
                        url,
                        attempt,
                        self.retry_count
                    );
                }
            }

            if attempt >= self.retry_count {
                return result;
            }

            attempt += 1;
            tokio::time::sleep(self.retry_delay).await;
        }
    }

    fn courtesy_delay(&self, kind: RequestKind) -> Duration {
        match kind {
            RequestKind::Listing => self.listing_delay,
            RequestKind::Detail => self.detail_delay,
        }
    }
}
