//! Export coordinator - main pipeline orchestration
//!
//! This module drives a complete export run:
//! - Authenticating once and failing fast without a session
//! - Walking the listing pages
//! - Enriching every watchlist entry from its detail page, in discovery order
//! - Filtering, sorting and writing the CSV

use crate::config::Config;
use crate::crawler::fetcher::{PageFetcher, RequestKind};
use crate::crawler::pagination::{HttpListing, PaginationOutcome, Paginator};
use crate::crawler::parser::{extract_details, extract_ratings, extract_stubs};
use crate::crawler::progress::{Progress, ProgressReporter};
use crate::model::{DetailFields, ItemStub, RatedTitle};
use crate::output::{prepare_result_set, write_ratings, write_watchlist, ExportSummary};
use crate::session::{Credentials, Session, SessionProvider};
use crate::url::Listing;
use crate::{ConfigError, Result};
use std::path::PathBuf;
use std::time::Instant;

/// What to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Rating history: `title,year,rating`
    Ratings,

    /// Watchlist; `enriched` selects the six-column layout
    Watchlist { enriched: bool },
}

impl ExportMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ratings => "ratings",
            Self::Watchlist { .. } => "watchlist",
        }
    }
}

/// Main export coordinator
pub struct Exporter {
    config: Config,
    progress: ProgressReporter,
}

impl Exporter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: ProgressReporter::silent(),
        }
    }

    /// Sends progress events to the given reporter
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path the CSV for `mode` is written to
    pub fn output_path(&self, mode: ExportMode) -> PathBuf {
        match mode {
            ExportMode::Ratings => PathBuf::from(&self.config.output.ratings_path),
            ExportMode::Watchlist { .. } => PathBuf::from(&self.config.output.watchlist_path),
        }
    }

    /// Runs a complete export
    ///
    /// # Flow
    ///
    /// 1. Authenticate; on failure return before anything is written
    /// 2. Walk the listing pages
    /// 3. Watchlist only: enrich each entry, drop unrated, sort by rating count
    /// 4. Write the CSV
    ///
    /// # Returns
    ///
    /// * `Ok(ExportSummary)` - Export written
    /// * `Err(ExportError::AuthFailure)` - Login failed
    /// * `Err(ExportError)` - Output could not be written
    pub async fn run(
        &self,
        provider: &dyn SessionProvider,
        mode: ExportMode,
    ) -> Result<ExportSummary> {
        let credentials = Credentials::from_account(&self.config.account);

        let session = match provider.authenticate(&credentials).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Authentication failed, nothing will be written: {}", e);
                return Err(e);
            }
        };

        self.run_with_session(&session, mode).await
    }

    /// Runs an export with an existing session
    pub async fn run_with_session(
        &self,
        session: &Session,
        mode: ExportMode,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let fetcher = PageFetcher::new(session, &self.config.fetch);
        let output_path = self.output_path(mode);

        let mut summary = ExportSummary {
            mode: mode.label(),
            output_path: output_path.clone(),
            ..ExportSummary::default()
        };

        match mode {
            ExportMode::Ratings => {
                let outcome = self.scrape_ratings(session, &fetcher).await?;
                summary.pages = outcome.pages;
                summary.listed = outcome.items.len();

                summary.written = write_ratings(&output_path, &outcome.items)?;
            }

            ExportMode::Watchlist { enriched } => {
                let outcome = self.scrape_watchlist(session, &fetcher).await;
                summary.pages = outcome.pages;
                summary.listed = outcome.items.len();

                let mut stubs = outcome.items;
                let degraded = self.enrich(&fetcher, &mut stubs).await;
                summary.enriched = stubs.len() - degraded;
                summary.degraded = degraded;

                let result_set = prepare_result_set(stubs);
                summary.dropped_unrated = summary.listed - result_set.len();

                summary.written = write_watchlist(&output_path, &result_set, enriched)?;
            }
        }

        summary.elapsed = start_time.elapsed();

        tracing::info!(
            "Wrote {} rows to {}",
            summary.written,
            output_path.display()
        );
        self.progress.emit(Progress::Written {
            path: output_path,
            records: summary.written,
        });

        Ok(summary)
    }

    /// Walks the watchlist pages
    pub async fn scrape_watchlist(
        &self,
        session: &Session,
        fetcher: &PageFetcher,
    ) -> PaginationOutcome<ItemStub> {
        let source = HttpListing::new(
            fetcher.clone(),
            Listing::Watchlist {
                film_type: self.config.watchlist.film_type,
            },
            session.origin().clone(),
            extract_stubs,
        );

        Paginator::new(&source)
            .with_max_pages(self.config.fetch.max_pages)
            .with_progress(self.progress.clone())
            .run()
            .await
    }

    /// Walks the rating history pages
    ///
    /// Needs `[account] user-id`.
    pub async fn scrape_ratings(
        &self,
        session: &Session,
        fetcher: &PageFetcher,
    ) -> Result<PaginationOutcome<RatedTitle>> {
        let user_id = self
            .config
            .account
            .user_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::MissingCredential {
                field: "user-id",
                env_var: crate::config::ENV_USER_ID,
            })?;

        let source = HttpListing::new(
            fetcher.clone(),
            Listing::Ratings { user_id },
            session.origin().clone(),
            |html, _origin| extract_ratings(html),
        );

        Ok(Paginator::new(&source)
            .with_max_pages(self.config.fetch.max_pages)
            .with_progress(self.progress.clone())
            .run()
            .await)
    }

    /// Enriches every stub from its detail page, in discovery order
    ///
    /// A detail page that still fails after retries leaves the stub with
    /// zero ratings and empty fields.
    ///
    /// # Returns
    ///
    /// Number of stubs whose detail page could not be fetched
    pub async fn enrich(&self, fetcher: &PageFetcher, stubs: &mut [ItemStub]) -> usize {
        let total = stubs.len();
        let mut degraded = 0;

        tracing::info!("Enriching {} titles", total);

        for (index, stub) in stubs.iter_mut().enumerate() {
            let details = match fetcher
                .fetch_with_retry(&stub.detail_link, RequestKind::Detail)
                .await
                .into_body()
            {
                Some(body) => extract_details(&body),
                None => {
                    tracing::warn!("No details for '{}' ({})", stub.title, stub.detail_link);
                    degraded += 1;
                    DetailFields::default()
                }
            };

            stub.enrich(details);

            tracing::debug!(
                "Enriched {}/{}: {} ({} ratings)",
                index + 1,
                total,
                stub.title,
                stub.rating_count
            );
            self.progress.emit(Progress::Enriched {
                current: index + 1,
                total,
                title: stub.title.clone(),
            });
        }

        degraded
    }
}
