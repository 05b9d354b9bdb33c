//! Progress events for the status channel
//!
//! The pipeline reports milestones over an unbounded channel; the CLI turns
//! them into console output. Sending never blocks and a dropped receiver is
//! ignored.

use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// A milestone of an export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A listing page was accepted
    PageScraped { page: u32, items: usize },

    /// Listing traversal finished with this many records
    ListingDone { pages: u32, items: usize },

    /// Item `current` of `total` (1-based) has been enriched
    Enriched {
        current: usize,
        total: usize,
        title: String,
    },

    /// The CSV file was written
    Written { path: PathBuf, records: usize },
}

/// Optional sender for [`Progress`] events
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    sender: Option<UnboundedSender<Progress>>,
}

impl ProgressReporter {
    pub fn new(sender: UnboundedSender<Progress>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// A reporter that drops every event
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: Progress) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }
}
