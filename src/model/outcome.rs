use crate::model::BookRecord;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// How a category crawl ended
///
/// Anything other than `Complete` means the book list may be missing entries
/// from pages that were never visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlStatus {
    /// Pagination ended at a page with no "next" control
    Complete,

    /// A listing page could not be fetched; earlier pages were kept
    Truncated { url: String, reason: String },

    /// A "next" link pointed at a page that was already visited
    LoopDetected { url: String },

    /// The configured page limit stopped the walk
    PageLimitReached { limit: u32 },
}

impl CrawlStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn is_partial(&self) -> bool {
        !self.is_complete()
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Truncated { url, reason } => write!(f, "truncated at {} ({})", url, reason),
            Self::LoopDetected { url } => write!(f, "stopped at repeated page {}", url),
            Self::PageLimitReached { limit } => write!(f, "stopped after {} pages", limit),
        }
    }
}

/// A detail page that produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBook {
    pub url: String,
    pub reason: String,
}

/// Result of crawling one category
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Category name as requested
    pub category: String,

    /// Collected records in discovery order (page order, then listing order)
    pub books: Vec<BookRecord>,

    /// Detail pages that failed to fetch or parse
    pub skipped: Vec<SkippedBook>,

    /// Number of listing pages fetched successfully
    pub pages_visited: u32,

    /// Number of detail URLs discovered across all listing pages
    pub links_found: usize,

    pub status: CrawlStatus,

    /// Where the JSON export landed, if it was written
    pub json_path: Option<PathBuf>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlOutcome {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
