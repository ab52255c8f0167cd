//! Data model for scraped catalog entries
//!
//! This module defines the record produced for every book detail page and the
//! outcome object returned by a category crawl.

mod book;
mod outcome;

pub use book::{BookRecord, Rating};
pub use outcome::{CrawlOutcome, CrawlStatus, SkippedBook};
