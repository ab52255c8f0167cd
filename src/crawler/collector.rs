//! Detail-page collection
//!
//! Fetches and parses every discovered book URL in order. A failing URL is
//! logged and recorded as skipped; the batch always runs to the end.

use crate::crawler::parser::extract_book_detail;
use crate::crawler::Fetcher;
use crate::model::{BookRecord, SkippedBook};
use crate::ScraperError;
use std::time::Duration;
use url::Url;

/// Records collected from a batch of detail pages
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// Successful records, in input order
    pub books: Vec<BookRecord>,

    /// URLs that produced no record
    pub skipped: Vec<SkippedBook>,
}

/// Fetches one detail page and extracts its record
pub async fn fetch_book(fetcher: &Fetcher, url: &Url) -> Result<BookRecord, ScraperError> {
    let html = fetcher.fetch_text(url).await?;
    let book = extract_book_detail(&html, url)?;
    Ok(book)
}

/// Fetches every URL in `urls`, pausing `delay` between successive requests
///
/// The delay applies between detail fetches only; nothing is slept before
/// the first request or after the last.
pub async fn collect_details(fetcher: &Fetcher, urls: &[Url], delay: Duration) -> Collected {
    let mut collected = Collected::default();

    for (i, url) in urls.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match fetch_book(fetcher, url).await {
            Ok(book) => {
                tracing::debug!("Collected '{}' from {}", book.title, url);
                collected.books.push(book);
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                collected.skipped.push(SkippedBook {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        if (i + 1) % 20 == 0 {
            tracing::info!("Progress: {}/{} detail pages processed", i + 1, urls.len());
        }
    }

    collected
}
