//! Listing-page traversal
//!
//! Starting from a category's first listing page, the walker fetches each
//! page, collects its pod links, and follows the "next" control until a page
//! has none. Pages are visited strictly in next-link order.

use crate::crawler::parser::parse_listing;
use crate::crawler::Fetcher;
use crate::model::CrawlStatus;
use std::collections::HashSet;
use url::Url;

/// Book URLs gathered from every listing page of a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingWalk {
    /// Absolute detail-page URLs in page order, then pod order
    pub book_urls: Vec<Url>,

    /// Number of listing pages fetched successfully
    pub pages_visited: u32,

    /// Why the walk stopped
    pub status: CrawlStatus,
}

enum WalkState {
    Fetch(Url),
    Done(CrawlStatus),
}

/// Walks the listing pages of one category
///
/// # Termination
///
/// | Condition | Status |
/// |-----------|--------|
/// | Page without a "next" control | `Complete` |
/// | Listing page fetch fails | `Truncated` (earlier pages kept) |
/// | "next" points at a visited page | `LoopDetected` |
/// | `max_pages` pages fetched and more remain | `PageLimitReached` |
///
/// Pages are compared without their `#fragment`, so `index.html#top` counts
/// as `index.html`. Duplicate book URLs across pages are not suppressed.
pub async fn walk_listing(fetcher: &Fetcher, start: Url, max_pages: u32) -> ListingWalk {
    let mut book_urls = Vec::new();
    let mut visited: HashSet<Url> = HashSet::new();
    let mut pages_visited = 0u32;
    let mut state = WalkState::Fetch(page_key(start));

    let status = loop {
        let current = match state {
            WalkState::Done(status) => break status,
            WalkState::Fetch(url) => url,
        };

        if pages_visited >= max_pages {
            tracing::warn!(
                "Page limit of {} reached; not visiting {}",
                max_pages,
                current
            );
            state = WalkState::Done(CrawlStatus::PageLimitReached { limit: max_pages });
            continue;
        }

        tracing::info!("Scraping page: {}", current);
        // Mark visited before fetching
        visited.insert(current.clone());

        let body = match fetcher.fetch_text(&current).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Error on page {}: {}; stopping pagination", current, e);
                state = WalkState::Done(CrawlStatus::Truncated {
                    url: current.to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        pages_visited += 1;
        let page = parse_listing(&body);

        // Collect pod links in page order
        for href in &page.book_links {
            match crate::url::resolve(&current, href) {
                Ok(url) => {
                    tracing::debug!("Found book: {}", url);
                    book_urls.push(url);
                }
                Err(e) => tracing::warn!("Skipping book link on {}: {}", current, e),
            }
        }

        // Follow "next" unless it leads back to a page already fetched
        state = match page.next_link {
            None => WalkState::Done(CrawlStatus::Complete),
            Some(href) => match crate::url::resolve(&current, &href).map(page_key) {
                Ok(next) if visited.contains(&next) => {
                    tracing::warn!("Next link on {} returns to visited page {}", current, next);
                    WalkState::Done(CrawlStatus::LoopDetected {
                        url: next.to_string(),
                    })
                }
                Ok(next) => WalkState::Fetch(next),
                Err(e) => {
                    tracing::warn!("Unresolvable next link on {}: {}", current, e);
                    WalkState::Done(CrawlStatus::Truncated {
                        url: current.to_string(),
                        reason: e.to_string(),
                    })
                }
            },
        };
    };

    tracing::info!(
        "Pagination finished after {} pages with {} book links ({})",
        pages_visited,
        book_urls.len(),
        status
    );

    ListingWalk {
        book_urls,
        pages_visited,
        status,
    }
}

/// Identity of a listing page for loop detection
fn page_key(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}
