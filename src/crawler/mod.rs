//! Crawler module for catalog traversal and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with typed failures
//! - HTML extraction of categories, listing links, and book details
//! - The lazily built category index
//! - Listing-page pagination and detail collection
//! - Per-run session orchestration

mod category_index;
mod collector;
mod fetcher;
mod paginator;
mod parser;
mod session;

pub use category_index::{Category, CategoryIndex};
pub use collector::{collect_details, fetch_book, Collected};
pub use fetcher::{build_http_client, Fetcher};
pub use paginator::{walk_listing, ListingWalk};
pub use parser::{
    extract_book_detail, extract_book_links, extract_categories, extract_next_link,
    parse_listing, CategoryLink, ListingPage,
};
pub use session::{crawl_category, CrawlSession};
