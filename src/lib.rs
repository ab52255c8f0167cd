//! Shelf-Scraper: a catalog crawler for paginated bookstore sites
//!
//! This crate resolves a category name to its listing URL, walks every listing
//! page of that category, extracts a typed record from each book detail page,
//! and persists the resulting collection as JSON, CSV, or XLSX.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Shelf-Scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Category not found: {name}")]
    CategoryNotFound { name: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] output::PersistenceError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Transport-level failures raised by the fetcher
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },
}

impl NetworkError {
    /// The URL the failed request was addressed to
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Request { url, .. } => url,
        }
    }
}

/// Detail-page extraction failures
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Missing {element} on {url}")]
    MissingElement { url: String, element: &'static str },

    #[error("Missing product information row {row} ({field}) on {url}")]
    MissingRow {
        url: String,
        row: usize,
        field: &'static str,
    },

    #[error("Missing attribute '{attribute}' on {element} at {url}")]
    MissingAttribute {
        url: String,
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Unresolvable link '{href}' on {url}")]
    InvalidUrl { url: String, href: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to resolve '{href}' against {base}: {message}")]
    Join {
        base: String,
        href: String,
        message: String,
    },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Shelf-Scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CategoryIndex, CrawlSession};
pub use model::{BookRecord, CrawlOutcome, CrawlStatus, Rating};
pub use crate::url::resolve;
