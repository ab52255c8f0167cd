//! Crawl session - per-run orchestration
//!
//! A session owns the HTTP client, the configuration, and the lazily built
//! category index. A category crawl runs:
//! 1. Resolve the category name through the index (built on first use)
//! 2. Walk every listing page, collecting detail URLs
//! 3. Fetch and parse each detail page into a record
//! 4. Persist the collection as JSON

use crate::config::Config;
use crate::crawler::collector::collect_details;
use crate::crawler::paginator::walk_listing;
use crate::crawler::{CategoryIndex, Fetcher};
use crate::model::{BookRecord, CrawlOutcome};
use crate::output::{self, BookSink, ExportReport, ImageReport, JsonSink};
use crate::{Result, ScraperError};
use chrono::Utc;
use url::Url;

/// Main crawl session structure
pub struct CrawlSession {
    config: Config,
    fetcher: Fetcher,
    root: Url,
    categories: Option<CategoryIndex>,
}

impl CrawlSession {
    /// Creates a new session
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Ready to crawl
    /// * `Err(ScraperError)` - Invalid base URL or HTTP client setup failed
    pub fn new(config: Config) -> Result<Self> {
        let root = crate::url::parse_base(&config.crawler.base_url)?;
        let fetcher = Fetcher::new(&config.crawler)?;

        Ok(Self {
            config,
            fetcher,
            root,
            categories: None,
        })
    }

    /// Creates a session with a category index supplied up front
    pub fn with_categories(config: Config, categories: CategoryIndex) -> Result<Self> {
        let mut session = Self::new(config)?;
        session.categories = Some(categories);
        Ok(session)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Returns the category index, fetching the site root on first use
    pub async fn categories(&mut self) -> Result<&CategoryIndex> {
        let index = match self.categories.take() {
            Some(index) => index,
            None => CategoryIndex::fetch(&self.fetcher, &self.root).await?,
        };

        let index: &CategoryIndex = self.categories.insert(index);
        Ok(index)
    }

    /// Whether the index has been built in this session
    pub fn has_categories(&self) -> bool {
        self.categories.is_some()
    }

    /// Drops the cached index; the next lookup rebuilds it from scratch
    pub fn invalidate_categories(&mut self) {
        self.categories = None;
    }

    /// Resolves a category name to its first listing page
    ///
    /// Fails with `CategoryNotFound` when the name is not in the index. The
    /// index is left untouched in that case.
    pub async fn lookup(&mut self, name: &str) -> Result<Url> {
        let index = self.categories().await?;
        index.lookup(name).cloned()
    }

    /// Crawls a category without persisting anything
    pub async fn collect_category(&mut self, name: &str) -> Result<CrawlOutcome> {
        let started_at = Utc::now();

        // Resolve the category to its first listing page
        let start = self.lookup(name).await.map_err(|e| {
            if matches!(e, ScraperError::CategoryNotFound { .. }) {
                tracing::warn!("Category '{}' not found", name);
            }
            e
        })?;

        tracing::info!("Fetching books from category: {}", name);

        // Walk listing pages, then fetch each detail page
        let walk = walk_listing(&self.fetcher, start, self.config.crawler.max_pages).await;

        let collected = collect_details(
            &self.fetcher,
            &walk.book_urls,
            self.config.crawler.request_delay(),
        )
        .await;

        tracing::info!(
            "Collected {} books from '{}' ({} skipped)",
            collected.books.len(),
            name,
            collected.skipped.len()
        );

        Ok(CrawlOutcome {
            category: name.to_string(),
            books: collected.books,
            skipped: collected.skipped,
            pages_visited: walk.pages_visited,
            links_found: walk.book_urls.len(),
            status: walk.status,
            json_path: None,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Crawls a category and writes `<exports>/<category>.json`
    ///
    /// A failed JSON write is logged and leaves `json_path` empty; the
    /// collected books are still returned.
    pub async fn get_all_books(&mut self, name: &str) -> Result<CrawlOutcome> {
        let mut outcome = self.collect_category(name).await?;

        // Persist JSON; a failed write does not lose the books
        match self.json_sink().write(&outcome.books, name) {
            Ok(path) => outcome.json_path = path,
            Err(e) => tracing::error!("Failed to save JSON for '{}': {}", name, e),
        }

        Ok(outcome)
    }

    /// Writes the CSV and XLSX exports for a collection
    pub fn export_books(&self, books: &[BookRecord], category: &str) -> ExportReport {
        output::export_books(books, category, &self.config.output.exports_dir)
    }

    /// Downloads every record's cover image into the images directory
    pub async fn download_images(&self, books: &[BookRecord]) -> Result<ImageReport> {
        let report =
            output::download_images(&self.fetcher, books, &self.config.output.images_dir).await?;
        Ok(report)
    }

    /// Reads back the JSON export for a category; empty if none exists
    pub fn load_books(&self, category: &str) -> Result<Vec<BookRecord>> {
        Ok(self.json_sink().load(category)?)
    }

    fn json_sink(&self) -> JsonSink {
        JsonSink::new(&self.config.output.exports_dir)
    }
}

/// Runs a full category crawl with a fresh session
///
/// # Example
///
/// ```no_run
/// use shelf_scraper::config::Config;
/// use shelf_scraper::crawler::crawl_category;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = crawl_category(Config::default(), "Travel").await?;
/// println!("{} books", outcome.books.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl_category(config: Config, category: &str) -> Result<CrawlOutcome> {
    let mut session = CrawlSession::new(config)?;
    session.get_all_books(category).await
}
