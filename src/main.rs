//! Shelf-Scraper main entry point
//!
//! This is the command-line interface for the Shelf-Scraper catalog crawler.

use anyhow::Context;
use clap::Parser;
use shelf_scraper::config::{load_config_with_hash, Config};
use shelf_scraper::output::{print_categories, print_summary};
use shelf_scraper::{CrawlSession, ScraperError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelf-Scraper: crawl a bookstore category into JSON, CSV, and XLSX
///
/// Every book listed under the category is collected across all listing
/// pages and saved to `<exports-dir>/<category>.json`.
#[derive(Parser, Debug)]
#[command(name = "shelf-scraper")]
#[command(version)]
#[command(about = "Crawl a paginated bookstore category", long_about = None)]
struct Cli {
    /// Category to scrape books from
    #[arg(short, long, default_value = "Books")]
    category: String,

    /// Also export to CSV and XLSX
    #[arg(short, long)]
    export: bool,

    /// Download cover images
    #[arg(short, long)]
    dlimages: bool,

    /// Print the available categories and exit
    #[arg(long)]
    list_categories: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let mut session = CrawlSession::new(config).context("Failed to start crawl session")?;

    if cli.list_categories {
        let index = session
            .categories()
            .await
            .context("Failed to load category index")?;
        print_categories(index);
        return Ok(());
    }

    handle_crawl(&mut session, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scraper=info,warn"),
            1 => EnvFilter::new("shelf_scraper=debug,info"),
            2 => EnvFilter::new("shelf_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the main crawl operation plus the optional image and export steps
async fn handle_crawl(session: &mut CrawlSession, cli: &Cli) -> anyhow::Result<()> {
    let category = cli.category.as_str();
    println!("Scraping category: {}", category);

    let outcome = match session.get_all_books(category).await {
        Ok(outcome) => outcome,
        Err(ScraperError::CategoryNotFound { name }) => {
            println!("Category '{}' not found.", name);
            println!("0 books found in category {}", category);
            return Ok(());
        }
        Err(e) => return Err(e).context("Crawl failed"),
    };

    println!(
        "{} books found in category {}",
        outcome.books.len(),
        category
    );
    print_summary(&outcome);

    if cli.dlimages {
        println!("Downloading book images...");
        let report = session
            .download_images(&outcome.books)
            .await
            .context("Failed to prepare image directory")?;
        println!(
            "Downloaded {} images ({} failed)",
            report.downloaded.len(),
            report.failed.len()
        );
    }

    if cli.export {
        println!("Exporting data");
        let report = session.export_books(&outcome.books, category);
        for path in &report.written {
            println!("  Wrote {}", path.display());
        }
        for (format, error) in &report.failed {
            eprintln!("  Failed to write {} export: {}", format, error);
        }
    }

    Ok(())
}
