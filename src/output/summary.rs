//! Console reporting for crawl results

use crate::crawler::CategoryIndex;
use crate::model::CrawlOutcome;

/// Prints a crawl outcome to stdout in a formatted manner
pub fn print_summary(outcome: &CrawlOutcome) {
    println!("=== Crawl Summary: {} ===\n", outcome.category);

    println!("  Books collected: {}", outcome.books.len());
    println!("  Book links found: {}", outcome.links_found);
    println!("  Listing pages visited: {}", outcome.pages_visited);
    println!("  Duration: {}s", outcome.duration_seconds());
    println!("  Status: {}", outcome.status);

    if let Some(path) = &outcome.json_path {
        println!("  Saved to: {}", path.display());
    }

    if !outcome.skipped.is_empty() {
        println!("\nSkipped ({}):", outcome.skipped.len());
        for skipped in &outcome.skipped {
            println!("  - {}: {}", skipped.url, skipped.reason);
        }
    }

    println!();
}

/// Prints every category with its listing URL
pub fn print_categories(index: &CategoryIndex) {
    println!("Categories ({}):", index.len());
    for category in index.iter() {
        println!("  {} -> {}", category.name, category.url);
    }
}
