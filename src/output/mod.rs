//! Output module for persisting crawl results
//!
//! This module handles:
//! - The canonical JSON export and its read path
//! - CSV and XLSX exports
//! - Cover image downloads
//! - Console summaries

mod csv_export;
mod images;
mod json;
mod summary;
mod traits;
mod xlsx;

pub use csv_export::CsvSink;
pub use images::{download_images, ImageFailure, ImageReport};
pub use json::JsonSink;
pub use summary::{print_categories, print_summary};
pub use traits::{file_stem, BookSink, OutputResult, PersistenceError};
pub use xlsx::XlsxSink;

use crate::model::BookRecord;
use std::path::{Path, PathBuf};

/// Result of the flat-table and spreadsheet exports
///
/// The two formats are written independently; one failing does not prevent
/// the other.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(&'static str, PersistenceError)>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes the CSV and XLSX exports for `category` into `dir`
///
/// An empty collection writes nothing and reports no failure.
pub fn export_books(books: &[BookRecord], category: &str, dir: &Path) -> ExportReport {
    let sinks: [Box<dyn BookSink>; 2] = [Box::new(CsvSink::new(dir)), Box::new(XlsxSink::new(dir))];
    let mut report = ExportReport::default();

    for sink in &sinks {
        match sink.write(books, category) {
            Ok(Some(path)) => report.written.push(path),
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to write {} export: {}", sink.format(), e);
                report.failed.push((sink.format(), e));
            }
        }
    }

    report
}
