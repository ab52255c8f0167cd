//! Sink trait and persistence error types
//!
//! Every export format implements [`BookSink`]. The provided
//! [`BookSink::write`] handles the parts shared by all formats: skipping an
//! empty collection, creating the target directory, and naming the file
//! after the category.

use crate::model::BookRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing or reading exports
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, PersistenceError>;

/// A serializer writing a book collection to one file format
pub trait BookSink {
    /// Short format name used in logs ("json", "csv", ...)
    fn format(&self) -> &'static str;

    /// Directory the sink writes into
    fn dir(&self) -> &Path;

    /// Writes `books` to `path`, replacing any existing file
    ///
    /// Only called with a non-empty collection.
    fn write_file(&self, path: &Path, books: &[BookRecord]) -> OutputResult<()>;

    /// `<dir>/<category>.<format>`
    fn path_for(&self, category: &str) -> PathBuf {
        self.dir()
            .join(format!("{}.{}", file_stem(category), self.format()))
    }

    /// Writes the collection for `category`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(path))` - File written
    /// * `Ok(None)` - Collection was empty; nothing written
    /// * `Err(PersistenceError)` - Write failed
    fn write(&self, books: &[BookRecord], category: &str) -> OutputResult<Option<PathBuf>> {
        if books.is_empty() {
            tracing::info!(
                "No books for '{}'; skipping {} export",
                category,
                self.format()
            );
            return Ok(None);
        }

        std::fs::create_dir_all(self.dir())?;
        let path = self.path_for(category);

        tracing::info!("Saving data to {}...", path.display());
        self.write_file(&path, books)?;
        tracing::info!("Saved {} books to {}", books.len(), path.display());

        Ok(Some(path))
    }
}

/// Turns a category name into a file stem that stays inside the export dir
pub fn file_stem(category: &str) -> String {
    let stem: String = category
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();

    match stem.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => stem,
    }
}
