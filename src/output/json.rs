//! JSON export: the canonical, always-written format
//!
//! Output is a pretty-printed array (4-space indent, UTF-8 kept as-is) and
//! can be read back into an identical collection.

use crate::model::BookRecord;
use crate::output::traits::{BookSink, OutputResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes and reads `<dir>/<category>.json`
#[derive(Debug, Clone)]
pub struct JsonSink {
    dir: PathBuf,
}

impl JsonSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads the collection previously written for `category`
    ///
    /// # Returns
    ///
    /// * `Ok(books)` - Decoded collection; empty if the file does not exist
    /// * `Err(PersistenceError)` - File unreadable or not a valid collection
    pub fn load(&self, category: &str) -> OutputResult<Vec<BookRecord>> {
        let path = self.path_for(category);

        if !path.exists() {
            tracing::info!("File {} does not exist", path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let books: Vec<BookRecord> = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!("Loaded {} books from {}", books.len(), path.display());

        Ok(books)
    }
}

impl BookSink for JsonSink {
    fn format(&self) -> &'static str {
        "json"
    }

    fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_file(&self, path: &Path, books: &[BookRecord]) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        books.serialize(&mut serializer)?;

        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
