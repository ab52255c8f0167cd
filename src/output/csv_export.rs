//! Flat-table (CSV) export
//!
//! The header row is the field set of the first record. All records share
//! the same fields, so every row lines up with it.

use crate::model::BookRecord;
use crate::output::traits::{BookSink, OutputResult};
use std::path::{Path, PathBuf};

/// Writes `<dir>/<category>.csv`
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BookSink for CsvSink {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_file(&self, path: &Path, books: &[BookRecord]) -> OutputResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for book in books {
            writer.serialize(book)?;
        }
        writer.flush()?;
        Ok(())
    }
}
