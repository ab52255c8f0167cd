//! Spreadsheet (XLSX) export
//!
//! One worksheet, a bold header row of field names, one row per record,
//! every cell written as a string.

use crate::model::BookRecord;
use crate::output::traits::{BookSink, OutputResult};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

/// Writes `<dir>/<category>.xlsx`
#[derive(Debug, Clone)]
pub struct XlsxSink {
    dir: PathBuf,
}

impl XlsxSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BookSink for XlsxSink {
    fn format(&self) -> &'static str {
        "xlsx"
    }

    fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_file(&self, path: &Path, books: &[BookRecord]) -> OutputResult<()> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Books")?;

        for (col, name) in BookRecord::FIELDS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &header)?;
        }

        for (i, book) in books.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, value) in book.field_values().iter().enumerate() {
                worksheet.write_string(row, col as u16, *value)?;
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}
