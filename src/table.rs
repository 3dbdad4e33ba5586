//! Parsed table model and quoted-field-aware parsing
//!
//! Uses the `csv` crate for RFC 4180 compliant parsing with support for
//! quoted fields, escaped quotes, and custom delimiters. Row lengths may
//! legitimately differ after parsing; verification reports on that rather
//! than normalizing it here.

use crate::delimiter::Delimiter;
use crate::error::{Error, Result};

/// A parsed delimited file: one header row plus data rows, all cells owned
/// strings. Headers are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse delimited content. The first record becomes the header row.
    ///
    /// Empty content yields an empty table rather than an error.
    pub fn parse(content: &str, delimiter: Delimiter) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut headers = Vec::new();
        let mut rows = Vec::new();

        for (i, result) in reader.records().enumerate() {
            let record = result?;
            let row = resplit(record.iter().map(str::to_string).collect(), delimiter);
            if i == 0 {
                headers = row;
            } else {
                rows.push(row);
            }
        }

        Ok(Table { headers, rows })
    }

    /// Serialize back to delimited text, quoting fields as needed. Ragged
    /// rows are written as-is; width mismatches are the verifier's business.
    pub fn to_delimited(&self, delimiter: Delimiter) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter.as_byte())
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Apply a transformation to every data row. Headers are untouched.
    pub fn map_rows<F>(&mut self, mut f: F)
    where
        F: FnMut(Vec<String>) -> Vec<String>,
    {
        let rows = std::mem::take(&mut self.rows);
        self.rows = rows.into_iter().map(&mut f).collect();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

/// Repair a row that collapsed to a single cell.
///
/// A one-cell row whose text still contains the active delimiter came from a
/// mis-detected quoting or line structure; split it back apart. Applied per
/// row, so one row's repair never depends on another's.
fn resplit(mut row: Vec<String>, delimiter: Delimiter) -> Vec<String> {
    if row.len() == 1 && row[0].contains(delimiter.char()) {
        return row
            .remove(0)
            .split(delimiter.char())
            .map(str::to_string)
            .collect();
    }
    row
}
