//! Structural verification of parsed tables
//!
//! Verification never fails: malformation is exactly what it reports.
//! Column-count mismatches, empty cells, and mixed types come back as fields
//! on the report, not as errors.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{Thresholds, CONTENT_HEADER};
use crate::delimiter::Delimiter;
use crate::table::Table;

/// Inferred type of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Text,
}

/// Where a table came from, carried into the report verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct FileMeta {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub encoding: String,
    pub delimiter: Delimiter,
}

/// Read-only snapshot of a table's structural health.
///
/// Created fresh on every verification call and never mutated afterwards;
/// holds copies, not references into the table.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub file_path: PathBuf,
    pub file_size_bytes: u64,
    pub encoding: String,
    pub delimiter: Delimiter,
    pub header_count: usize,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub consistent_columns: bool,
    /// True when the header is exactly the generic single-column form
    /// produced by plain-text promotion.
    pub single_column: bool,
    pub empty_cells: usize,
    /// One tag per header position, in header order.
    pub column_types: Vec<ColumnType>,
}

impl VerificationReport {
    /// A table is clean when its columns line up and no cell is blank.
    pub fn is_clean(&self) -> bool {
        self.consistent_columns && self.empty_cells == 0
    }
}

/// Compute a structural report for a parsed table.
pub fn verify(table: &Table, meta: FileMeta, thresholds: &Thresholds) -> VerificationReport {
    let single_column = table.headers.len() == 1 && table.headers[0] == CONTENT_HEADER;

    // Single-column tables are deliberately unstructured: any row with at
    // least one cell counts as consistent. Otherwise every row must have
    // the same width. A table with no data rows has nothing to disagree.
    let consistent_columns = if single_column {
        table.rows.iter().all(|row| !row.is_empty())
    } else {
        let mut widths: Vec<usize> = table.rows.iter().map(Vec::len).collect();
        widths.sort_unstable();
        widths.dedup();
        widths.len() <= 1
    };

    let empty_cells = table
        .rows
        .iter()
        .flatten()
        .filter(|cell| cell.trim().is_empty())
        .count();

    let column_types = infer_column_types(table, thresholds);

    tracing::debug!(
        path = %meta.path.display(),
        rows = table.row_count(),
        consistent_columns,
        empty_cells,
        "verified table structure"
    );

    VerificationReport {
        file_path: meta.path,
        file_size_bytes: meta.size_bytes,
        encoding: meta.encoding,
        delimiter: meta.delimiter,
        header_count: table.headers.len(),
        headers: table.headers.clone(),
        row_count: table.row_count(),
        consistent_columns,
        single_column,
        empty_cells,
        column_types,
    }
}

/// Tag each header position numeric or text.
///
/// Only cells actually present at an index are observed; rows shorter than
/// the index are skipped, never indexed past their length. Columns with no
/// observed values default to text.
fn infer_column_types(table: &Table, thresholds: &Thresholds) -> Vec<ColumnType> {
    (0..table.headers.len())
        .map(|i| {
            let values: Vec<&str> = table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(String::as_str)
                .collect();

            if values.is_empty() {
                return ColumnType::Text;
            }

            let numeric = values.iter().filter(|v| is_decimal(v.trim())).count();
            if numeric as f64 > thresholds.numeric_fraction * values.len() as f64 {
                ColumnType::Numeric
            } else {
                ColumnType::Text
            }
        })
        .collect()
}

/// Non-negative decimal: ASCII digits with at most one decimal point.
/// No sign, no exponent, no grouping.
fn is_decimal(value: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in value.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}
