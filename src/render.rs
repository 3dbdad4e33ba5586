//! Human-readable rendering of reports
//!
//! A presentation layer over the structured report values: the engine never
//! prints, it returns reports, and these functions turn them into text. The
//! previews re-read the file with the encoding/delimiter recorded in the
//! report, swallowing any error into a placeholder line.

use std::fmt::Write as _;
use std::path::Path;

use crate::classify::LineClassification;
use crate::encoding;
use crate::table::Table;
use crate::transform::TransformOutcome;
use crate::verify::VerificationReport;

fn check(flag: bool) -> &'static str {
    if flag {
        "ok"
    } else {
        "MISMATCH"
    }
}

/// Render a tabular verification report.
pub fn verification(report: &VerificationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Tabular File Verification ===");
    let _ = writeln!(out, "File: {}", report.file_path.display());
    let _ = writeln!(out, "Size: {} bytes", report.file_size_bytes);
    let _ = writeln!(out, "Encoding: {}", report.encoding);
    let _ = writeln!(out, "Delimiter: '{}'", report.delimiter);
    let _ = writeln!(
        out,
        "Headers ({}): {}",
        report.header_count,
        report.headers.join(", ")
    );
    let _ = writeln!(out, "Rows: {}", report.row_count);

    if report.single_column {
        let _ = writeln!(out, "Format: single-column ({})", report.headers[0]);
        let _ = writeln!(out, "Column consistency: ok");
    } else {
        let _ = writeln!(
            out,
            "Column consistency: {}",
            check(report.consistent_columns)
        );
    }
    let _ = writeln!(out, "Empty cells: {}", report.empty_cells);

    let _ = writeln!(out, "\nColumn types:");
    for (header, column_type) in report.headers.iter().zip(&report.column_types) {
        let _ = writeln!(out, "  - {header}: {column_type:?}");
    }

    let _ = writeln!(out, "\nAssessment:");
    if report.single_column {
        let _ = writeln!(out, "  single-column structure looks intact");
    } else if report.is_clean() {
        let _ = writeln!(out, "  structure looks intact");
    } else {
        let _ = writeln!(out, "  structure has issues:");
        if !report.consistent_columns {
            let _ = writeln!(out, "  - inconsistent column counts across rows");
        }
        if report.empty_cells > 0 {
            let _ = writeln!(out, "  - {} empty cells", report.empty_cells);
        }
    }
    out
}

/// Render a plain-text classification.
pub fn classification(path: &Path, report: &LineClassification) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Plain Text Classification ===");
    let _ = writeln!(out, "File: {}", path.display());
    let _ = writeln!(out, "Lines: {}", report.line_count);
    let _ = writeln!(out, "Empty lines: {}", report.empty_lines);
    let _ = writeln!(
        out,
        "Average line length: {:.2} characters",
        report.avg_line_length
    );
    let _ = writeln!(
        out,
        "Consistent line length: {}",
        if report.consistent_line_length {
            "yes"
        } else {
            "no"
        }
    );
    if report.is_large_file {
        let _ = writeln!(out, "Large file: metrics computed from a bounded sample");
    }

    if let Some(delimiter) = report.delimiter {
        let _ = writeln!(
            out,
            "\nLooks like a table ({:.1}% confidence), delimiter '{}'",
            report.confidence * 100.0,
            delimiter
        );
        let _ = writeln!(
            out,
            "Consider transforming it: tabcheck {} --transform --delimiter '{}'",
            path.display(),
            delimiter
        );
    } else {
        let _ = writeln!(out, "\nNo table structure detected");
    }
    out
}

/// Render a transform outcome.
pub fn outcome(result: &TransformOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Transform ===");
    let _ = writeln!(
        out,
        "{} ({}) -> {} ({})",
        result.input.display(),
        result.source_encoding,
        result.output.display(),
        result.target_encoding
    );
    match (result.rows, result.columns, result.delimiter) {
        (Some(rows), Some(columns), Some(delimiter)) => {
            let _ = writeln!(
                out,
                "Wrote {rows} rows x {columns} columns, delimiter '{delimiter}'"
            );
            if result.single_column_fallback {
                let _ = writeln!(out, "No table structure detected; flattened to one column");
            }
        }
        _ => {
            let _ = writeln!(out, "Re-encoded content unchanged");
        }
    }
    out
}

/// First rows of a tabular file, re-read with the report's encoding and
/// delimiter. Errors come back as a placeholder line, never a failure.
pub fn table_preview(report: &VerificationReport, limit: usize) -> String {
    match read_preview_table(report) {
        Ok(table) => {
            let mut out = String::new();
            let _ = writeln!(out, "Preview (first {limit} rows):");
            let _ = writeln!(out, "  Headers: {}", table.headers.join(", "));
            for (i, row) in table.rows.iter().take(limit).enumerate() {
                let cells = if row.len() > 3 {
                    format!("{}... ({} columns)", row[..3].join(", "), row.len())
                } else {
                    row.join(", ")
                };
                let _ = writeln!(out, "  Row {}: {}", i + 1, cells);
            }
            if table.row_count() > limit {
                let _ = writeln!(out, "  ... and {} more rows", table.row_count() - limit);
            }
            out
        }
        Err(e) => format!("Preview unavailable: {e}\n"),
    }
}

fn read_preview_table(report: &VerificationReport) -> crate::error::Result<Table> {
    let bytes = std::fs::read(&report.file_path)?;
    let source = encoding::by_label(&report.encoding)?;
    Table::parse(&encoding::decode(&bytes, source), report.delimiter)
}

/// First lines of a plain text file.
pub fn text_preview(path: &Path, limit: usize) -> String {
    match std::fs::read(path) {
        Ok(bytes) => {
            let text = match encoding::detect(&bytes) {
                Ok(enc) => encoding::decode(&bytes, enc),
                Err(e) => return format!("Preview unavailable: {e}\n"),
            };
            let mut out = String::new();
            let _ = writeln!(out, "Preview (first {limit} lines):");
            for (i, line) in text.lines().take(limit).enumerate() {
                let mut shown: String = line.chars().take(77).collect();
                if line.chars().count() > 77 {
                    shown.push_str("...");
                }
                let _ = writeln!(out, "  Line {}: {}", i + 1, shown);
            }
            out
        }
        Err(e) => format!("Preview unavailable: {e}\n"),
    }
}
