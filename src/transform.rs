//! File transformation: re-encode, re-delimit, promote
//!
//! Behavior by input/output kind:
//! - tabular content is parsed with the resolved delimiter and re-serialized
//!   with the target encoding, headers and rows unchanged otherwise;
//! - plain text to plain text only re-encodes;
//! - plain text to tabular runs the classifier first and either splits lines
//!   on the detected delimiter (padding short rows, never truncating) or
//!   degrades to a single generic column.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use serde::Serialize;

use crate::classify::{classify, LineSample};
use crate::config::{Thresholds, CONTENT_HEADER};
use crate::delimiter::{infer, Delimiter};
use crate::encoding;
use crate::error::{Error, Result};
use crate::table::Table;

/// Recognized input/output kinds, keyed purely on the file-name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Tabular,
    PlainText,
}

impl FileKind {
    /// `.csv`/`.tsv` are tabular, `.txt` or no suffix is plain text,
    /// anything else is unsupported.
    pub fn from_path(path: &Path) -> Result<FileKind> {
        match path.extension().and_then(OsStr::to_str) {
            None => Ok(FileKind::PlainText),
            Some(ext) => match ext.to_ascii_lowercase().as_str() {
                "csv" | "tsv" => Ok(FileKind::Tabular),
                "txt" => Ok(FileKind::PlainText),
                other => Err(Error::UnsupportedFileType(format!(".{other}"))),
            },
        }
    }
}

/// What a transform did, for rendering and for chaining verification.
#[derive(Debug, Clone, Serialize)]
pub struct TransformOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_kind: FileKind,
    pub output_kind: FileKind,
    pub source_encoding: String,
    pub target_encoding: String,
    /// Delimiter the output table was written with; absent for text output.
    pub delimiter: Option<Delimiter>,
    /// Data rows written; absent for text output.
    pub rows: Option<usize>,
    /// Output table width; absent for text output.
    pub columns: Option<usize>,
    /// True when unstructured text degraded to the single-column form.
    pub single_column_fallback: bool,
}

/// Transform a file to the target encoding and delimiter form.
pub fn transform(
    input: &Path,
    output: &Path,
    target_encoding: &'static Encoding,
    requested: Option<Delimiter>,
    thresholds: &Thresholds,
) -> Result<TransformOutcome> {
    if !input.exists() {
        return Err(Error::MissingFile(input.to_path_buf()));
    }
    let input_kind = FileKind::from_path(input)?;
    let output_kind = FileKind::from_path(output)?;

    let bytes = fs::read(input)?;
    let source_encoding = encoding::detect(&bytes)?;
    let text = encoding::decode(&bytes, source_encoding);

    let mut outcome = TransformOutcome {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        input_kind,
        output_kind,
        source_encoding: source_encoding.name().to_string(),
        target_encoding: target_encoding.name().to_string(),
        delimiter: None,
        rows: None,
        columns: None,
        single_column_fallback: false,
    };

    match (input_kind, output_kind) {
        // Tabular content stays tabular regardless of the output suffix.
        (FileKind::Tabular, _) => {
            let inference = infer(&text, requested, thresholds.sample_chars);
            let table = Table::parse(&text, inference.delimiter)?;
            let serialized = table.to_delimited(inference.delimiter)?;
            fs::write(output, encoding::encode(&serialized, target_encoding))?;

            outcome.delimiter = Some(inference.delimiter);
            outcome.rows = Some(table.row_count());
            outcome.columns = Some(table.headers.len());
        }
        (FileKind::PlainText, FileKind::PlainText) => {
            // Re-encode only; content untouched.
            fs::write(output, encoding::encode(&text, target_encoding))?;
        }
        (FileKind::PlainText, FileKind::Tabular) => {
            let sample = LineSample::from_text(&text, bytes.len() as u64, thresholds);
            let classification = classify(&sample, thresholds);

            let table = match (classification.potential_csv, classification.delimiter) {
                (true, Some(detected)) => {
                    tracing::info!(
                        delimiter = %detected,
                        confidence = classification.confidence,
                        "promoting text with detected delimiter"
                    );
                    promote_split(&text, detected)
                }
                _ => {
                    tracing::info!("no table structure detected, using single-column fallback");
                    outcome.single_column_fallback = true;
                    promote_single_column(&text)
                }
            };

            let out_delimiter = output_delimiter(output, requested);
            let serialized = table.to_delimited(out_delimiter)?;
            fs::write(output, encoding::encode(&serialized, target_encoding))?;

            outcome.delimiter = Some(out_delimiter);
            outcome.rows = Some(table.row_count());
            outcome.columns = Some(table.headers.len().max(1));
        }
    }

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        target = target_encoding.name(),
        "transform complete"
    );
    Ok(outcome)
}

/// Delimiter for a promoted table: the requested one, else the default for
/// the output extension.
fn output_delimiter(output: &Path, requested: Option<Delimiter>) -> Delimiter {
    requested.unwrap_or_else(|| {
        output
            .extension()
            .and_then(OsStr::to_str)
            .map(Delimiter::from_extension)
            .unwrap_or_default()
    })
}

/// Split every line on the detected delimiter, pad short rows out to the
/// widest row, and take the first line as the header. Rows are only ever
/// padded, never truncated, so promotion loses no data.
fn promote_split(text: &str, delimiter: Delimiter) -> Table {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut max_columns = 0;

    for line in text.lines() {
        let line = line.trim();
        let row: Vec<String> = if line.contains(delimiter.char()) {
            line.split(delimiter.char()).map(str::to_string).collect()
        } else {
            vec![line.to_string()]
        };
        max_columns = max_columns.max(row.len());
        rows.push(row);
    }

    for row in &mut rows {
        row.resize(max_columns, String::new());
    }

    let headers = if rows.is_empty() { Vec::new() } else { rows.remove(0) };
    Table { headers, rows }
}

/// One generic column, one row per non-empty line.
fn promote_single_column(text: &str) -> Table {
    Table {
        headers: vec![CONTENT_HEADER.to_string()],
        rows: text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| vec![line.to_string()])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_kind_from_suffix() {
        assert_eq!(
            FileKind::from_path(Path::new("data.csv")).unwrap(),
            FileKind::Tabular
        );
        assert_eq!(
            FileKind::from_path(Path::new("data.TSV")).unwrap(),
            FileKind::Tabular
        );
        assert_eq!(
            FileKind::from_path(Path::new("notes.txt")).unwrap(),
            FileKind::PlainText
        );
        assert_eq!(
            FileKind::from_path(Path::new("README")).unwrap(),
            FileKind::PlainText
        );
        assert!(matches!(
            FileKind::from_path(Path::new("report.pdf")),
            Err(Error::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn promotion_pads_short_rows() {
        let table = promote_split("a,b,c\nd,e\n", Delimiter::Comma);
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.rows, vec![vec!["d", "e", ""]]);
    }

    #[test]
    fn promotion_never_truncates_wide_rows() {
        let table = promote_split("a,b\nd,e,f,g\n", Delimiter::Comma);
        assert_eq!(table.headers, vec!["a", "b", "", ""]);
        assert_eq!(table.rows, vec![vec!["d", "e", "f", "g"]]);
    }

    #[test]
    fn promotion_wraps_delimiter_free_lines_as_one_cell() {
        let table = promote_split("a;b\nplain line\n1;2\n", Delimiter::Semicolon);
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec!["plain line", ""]);
        assert_eq!(table.rows[1], vec!["1", "2"]);
    }

    #[test]
    fn single_column_fallback_skips_empty_lines() {
        let table = promote_single_column("first\n\n  \nsecond\n");
        assert_eq!(table.headers, vec![CONTENT_HEADER]);
        assert_eq!(table.rows, vec![vec!["first"], vec!["second"]]);
    }

    #[test]
    fn output_delimiter_prefers_request_then_extension() {
        assert_eq!(
            output_delimiter(Path::new("out.tsv"), Some(Delimiter::Pipe)),
            Delimiter::Pipe
        );
        assert_eq!(
            output_delimiter(Path::new("out.tsv"), None),
            Delimiter::Tab
        );
        assert_eq!(
            output_delimiter(Path::new("out.csv"), None),
            Delimiter::Comma
        );
    }
}
