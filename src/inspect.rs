//! File-level inspection entry points
//!
//! Reads a file once, detects its encoding, and routes to tabular
//! verification or plain-text classification based on the file-name suffix.
//! Every path returns a fully-populated report or a typed error; structural
//! problems live inside the reports.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::classify::{classify, LineClassification, LineSample};
use crate::config::Thresholds;
use crate::delimiter::{infer, Delimiter};
use crate::encoding;
use crate::error::{Error, Result};
use crate::table::Table;
use crate::transform::FileKind;
use crate::verify::{verify, FileMeta, VerificationReport};

/// Report for a single inspected file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inspection {
    Tabular(VerificationReport),
    Text(LineClassification),
}

/// Inspect a file, choosing verification or classification by suffix.
pub fn inspect(
    path: &Path,
    requested: Option<Delimiter>,
    thresholds: &Thresholds,
) -> Result<Inspection> {
    match FileKind::from_path(path)? {
        FileKind::Tabular => Ok(Inspection::Tabular(verify_file(
            path, requested, thresholds,
        )?)),
        FileKind::PlainText => Ok(Inspection::Text(classify_file(path, thresholds)?)),
    }
}

/// Parse a tabular file and report on its structure.
pub fn verify_file(
    path: &Path,
    requested: Option<Delimiter>,
    thresholds: &Thresholds,
) -> Result<VerificationReport> {
    let (bytes, size_bytes) = read_existing(path)?;
    let source_encoding = encoding::detect(&bytes)?;
    let text = encoding::decode(&bytes, source_encoding);

    let inference = infer(&text, requested, thresholds.sample_chars);
    if !inference.confident {
        tracing::warn!(
            path = %path.display(),
            delimiter = %inference.delimiter,
            "no delimiter found in sample, report may be misleading"
        );
    }

    let table = Table::parse(&text, inference.delimiter)?;
    let meta = FileMeta {
        path: path.to_path_buf(),
        size_bytes,
        encoding: source_encoding.name().to_string(),
        delimiter: inference.delimiter,
    };
    Ok(verify(&table, meta, thresholds))
}

/// Sample a plain text file and classify its structure.
pub fn classify_file(path: &Path, thresholds: &Thresholds) -> Result<LineClassification> {
    let (bytes, size_bytes) = read_existing(path)?;
    let source_encoding = encoding::detect(&bytes)?;
    let text = encoding::decode(&bytes, source_encoding);

    let sample = LineSample::from_text(&text, size_bytes, thresholds);
    Ok(classify(&sample, thresholds))
}

fn read_existing(path: &Path) -> Result<(Vec<u8>, u64)> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let size = fs::metadata(path)?.len();
    let bytes = fs::read(path)?;
    Ok((bytes, size))
}
