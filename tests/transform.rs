//! Transformation tests
//!
//! On-disk behavior matrix: tabular re-serialization, text re-encoding, and
//! plain-text promotion with its padding and fallback rules.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use tabcheck::{encoding, transform, verify_file, Table};
use tabcheck::{Delimiter, Error, FileKind, Thresholds, CONTENT_HEADER};

fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn utf8() -> &'static encoding_rs::Encoding {
    encoding::by_label("utf-8").unwrap()
}

// ========================================================================
// Tabular -> tabular
// ========================================================================

#[test]
fn round_trip_preserves_headers_and_cells() {
    let dir = TempDir::new().unwrap();
    let content = "name,notes\nAlice,\"likes, commas\"\nBob,plain\n";
    let input = write(&dir, "in.csv", content.as_bytes());
    let output = dir.path().join("out.csv");

    let outcome = transform(
        &input,
        &output,
        utf8(),
        Some(Delimiter::Comma),
        &Thresholds::default(),
    )
    .unwrap();

    assert_eq!(outcome.input_kind, FileKind::Tabular);
    assert_eq!(outcome.rows, Some(2));
    assert_eq!(outcome.columns, Some(2));

    let original = Table::parse(content, Delimiter::Comma).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    let reparsed = Table::parse(&written, Delimiter::Comma).unwrap();
    assert_eq!(original, reparsed);
}

#[test]
fn ragged_tabular_input_round_trips_unchanged() {
    // Inconsistent row widths are a reported anomaly, not a fatal error;
    // the transform must re-serialize them as-is.
    let dir = TempDir::new().unwrap();
    let content = "a,b,c\n1,2\n1,2,3,4\n";
    let input = write(&dir, "ragged.csv", content.as_bytes());
    let output = dir.path().join("out.csv");

    let outcome = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap();
    assert_eq!(outcome.rows, Some(2));

    let written = fs::read_to_string(&output).unwrap();
    let reparsed = Table::parse(&written, Delimiter::Comma).unwrap();
    assert_eq!(reparsed.rows[0], vec!["1", "2"]);
    assert_eq!(reparsed.rows[1], vec!["1", "2", "3", "4"]);
}

#[test]
fn tabular_transform_auto_detects_the_delimiter() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.csv", b"a;b\n1;2\n3;4\n");
    let output = dir.path().join("out.csv");

    let outcome = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap();
    assert_eq!(outcome.delimiter, Some(Delimiter::Semicolon));

    let written = fs::read_to_string(&output).unwrap();
    let reparsed = Table::parse(&written, Delimiter::Semicolon).unwrap();
    assert_eq!(reparsed.headers, vec!["a", "b"]);
    assert_eq!(reparsed.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
}

#[test]
fn tabular_transform_reencodes_to_the_target() {
    let dir = TempDir::new().unwrap();
    let latin1 = encoding::by_label("windows-1252").unwrap();
    let text = "nom;ville;région\nJosé;Orléans;Centre\nAgnès;Nîmes;Occitanie\n";
    let input = write(&dir, "eu.csv", &encoding::encode(text, latin1));
    let output = dir.path().join("out.csv");

    let outcome = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap();
    assert_eq!(outcome.source_encoding, "windows-1252");
    assert_eq!(outcome.target_encoding, "UTF-8");

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("Orléans"));
    assert!(written.contains("Agnès"));
}

// ========================================================================
// Plain text -> plain text
// ========================================================================

#[test]
fn text_to_text_only_reencodes() {
    let dir = TempDir::new().unwrap();
    let latin1 = encoding::by_label("windows-1252").unwrap();
    let text = "première ligne\ndeuxième ligne\ntroisième ligne\n";
    let input = write(&dir, "in.txt", &encoding::encode(text, latin1));
    let output = dir.path().join("out.txt");

    let outcome = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap();
    assert_eq!(outcome.rows, None);
    assert_eq!(outcome.delimiter, None);

    assert_eq!(fs::read_to_string(&output).unwrap(), text);
}

// ========================================================================
// Plain text -> tabular (promotion)
// ========================================================================

#[test]
fn promotion_splits_and_pads_rows() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.txt", b"a,b,c\nd,e\n1,2,3\n4,5,6\n");
    let output = dir.path().join("out.csv");

    let outcome = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap();
    assert!(!outcome.single_column_fallback);
    assert_eq!(outcome.columns, Some(3));

    let table = Table::parse(&fs::read_to_string(&output).unwrap(), Delimiter::Comma).unwrap();
    assert_eq!(table.headers, vec!["a", "b", "c"]);
    // Short row padded with an empty cell, never truncated.
    assert_eq!(table.rows[0], vec!["d", "e", ""]);
    assert_eq!(table.rows[1], vec!["1", "2", "3"]);
}

#[test]
fn unstructured_text_degrades_to_single_column() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "in.txt",
        b"shopping list\nbread\n\nmilk\neggs and butter\n",
    );
    let output = dir.path().join("out.csv");

    let outcome = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap();
    assert!(outcome.single_column_fallback);
    assert_eq!(outcome.columns, Some(1));

    let table = Table::parse(&fs::read_to_string(&output).unwrap(), Delimiter::Comma).unwrap();
    assert_eq!(table.headers, vec![CONTENT_HEADER]);
    // One row per non-empty line; the original first line is data here,
    // not a header.
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.rows[0], vec!["shopping list"]);
    assert_eq!(table.rows[1], vec!["bread"]);
}

#[test]
fn promoted_single_column_file_verifies_as_consistent() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.txt", b"alpha\nbeta\ngamma\n");
    let output = dir.path().join("out.csv");

    transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap();

    let report = verify_file(&output, None, &Thresholds::default()).unwrap();
    assert!(report.single_column);
    assert!(report.consistent_columns);
    assert_eq!(report.row_count, 3);
}

#[test]
fn promotion_to_tsv_defaults_to_tab_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.txt", b"x,y\n1,2\n3,4\n5,6\n");
    let output = dir.path().join("out.tsv");

    let outcome = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap();
    assert_eq!(outcome.delimiter, Some(Delimiter::Tab));

    let table = Table::parse(&fs::read_to_string(&output).unwrap(), Delimiter::Tab).unwrap();
    assert_eq!(table.headers, vec!["x", "y"]);
    assert_eq!(table.rows[0], vec!["1", "2"]);
}

// ========================================================================
// Failure modes
// ========================================================================

#[test]
fn unsupported_extensions_abort() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "report.xlsx", b"whatever");
    let output = dir.path().join("out.csv");

    let err = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFileType(_)));
}

#[test]
fn missing_input_aborts() {
    let err = transform(
        &PathBuf::from("/no/such/input.csv"),
        &PathBuf::from("/tmp/out.csv"),
        utf8(),
        None,
        &Thresholds::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingFile(_)));
}

#[test]
fn empty_input_fails_detection_before_writing() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "empty.csv", b"");
    let output = dir.path().join("out.csv");

    let err = transform(&input, &output, utf8(), None, &Thresholds::default()).unwrap_err();
    assert!(matches!(err, Error::DetectionFailure));
    assert!(!output.exists());
}
