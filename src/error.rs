//! Error types for the inspection engine
//!
//! Only fatal conditions live here: unreadable input, undetectable or unknown
//! encodings, unsupported file types. Structural problems (ragged columns,
//! empty cells, low CSV confidence) are report fields, never errors —
//! verification always completes and produces a report.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Character encoding could not be determined: empty input, or the
    /// statistical detector stayed below its confidence floor.
    DetectionFailure,
    /// Target encoding label not recognized (e.g. a typo in `--encoding`).
    UnknownEncoding(String),
    /// File extension outside the recognized tabular/plain-text set.
    UnsupportedFileType(String),
    /// Requested path does not exist.
    MissingFile(PathBuf),
    /// Underlying I/O failure while reading or writing a file.
    Io(io::Error),
    /// The CSV parser rejected the input.
    Parse(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DetectionFailure => {
                write!(f, "could not determine character encoding")
            }
            Error::UnknownEncoding(label) => {
                write!(f, "unknown encoding label: {label:?}")
            }
            Error::UnsupportedFileType(ext) => {
                write!(f, "unsupported file type: {ext}")
            }
            Error::MissingFile(path) => {
                write!(f, "file not found: {}", path.display())
            }
            Error::Io(e) => write!(f, "i/o error: {e}"),
            Error::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Parse(e)
    }
}
