//! tabcheck - structure and encoding inspection for delimited text files
//!
//! Inspects delimited text files of unknown or inconsistent encoding and
//! structure, infers their tabular shape, reports structural health, and can
//! normalize them into a canonical encoding/delimiter form.
//!
//! Data flows one direction: raw bytes -> detected encoding -> decoded text
//! -> delimiter inference -> parsed rows -> verification/classification ->
//! optional re-serialization. Each stage returns a fresh immutable result;
//! nothing is mutated in place and no state is shared across calls.
//!
//! Structural problems are never errors: verification and classification
//! always complete and return a report, even for badly malformed input. Only
//! undetectable encodings, unsupported file types, and missing files fail.

pub mod classify;
pub mod cli;
pub mod config;
pub mod delimiter;
pub mod encoding;
pub mod error;
pub mod finder;
pub mod inspect;
pub mod logging;
pub mod render;
pub mod table;
pub mod transform;
pub mod verify;

// Re-export commonly used types
pub use classify::{classify, LineClassification, LineSample};
pub use config::{Thresholds, CONTENT_HEADER};
pub use delimiter::{infer, Delimiter, Inference};
pub use error::{Error, Result};
pub use inspect::{classify_file, inspect, verify_file, Inspection};
pub use table::Table;
pub use transform::{transform, FileKind, TransformOutcome};
pub use verify::{verify, ColumnType, FileMeta, VerificationReport};
