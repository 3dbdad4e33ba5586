//! Heuristic thresholds for structure inference
//!
//! Every cutoff in the engine is an empirical constant tuned on real-world
//! files, not a value derived from theory. They are collected here as named,
//! overridable fields so callers can retune them without touching the
//! algorithms.

use serde::{Deserialize, Serialize};

/// Header name used when plain text is flattened to a single-column table.
///
/// Shared by the promoter (which writes it) and the verifier (which relaxes
/// the column-consistency rule when it sees it). Files carrying exactly this
/// single header are treated as deliberately unstructured rather than broken.
pub const CONTENT_HEADER: &str = "Content";

/// Tunable cutoffs used by delimiter inference, verification, and
/// classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// A column is numeric when more than this fraction of its observed
    /// values parse as non-negative decimals.
    pub numeric_fraction: f64,
    /// Allowed deviation from the header line's delimiter count before a
    /// data line stops counting as a match.
    pub delimiter_tolerance: usize,
    /// Fraction of subsequent non-empty lines that must match the header's
    /// delimiter count for a file to classify as potential CSV.
    pub csv_line_fraction: f64,
    /// Maximum spread (max - min) of sampled line lengths, in characters,
    /// still reported as consistent.
    pub line_length_window: usize,
    /// Files larger than this many bytes are sampled instead of having every
    /// line inspected.
    pub large_file_bytes: u64,
    /// Prefix length, in characters, used for delimiter frequency counting.
    pub sample_chars: usize,
    /// Number of lines taken from the head and again from the midpoint of a
    /// large file.
    pub sample_lines: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            numeric_fraction: 0.8,
            delimiter_tolerance: 2,
            csv_line_fraction: 0.7,
            line_length_window: 10,
            large_file_bytes: 10 * 1024 * 1024,
            sample_chars: 4096,
            sample_lines: 100,
        }
    }
}
