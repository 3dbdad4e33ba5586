//! Delimiter candidates and frequency-based inference
//!
//! The candidate set is closed: comma, semicolon, tab, pipe. Inference never
//! fails — when no candidate appears in the sample it degrades to the
//! requested (or default) delimiter and flags the low confidence instead.

use std::fmt;

use serde::Serialize;

/// Supported cell delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl Delimiter {
    /// All candidates, in voting order.
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
    ];

    /// Get the character for this delimiter.
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Byte form, as the `csv` crate wants it.
    pub fn as_byte(self) -> u8 {
        self.char() as u8
    }

    /// Map a character back to a candidate, if it is one.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Delimiter::Comma),
            ';' => Some(Delimiter::Semicolon),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }

    /// Default delimiter for a file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            _ => Delimiter::Comma,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "\\t"),
            other => write!(f, "{}", other.char()),
        }
    }
}

/// Outcome of a delimiter frequency scan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Inference {
    pub delimiter: Delimiter,
    /// Occurrences of the chosen delimiter in the sampled prefix.
    pub count: usize,
    /// False when no candidate appeared at all and we fell back blindly.
    pub confident: bool,
    /// True when the requested delimiter was absent and the scan chose one.
    pub auto_detected: bool,
}

/// Count each candidate delimiter in the first `sample_chars` characters.
fn candidate_counts(sample: &str, sample_chars: usize) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for c in sample.chars().take(sample_chars) {
        if let Some(d) = Delimiter::from_char(c) {
            counts[d as usize] += 1;
        }
    }
    counts
}

/// Infer the delimiter for a text sample.
///
/// A requested delimiter wins as long as it occurs at all; otherwise the
/// highest-count candidate is chosen. When every count is zero the requested
/// (or default comma) delimiter is returned with `confident = false` —
/// inference degrades, it never fails.
pub fn infer(sample: &str, requested: Option<Delimiter>, sample_chars: usize) -> Inference {
    let counts = candidate_counts(sample, sample_chars);

    if let Some(req) = requested {
        let count = counts[req as usize];
        if count > 0 {
            return Inference {
                delimiter: req,
                count,
                confident: true,
                auto_detected: false,
            };
        }
        tracing::debug!(
            requested = %req,
            "requested delimiter absent from sample, auto-detecting"
        );
    }

    // First maximum wins, in candidate order.
    let mut best = Delimiter::Comma;
    let mut best_count = 0;
    for d in Delimiter::ALL {
        if counts[d as usize] > best_count {
            best = d;
            best_count = counts[d as usize];
        }
    }

    if best_count == 0 {
        let fallback = requested.unwrap_or_default();
        tracing::debug!(%fallback, "no candidate delimiter found in sample");
        return Inference {
            delimiter: fallback,
            count: 0,
            confident: false,
            auto_detected: false,
        };
    }

    Inference {
        delimiter: best,
        count: best_count,
        confident: true,
        auto_detected: true,
    }
}
