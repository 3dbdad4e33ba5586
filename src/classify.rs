//! Table-likeness classification for plain text files
//!
//! A plain text file declares no structure, so the classifier infers it from
//! regularity alone: delimiter frequency, line-length spread, and how closely
//! the lines after the first track the first line's delimiter count. The
//! thresholds involved are loose empirical cutoffs, not statistical tests.

use serde::Serialize;

use crate::config::Thresholds;
use crate::delimiter::Delimiter;

/// Lines fed to the classifier, plus the bookkeeping from reading them.
///
/// Small files carry every line. Large files carry the first
/// `sample_lines` lines plus about as many drawn from the midpoint, with
/// `total_lines` still counted over the whole text.
#[derive(Debug, Clone)]
pub struct LineSample {
    pub lines: Vec<String>,
    pub total_lines: usize,
    pub is_large_file: bool,
}

impl LineSample {
    /// Sample decoded text, switching strategy on the file's byte size.
    pub fn from_text(text: &str, byte_size: u64, thresholds: &Thresholds) -> LineSample {
        let is_large_file = byte_size > thresholds.large_file_bytes;

        if !is_large_file {
            let lines: Vec<String> = text.lines().map(str::to_string).collect();
            let total_lines = lines.len();
            return LineSample {
                lines,
                total_lines,
                is_large_file,
            };
        }

        // Exact count from a full scan; metrics use only the sample.
        let total_lines = text.lines().count();
        let head = thresholds.sample_lines;

        let mut lines: Vec<String> = text.lines().take(head).map(str::to_string).collect();

        if total_lines > 2 * head {
            let middle_start = (total_lines / 2).saturating_sub(head / 2).max(head);
            lines.extend(
                text.lines()
                    .skip(middle_start)
                    .take(head)
                    .map(str::to_string),
            );
        }

        tracing::debug!(
            byte_size,
            total_lines,
            sampled = lines.len(),
            "large file, classifying from a bounded sample"
        );

        LineSample {
            lines,
            total_lines,
            is_large_file,
        }
    }
}

/// What the classifier concluded about a plain text file.
#[derive(Debug, Clone, Serialize)]
pub struct LineClassification {
    pub line_count: usize,
    pub empty_lines: usize,
    pub avg_line_length: f64,
    pub consistent_line_length: bool,
    pub potential_csv: bool,
    /// Best-guess delimiter; absent when no structure was detected.
    pub delimiter: Option<Delimiter>,
    /// Fraction of sampled lines matching the header's delimiter count.
    /// Always in [0, 1]; zero whenever `potential_csv` is false.
    pub confidence: f64,
    pub is_large_file: bool,
}

/// Classify sampled lines as table-like or not.
pub fn classify(sample: &LineSample, thresholds: &Thresholds) -> LineClassification {
    let lines = &sample.lines;

    let empty_lines = lines.iter().filter(|l| l.trim().is_empty()).count();

    let total_chars: usize = lines.iter().map(|l| l.chars().count()).sum();
    let avg_line_length = total_chars as f64 / lines.len().max(1) as f64;

    // Loose fixed window, deliberately not a statistical spread test.
    let consistent_line_length = match (
        lines.iter().map(|l| l.chars().count()).min(),
        lines.iter().map(|l| l.chars().count()).max(),
    ) {
        (Some(min), Some(max)) => max - min < thresholds.line_length_window,
        _ => true,
    };

    // Provisional frequency winner across the whole sample. Only ever
    // overridden or discarded below; logged for diagnostics.
    if let Some((provisional, count)) = frequency_winner(lines.iter().map(String::as_str)) {
        tracing::trace!(delimiter = %provisional, count, "provisional delimiter vote");
    }

    let (potential_csv, delimiter, confidence) = csv_likeness(lines, thresholds);

    LineClassification {
        line_count: sample.total_lines,
        empty_lines,
        avg_line_length,
        consistent_line_length,
        potential_csv,
        delimiter,
        confidence,
        is_large_file: sample.is_large_file,
    }
}

/// Highest-count candidate over a set of lines, first maximum winning.
fn frequency_winner<'a>(lines: impl Iterator<Item = &'a str>) -> Option<(Delimiter, usize)> {
    let mut counts = [0usize; 4];
    for line in lines {
        for c in line.chars() {
            if let Some(d) = Delimiter::from_char(c) {
                counts[d as usize] += 1;
            }
        }
    }
    let mut best = None;
    for d in Delimiter::ALL {
        let count = counts[d as usize];
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((d, count));
        }
    }
    best
}

fn count_in_line(line: &str, delimiter: Delimiter) -> usize {
    line.chars().filter(|&c| c == delimiter.char()).count()
}

/// The header line is load-bearing: if the first line carries no candidate
/// delimiter the file is never potential CSV, no matter what follows.
fn csv_likeness(
    lines: &[String],
    thresholds: &Thresholds,
) -> (bool, Option<Delimiter>, f64) {
    let Some(first) = lines.first() else {
        return (false, None, 0.0);
    };

    let Some((header_delimiter, expected)) = frequency_winner(std::iter::once(first.as_str()))
    else {
        return (false, None, 0.0);
    };

    let followers: Vec<&String> = lines[1..].iter().filter(|l| !l.trim().is_empty()).collect();
    let matching = followers
        .iter()
        .filter(|l| {
            count_in_line(l, header_delimiter).abs_diff(expected) <= thresholds.delimiter_tolerance
        })
        .count();

    let fraction = matching as f64 / followers.len().max(1) as f64;

    if matching as f64 >= thresholds.csv_line_fraction * followers.len() as f64 {
        tracing::debug!(
            delimiter = %header_delimiter,
            confidence = fraction,
            "lines track the header delimiter count, potential CSV"
        );
        (true, Some(header_delimiter), fraction)
    } else {
        (false, None, 0.0)
    }
}
