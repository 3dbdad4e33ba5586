//! Character encoding detection and transcoding
//!
//! Statistical charset sniffing via `chardetng`, with encodings represented
//! as `encoding_rs::Encoding` references throughout. Valid UTF-8 is checked
//! first so the common case never depends on the statistical guesser.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};

/// Detect the character encoding of a byte sample.
///
/// Deterministic for a fixed input. Fails on empty input, or when the
/// sniffer's best guess does not score above its fallback.
pub fn detect(bytes: &[u8]) -> Result<&'static Encoding> {
    if bytes.is_empty() {
        return Err(Error::DetectionFailure);
    }

    // UTF-8 first: no false positives on the common case.
    if std::str::from_utf8(bytes).is_ok() {
        return Ok(UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let (encoding, confident) = detector.guess_assess(None, true);

    if !confident {
        tracing::debug!(
            guess = encoding.name(),
            "encoding sniffer below confidence floor"
        );
        return Err(Error::DetectionFailure);
    }

    tracing::debug!(encoding = encoding.name(), "detected encoding");
    Ok(encoding)
}

/// Resolve an encoding by its WHATWG label (e.g. `"utf-8"`, `"windows-1252"`).
pub fn by_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Decode bytes with the given encoding, replacing malformed sequences.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = encoding.name(),
            "malformed sequences replaced during decode"
        );
    }
    text.into_owned()
}

/// Encode text with the given encoding, replacing unmappable characters.
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        tracing::warn!(
            encoding = encoding.name(),
            "unmappable characters replaced during encode"
        );
    }
    bytes.into_owned()
}
