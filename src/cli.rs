//! Command-line argument parsing
//!
//! One positional file plus flags mirroring the two modes: report on a file
//! (the default) or transform it to a target encoding/delimiter form.

use clap::Parser;
use std::path::PathBuf;

use crate::delimiter::Delimiter;

/// Verify and normalize delimited text files
#[derive(Parser, Debug)]
#[command(
    name = "tabcheck",
    version,
    about = "Verify, classify, and normalize delimited text files"
)]
pub struct CliArgs {
    /// File to verify or transform
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Cell delimiter: ',', ';', '|', 'tab', or 'auto'
    #[arg(short, long, default_value = "auto")]
    pub delimiter: String,

    /// Transform the file instead of only reporting on it
    #[arg(short, long)]
    pub transform: bool,

    /// Output path for --transform (defaults to a sibling of the input)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Target encoding label for --transform
    #[arg(short, long, default_value = "utf-8", value_name = "LABEL")]
    pub encoding: String,

    /// Look for similarly named files when the path does not exist
    #[arg(long)]
    pub find: bool,

    /// Verify the output file after a transform
    #[arg(long)]
    pub verify_after: bool,

    /// Emit reports as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Resolve the delimiter flag: `auto` (or empty) means auto-detect.
    pub fn requested_delimiter(&self) -> Result<Option<Delimiter>, String> {
        // No trimming: a literal tab argument is a valid delimiter.
        let raw = self.delimiter.as_str();
        match raw {
            "" | "auto" => Ok(None),
            "tab" | "\\t" => Ok(Some(Delimiter::Tab)),
            _ => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Delimiter::from_char(c).map(Some).ok_or_else(|| {
                        format!("'{c}' is not a supported delimiter (use , ; | or tab)")
                    }),
                    _ => Err(format!(
                        "invalid delimiter {raw:?} (use a single character or 'auto')"
                    )),
                }
            }
        }
    }

    /// Default output path when `--transform` is given without `--output`:
    /// same directory and stem, `.txt`/extensionless inputs become `.csv`,
    /// everything else keeps its extension.
    pub fn default_output_path(&self) -> PathBuf {
        let mut path = self.file.clone();
        // Case-insensitive, matching the kind dispatch in transform.
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.eq_ignore_ascii_case("txt") => {}
            _ => {
                path.set_extension("csv");
            }
        }
        path
    }
}
