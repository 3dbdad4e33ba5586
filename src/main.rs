//! Command-line front end
//!
//! Thin glue over the engine: parse arguments, resolve the input path
//! (fuzzy lookup when asked), invoke the inspection or transform operation,
//! and render the returned report structures.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use tabcheck::cli::CliArgs;
use tabcheck::{encoding, finder, inspect, logging, render, transform};
use tabcheck::{Delimiter, Error, Inspection, Thresholds};

fn main() -> Result<()> {
    logging::init();
    let args = CliArgs::parse();
    run(args)
}

fn run(args: CliArgs) -> Result<()> {
    let thresholds = Thresholds::default();
    let requested = args.requested_delimiter().map_err(|e| anyhow!(e))?;

    let path = resolve_input(&args)?;

    if args.transform {
        let target = encoding::by_label(&args.encoding)?;
        let output = match &args.output {
            Some(path) => path.clone(),
            None => {
                let derived = args.default_output_path();
                eprintln!("No output file specified, using {}", derived.display());
                derived
            }
        };

        let outcome = transform::transform(&path, &output, target, requested, &thresholds)
            .with_context(|| format!("failed to transform {}", path.display()))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print!("{}", render::outcome(&outcome));
        }

        if args.verify_after {
            report(&output, requested, &thresholds, args.json)?;
        }
        return Ok(());
    }

    report(&path, requested, &thresholds, args.json)
}

/// Inspect one file and print its report.
fn report(
    path: &Path,
    requested: Option<Delimiter>,
    thresholds: &Thresholds,
    json: bool,
) -> Result<()> {
    let inspection = inspect::inspect(path, requested, thresholds)
        .with_context(|| format!("failed to inspect {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    match &inspection {
        Inspection::Tabular(report) => {
            print!("{}", render::verification(report));
            print!("\n{}", render::table_preview(report, 5));
        }
        Inspection::Text(classification) => {
            print!("{}", render::classification(path, classification));
            print!("\n{}", render::text_preview(path, 3));
        }
    }
    Ok(())
}

/// Resolve the input path, falling back to fuzzy lookup for missing files.
fn resolve_input(args: &CliArgs) -> Result<PathBuf> {
    if args.file.exists() && !args.find {
        return Ok(args.file.clone());
    }

    if let Some(found) = finder::resolve(&args.file) {
        if found != args.file {
            eprintln!("File not found, using similar file: {}", found.display());
        }
        return Ok(found);
    }

    let candidates = finder::similar_files(&args.file);
    if !candidates.is_empty() {
        eprintln!("File not found. Similar files in that directory:");
        for candidate in &candidates {
            eprintln!("  {}", candidate.display());
        }
    }
    bail!(Error::MissingFile(args.file.clone()))
}
