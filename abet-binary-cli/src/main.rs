//! ABET II binary converter CLI application.
//!
//! Converts a directory of ABET II raw exports into binary event tables.

use abet_binary_core::{BatchConverter, BatchReport, ConvertOptions, FileOutcome, FileReport};
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

/// ABET II raw export to binary event table converter.
///
/// Every file in INPUT_DIR whose name starts with the prefix and ends in .csv
/// is converted into a 0/1 event table in OUTPUT_DIR.
#[derive(Parser, Debug)]
#[command(name = "abet-binary")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the raw ABET II exports
    #[arg(value_name = "INPUT_DIR")]
    input: PathBuf,

    /// Directory for the binary tables (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,

    /// File-name prefix of the exports to convert
    #[arg(short, long, default_value = "TCN")]
    prefix: String,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress and summary output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    log::debug!("abet-binary v{}", env!("CARGO_PKG_VERSION"));

    let options = ConvertOptions::new(&args.input, &args.output).with_prefix(&args.prefix);
    let mut converter = BatchConverter::new(options).with_context(|| {
        format!(
            "Failed to prepare conversion from {:?} to {:?}",
            args.input, args.output
        )
    })?;
    let files = converter
        .files()
        .with_context(|| format!("Failed to list {:?}", args.input))?;

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {bar:30} {pos}/{len} {msg}")?,
        );
        pb
    };

    let start_time = Instant::now();
    let mut report = BatchReport::default();

    for path in &files {
        progress.set_message(format!("{:?}", path.file_name().unwrap_or_default()));
        let file_report = converter.process(path);
        progress.suspend(|| println!("{}", status_line(&file_report)));
        progress.inc(1);
        report.files.push(file_report);
    }

    let total_duration = start_time.elapsed();

    progress.finish_with_message(format!(
        "Done! Converted {} of {} files in {:.2}s",
        report.written(),
        files.len(),
        total_duration.as_secs_f64()
    ));

    if !args.quiet {
        eprintln!();
        eprintln!("Summary:");
        eprintln!("  Input:      {:?}", args.input);
        eprintln!("  Output:     {:?}", args.output);
        eprintln!("  Prefix:     {}", args.prefix);
        eprintln!("  Converted:  {}", report.written());
        eprintln!("  Skipped:    {}", report.skipped());
        eprintln!("  Failed:     {}", report.failed());
        eprintln!("  Duration:   {:.3}s", total_duration.as_secs_f64());
    }

    Ok(())
}

/// The per-file line printed to standard output.
fn status_line(report: &FileReport) -> String {
    let file = report.file_name();
    match &report.outcome {
        FileOutcome::Written {
            output, replaces, ..
        } => {
            let output = output
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            match replaces {
                Some(earlier) => format!(
                    "Successfully processed: {} -> {} (overwrote output of {})",
                    file,
                    output,
                    earlier
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| earlier.display().to_string())
                ),
                None => format!("Successfully processed: {} -> {}", file, output),
            }
        }
        FileOutcome::Skipped { .. } => {
            format!("Skipping file {}: 'Evnt_Time' column not found.", file)
        }
        FileOutcome::Failed { error } => format!("Error processing file {}: {}", file, error),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    // Per-file results already go to stdout, so the default only shows errors.
    let level = if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use abet_binary_core::ConvertError;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["abet-binary", "raw", "out"]);
        assert_eq!(args.input, PathBuf::from("raw"));
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.prefix, "TCN");
        assert_eq!(args.verbose, 0);

        let args = Args::parse_from(["abet-binary", "raw", "out", "--prefix", "ABC", "-vv", "-q"]);
        assert_eq!(args.prefix, "ABC");
        assert_eq!(args.verbose, 2);
        assert!(args.quiet);
    }

    #[test]
    fn test_status_lines() {
        let written = FileReport {
            input: PathBuf::from("raw/TCN_1.csv"),
            outcome: FileOutcome::Written {
                output: PathBuf::from("out/RAT01_2025-03-10_10_30_00.csv"),
                rows: 10,
                replaces: None,
            },
        };
        assert_eq!(
            status_line(&written),
            "Successfully processed: TCN_1.csv -> RAT01_2025-03-10_10_30_00.csv"
        );

        let overwrote = FileReport {
            input: PathBuf::from("raw/TCN_1b.csv"),
            outcome: FileOutcome::Written {
                output: PathBuf::from("out/RAT01_2025-03-10_10_30_00.csv"),
                rows: 4,
                replaces: Some(PathBuf::from("raw/TCN_1.csv")),
            },
        };
        assert_eq!(
            status_line(&overwrote),
            "Successfully processed: TCN_1b.csv -> RAT01_2025-03-10_10_30_00.csv (overwrote output of TCN_1.csv)"
        );

        let skipped = FileReport {
            input: PathBuf::from("raw/TCN_2.csv"),
            outcome: FileOutcome::Skipped {
                reason: ConvertError::MissingDataMarker,
            },
        };
        assert_eq!(
            status_line(&skipped),
            "Skipping file TCN_2.csv: 'Evnt_Time' column not found."
        );

        let failed = FileReport {
            input: PathBuf::from("raw/TCN_3.csv"),
            outcome: FileOutcome::Failed {
                error: ConvertError::MalformedRow {
                    line: 12,
                    reason: "expected 6 fields, saw 7".to_string(),
                },
            },
        };
        assert_eq!(
            status_line(&failed),
            "Error processing file TCN_3.csv: Malformed row at line 12: expected 6 fields, saw 7"
        );
    }
}
