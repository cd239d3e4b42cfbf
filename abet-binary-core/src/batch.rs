//! Batch conversion of a directory of raw exports.
//!
//! Files are converted one at a time in file-name order. A file that cannot be
//! converted is reported and the batch moves on; only a missing input
//! directory or an output directory that cannot be created stops the batch.

use crate::aligner::align_events;
use crate::error::ConvertError;
use crate::header::scan_header;
use crate::mapping::DEFAULT_PREFIX;
use crate::output::{output_file_name, write_csv};
use crate::parser::parse_table;
use crate::types::{BinaryTable, SessionMetadata};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for a batch conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory holding the raw exports
    pub input_dir: PathBuf,
    /// Directory receiving the binary tables (created if absent)
    pub output_dir: PathBuf,
    /// File-name prefix of eligible exports
    pub prefix: String,
}

impl ConvertOptions {
    /// Creates options with the default `TCN` prefix.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Sets the file-name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// A converted export held in memory.
#[derive(Debug, Clone)]
pub struct ConvertedTable {
    pub table: BinaryTable,
    pub metadata: SessionMetadata,
}

/// Converts the text of one raw export. Pure: the same text always gives the same table.
pub fn convert_content(content: &str) -> Result<ConvertedTable, ConvertError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let header = scan_header(content)?;
    log::debug!(
        "Event table starts at line {} (animal: {:?}, date/time: {:?})",
        header.data_start + 1,
        header.metadata.animal_id,
        header.metadata.date_time
    );

    let rows = parse_table(content, header.data_start)?;
    let table = align_events(&rows);

    Ok(ConvertedTable {
        table,
        metadata: header.metadata,
    })
}

/// Converts one raw export file and writes its binary table into `output_dir`.
///
/// Nothing is written unless the whole file converts. Returns the output path
/// and the number of rows written.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    path: P,
    output_dir: Q,
) -> Result<(PathBuf, usize), ConvertError> {
    let path = path.as_ref();
    let content = String::from_utf8(fs::read(path)?)?;
    let converted = convert_content(&content)?;

    let original_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_path = output_dir
        .as_ref()
        .join(output_file_name(&converted.metadata, &original_name));

    write_csv(&output_path, &converted.table)?;
    Ok((output_path, converted.table.len()))
}

/// What happened to a single input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The binary table was written. `replaces` names an earlier input of the
    /// same batch whose output had the same name and was overwritten.
    Written {
        output: PathBuf,
        rows: usize,
        replaces: Option<PathBuf>,
    },
    /// The file has no event table and was left alone.
    Skipped { reason: ConvertError },
    /// Conversion failed; no output was written.
    Failed { error: ConvertError },
}

/// Outcome for one input file.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    /// File name of the input, for display.
    pub fn file_name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

/// Per-file outcomes of a batch run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Number of files written.
    pub fn written(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Written { .. }))
    }

    /// Number of files skipped for lack of an event table.
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Skipped { .. }))
    }

    /// Number of files that failed to convert.
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Converts every eligible export in a directory.
#[derive(Debug)]
pub struct BatchConverter {
    options: ConvertOptions,
    /// Output path -> input that produced it, for this batch
    outputs: HashMap<PathBuf, PathBuf>,
}

impl BatchConverter {
    /// Validates the input directory and creates the output directory.
    pub fn new(options: ConvertOptions) -> Result<Self, ConvertError> {
        if !options.input_dir.is_dir() {
            return Err(ConvertError::InputDirNotFound(options.input_dir));
        }
        fs::create_dir_all(&options.output_dir)?;
        Ok(Self {
            options,
            outputs: HashMap::new(),
        })
    }

    /// Lists eligible input files, sorted by file name.
    pub fn files(&self) -> Result<Vec<PathBuf>, ConvertError> {
        eligible_files(&self.options.input_dir, &self.options.prefix)
    }

    /// Converts one input file, turning any error into a reported outcome.
    pub fn process(&mut self, path: &Path) -> FileReport {
        let outcome = match convert_file(path, &self.options.output_dir) {
            Ok((output, rows)) => {
                log::info!("{} -> {} ({} rows)", path.display(), output.display(), rows);
                let replaces = self.outputs.insert(output.clone(), path.to_path_buf());
                if let Some(earlier) = &replaces {
                    log::warn!(
                        "{} overwrote {}, written earlier from {}",
                        path.display(),
                        output.display(),
                        earlier.display()
                    );
                }
                FileOutcome::Written {
                    output,
                    rows,
                    replaces,
                }
            }
            Err(reason) if reason.is_skip() => {
                log::warn!("Skipping {}: {}", path.display(), reason);
                FileOutcome::Skipped { reason }
            }
            Err(error) => {
                log::warn!("Failed to convert {}: {}", path.display(), error);
                FileOutcome::Failed { error }
            }
        };

        FileReport {
            input: path.to_path_buf(),
            outcome,
        }
    }

    /// Converts every eligible file.
    pub fn run(&mut self) -> Result<BatchReport, ConvertError> {
        let files = self.files()?;
        log::debug!(
            "Found {} eligible files in {}",
            files.len(),
            self.options.input_dir.display()
        );

        let mut report = BatchReport::default();
        for path in &files {
            report.files.push(self.process(path));
        }
        Ok(report)
    }
}

/// Converts every eligible export in `options.input_dir`.
pub fn convert_directory(options: ConvertOptions) -> Result<BatchReport, ConvertError> {
    BatchConverter::new(options)?.run()
}

/// Lists regular files in `dir` whose names start with `prefix` and end in `.csv`.
pub fn eligible_files<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<Vec<PathBuf>, ConvertError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ConvertError::InputDirNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            log::debug!("Ignoring {}: file name is not valid UTF-8", path.display());
            continue;
        };
        let eligible = name.starts_with(prefix) && name.ends_with(".csv");
        if eligible && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
