//! Converter for ABET II touchscreen raw exports.
//!
//! This crate turns the raw event logs written by ABET II rodent touchscreen
//! tasks into binary event tables: one output row per raw event, one 0/1
//! column per tracked event type, and four outcome columns aligned to the
//! trial-start ("Display Image") marker.
//!
//! # Example
//!
//! ```no_run
//! use abet_binary_core::{convert_directory, ConvertOptions};
//!
//! let report = convert_directory(ConvertOptions::new("raw", "binary")).unwrap();
//!
//! println!("Converted {} files", report.written());
//! ```
//!
//! # Pipeline
//!
//! - [`header`] finds the event table and the subject/session metadata
//! - [`parser`] reads the event table into [`RawEventRow`]s
//! - [`aligner`] builds the [`BinaryTable`]
//! - [`output`] names and writes the CSV
//! - [`batch`] drives the above over a directory

pub mod aligner;
pub mod batch;
pub mod error;
pub mod header;
pub mod mapping;
pub mod output;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use aligner::align_events;
pub use batch::{
    convert_content, convert_directory, convert_file, eligible_files, BatchConverter, BatchReport,
    ConvertOptions, ConvertedTable, FileOutcome, FileReport,
};
pub use error::ConvertError;
pub use header::{scan_header, HeaderInfo};
pub use types::{BinaryRow, BinaryTable, RawEventRow, SessionMetadata};
