//! Header scanning for ABET II raw exports.
//!
//! A raw export starts with free-text metadata lines (`label,value,...`)
//! followed by the event table, whose column header contains `Evnt_Time`.

use crate::error::ConvertError;
use crate::mapping::{ANIMAL_ID_LABEL, DATA_MARKER, DATE_TIME_LABEL};
use crate::types::SessionMetadata;

/// Result of scanning the metadata header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Zero-based index of the line holding the event table's column header
    pub data_start: usize,
    /// Metadata seen before the event table
    pub metadata: SessionMetadata,
}

/// Scans the header of a decoded raw export.
///
/// Lines are read in order until the first one containing `Evnt_Time`. Label
/// lines seen before it update the metadata; a later occurrence of a label
/// overrides an earlier one, and a later label with no value clears it.
pub fn scan_header(content: &str) -> Result<HeaderInfo, ConvertError> {
    let mut metadata = SessionMetadata::default();

    for (index, line) in content.lines().enumerate() {
        if line.contains(DATA_MARKER) {
            return Ok(HeaderInfo {
                data_start: index,
                metadata,
            });
        } else if line.contains(ANIMAL_ID_LABEL) {
            metadata.animal_id = label_value(line);
        } else if line.contains(DATE_TIME_LABEL) {
            metadata.date_time = label_value(line);
        }
    }

    Err(ConvertError::MissingDataMarker)
}

/// Extracts the trimmed second field of a `label,value,...` line.
fn label_value(line: &str) -> Option<String> {
    let value = line.trim().split(',').nth(1)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
