//! Event alignment: builds the binary indicator table from raw event rows.
//!
//! Direct columns are a per-row equality test on the event name. Aligned
//! columns are only ever set at marker rows: a marker's trial window runs from
//! the marker up to (not including) the next marker, or to the end of the
//! table for the last one, and an aligned column is 1 when an outcome event
//! with the matching name lies strictly inside that window.

use crate::mapping::{ALIGNED_MAPPINGS, DIRECT_MAPPINGS};
use crate::types::{BinaryRow, BinaryTable, RawEventRow};

/// Builds the binary table for one export. The output has exactly one row per input row.
pub fn align_events(rows: &[RawEventRow]) -> BinaryTable {
    let mut output: Vec<BinaryRow> = rows.iter().map(direct_row).collect();

    let markers = marker_indices(rows);
    let windows = trial_windows(&markers, rows.len());

    for (start, end) in windows {
        output[start].marker = 1;

        for outcome in rows[start + 1..end].iter().filter(|row| row.is_outcome()) {
            for (slot, (_, expected)) in ALIGNED_MAPPINGS.iter().enumerate() {
                if outcome.name == *expected {
                    output[start].aligned[slot] = 1;
                }
            }
        }
    }

    BinaryTable { rows: output }
}

/// Returns the row indices of all marker events, in table order.
pub fn marker_indices(rows: &[RawEventRow]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.is_marker())
        .map(|(index, _)| index)
        .collect()
}

/// Pairs each marker with the index of the next marker (or `len` for the last).
///
/// `markers` must be sorted ascending, as returned by [`marker_indices`].
pub fn trial_windows(markers: &[usize], len: usize) -> Vec<(usize, usize)> {
    markers
        .iter()
        .enumerate()
        .map(|(i, &start)| (start, markers.get(i + 1).copied().unwrap_or(len)))
        .collect()
}

/// Computes the direct-mapping columns for a single row.
fn direct_row(row: &RawEventRow) -> BinaryRow {
    let mut binary = BinaryRow::empty(row.timestamp.clone());
    for (slot, (source, _)) in DIRECT_MAPPINGS.iter().enumerate() {
        if row.name == *source {
            binary.direct[slot] = 1;
        }
    }
    binary
}
