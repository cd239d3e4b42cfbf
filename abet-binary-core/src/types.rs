//! Core types for raw ABET II events and the binary tables built from them.

use crate::mapping::{
    ALIGNED_MAPPINGS, CONDITION_EVENT, DIRECT_MAPPINGS, MARKER_EVENT_NAME, MARKER_SUB_CODE,
    OUTCOME_SUB_CODES,
};

/// Number of direct-mapping columns.
pub const DIRECT_COUNT: usize = DIRECT_MAPPINGS.len();

/// Number of marker-aligned outcome columns.
pub const ALIGNED_COUNT: usize = ALIGNED_MAPPINGS.len();

/// One row of the raw event table.
///
/// Only the positional columns the converter reads are kept. The timestamp is
/// stored as the original text so it can be passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEventRow {
    /// Event time as written in the export (column 0)
    pub timestamp: String,
    /// Event category, e.g. "Condition Event" (column 2)
    pub category: String,
    /// Event name, e.g. "Display Image" (column 3)
    pub name: String,
    /// Numeric sub-code (column 5), absent when the cell is blank
    pub sub_code: Option<f64>,
}

impl RawEventRow {
    /// Creates a new raw event row.
    pub fn new(
        timestamp: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
        sub_code: Option<f64>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            category: category.into(),
            name: name.into(),
            sub_code,
        }
    }

    /// Returns true if this row is a trial-start marker (Display Image, sub-code 4).
    #[inline]
    pub fn is_marker(&self) -> bool {
        self.category == CONDITION_EVENT
            && self.name == MARKER_EVENT_NAME
            && self.sub_code == Some(MARKER_SUB_CODE)
    }

    /// Returns true if this row is a trial outcome (condition event, sub-code from 5 to 6 inclusive).
    #[inline]
    pub fn is_outcome(&self) -> bool {
        self.category == CONDITION_EVENT
            && self
                .sub_code
                .is_some_and(|code| OUTCOME_SUB_CODES.contains(&code))
    }
}

/// Session metadata recovered from the file header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMetadata {
    /// Subject identifier ("Animal ID")
    pub animal_id: Option<String>,
    /// Session date and time ("Date/Time"), as written
    pub date_time: Option<String>,
}

/// One output row: the timestamp plus every indicator column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRow {
    pub timestamp: String,
    /// Direct-mapping indicators, in `DIRECT_MAPPINGS` order
    pub direct: [u8; DIRECT_COUNT],
    /// Trial-start marker indicator
    pub marker: u8,
    /// Aligned outcome indicators, in `ALIGNED_MAPPINGS` order
    pub aligned: [u8; ALIGNED_COUNT],
}

impl BinaryRow {
    /// Creates an all-zero row for the given timestamp.
    pub fn empty(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            direct: [0; DIRECT_COUNT],
            marker: 0,
            aligned: [0; ALIGNED_COUNT],
        }
    }

    /// Returns the indicator values in output column order (without the timestamp).
    pub fn indicators(&self) -> impl Iterator<Item = u8> + '_ {
        self.direct
            .iter()
            .copied()
            .chain(std::iter::once(self.marker))
            .chain(self.aligned.iter().copied())
    }
}

/// The binary indicator table built from one raw export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryTable {
    pub rows: Vec<BinaryRow>,
}

impl BinaryTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the values of one indicator column by its output name.
    pub fn column(&self, name: &str) -> Option<Vec<u8>> {
        let index = crate::mapping::output_columns()
            .iter()
            .skip(1)
            .position(|column| *column == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.indicators().nth(index).unwrap_or(0))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_detection() {
        assert!(RawEventRow::new("1.0", "Condition Event", "Display Image", Some(4.0)).is_marker());
        assert!(!RawEventRow::new("1.0", "Condition Event", "Display Image", Some(5.0)).is_marker());
        assert!(!RawEventRow::new("1.0", "Condition Event", "Display Image", Some(4.5)).is_marker());
        assert!(!RawEventRow::new("1.0", "Input Event", "Display Image", Some(4.0)).is_marker());
        assert!(!RawEventRow::new("1.0", "Condition Event", "Display Image", None).is_marker());
    }

    #[test]
    fn test_outcome_detection() {
        assert!(RawEventRow::new("1.0", "Condition Event", "Hit", Some(5.0)).is_outcome());
        assert!(RawEventRow::new("1.0", "Condition Event", "Hit", Some(5.5)).is_outcome());
        assert!(RawEventRow::new("1.0", "Condition Event", "Missed Hit", Some(6.0)).is_outcome());
        assert!(!RawEventRow::new("1.0", "Condition Event", "Hit", Some(4.5)).is_outcome());
        assert!(!RawEventRow::new("1.0", "Condition Event", "Hit", Some(7.0)).is_outcome());
        assert!(!RawEventRow::new("1.0", "Output Event", "Hit", Some(5.0)).is_outcome());
    }

    #[test]
    fn test_row_indicator_order() {
        let mut row = BinaryRow::empty("0.5");
        row.direct[0] = 1;
        row.marker = 1;
        row.aligned[3] = 1;
        let values: Vec<u8> = row.indicators().collect();
        assert_eq!(values.len(), DIRECT_COUNT + 1 + ALIGNED_COUNT);
        assert_eq!(values[0], 1);
        assert_eq!(values[DIRECT_COUNT], 1);
        assert_eq!(values[DIRECT_COUNT + ALIGNED_COUNT], 1);
        assert_eq!(values.iter().map(|v| *v as usize).sum::<usize>(), 3);
    }
}
