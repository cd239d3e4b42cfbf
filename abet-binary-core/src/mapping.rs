//! Static event tables for the binary conversion.
//!
//! Column order in the output follows the declaration order of these slices,
//! so they are kept as ordered lists rather than maps.

/// Name of the first output column (the original event timestamp).
pub const TIME_COLUMN: &str = "Time";

/// Direct mappings from a source event name to its output column.
///
/// A direct column is 1 at every row whose event name equals the source name.
/// "Miskake" is the spelling used by the ABET II task schedules.
pub const DIRECT_MAPPINGS: &[(&str, &str)] = &[
    ("TTL #1", "TTL #1"),
    ("Hit", "Hit"),
    ("Missed Hit", "Missed Hit"),
    ("Correct Rejection", "Correct Rejection"),
    ("Non Correction Trial Miskake", "False Alarm"),
    ("Reward Collected Start ITI", "Reward Collected Start ITI"),
    ("Feeder #1", "Reward Delivery"),
    ("Correction Trial Mistake", "Correction Trial Mistake"),
    (
        "Correction Trial Correct Rejection",
        "Correction Trial Correct Rejection",
    ),
    ("Centre Screen Touches", "Centre Screen Touches"),
];

/// Output column flagging trial-start marker rows.
pub const MARKER_COLUMN: &str = "Display Image Binary";

/// Aligned columns and the outcome event name each one looks for inside a
/// marker's trial window.
pub const ALIGNED_MAPPINGS: &[(&str, &str)] = &[
    ("Hit (with Display)", "Hit"),
    ("Missed Hit (with Display)", "Missed Hit"),
    ("Correct Rejection (with Display)", "Correct Rejection"),
    ("False Alarm (with Display)", "Non Correction Trial Miskake"),
];

/// Event category shared by marker and outcome events.
pub const CONDITION_EVENT: &str = "Condition Event";

/// Event name of the trial-start marker.
pub const MARKER_EVENT_NAME: &str = "Display Image";

/// Sub-code that distinguishes the display marker from other "Display Image"
/// condition events.
pub const MARKER_SUB_CODE: f64 = 4.0;

/// Inclusive sub-code range of outcome condition events.
pub const OUTCOME_SUB_CODES: std::ops::RangeInclusive<f64> = 5.0..=6.0;

/// Token on the line where the event table starts.
pub const DATA_MARKER: &str = "Evnt_Time";

/// Header label carrying the subject identifier.
pub const ANIMAL_ID_LABEL: &str = "Animal ID";

/// Header label carrying the session date and time.
pub const DATE_TIME_LABEL: &str = "Date/Time";

/// Default file-name prefix of eligible raw exports.
pub const DEFAULT_PREFIX: &str = "TCN";

/// Returns the full output header in column order.
pub fn output_columns() -> Vec<&'static str> {
    let mut columns = Vec::with_capacity(2 + DIRECT_MAPPINGS.len() + ALIGNED_MAPPINGS.len());
    columns.push(TIME_COLUMN);
    columns.extend(DIRECT_MAPPINGS.iter().map(|(_, column)| *column));
    columns.push(MARKER_COLUMN);
    columns.extend(ALIGNED_MAPPINGS.iter().map(|(column, _)| *column));
    columns
}
