//! Parsing of the delimited event table that follows the export header.
//!
//! Only the positional columns the converter needs are extracted from each
//! row; every row must still have the same width as the column header.

use crate::error::ConvertError;
use crate::types::RawEventRow;

/// Column index of the event timestamp.
pub const TIMESTAMP_COLUMN: usize = 0;
/// Column index of the event category.
pub const CATEGORY_COLUMN: usize = 2;
/// Column index of the event name.
pub const NAME_COLUMN: usize = 3;
/// Column index of the numeric sub-code.
pub const SUB_CODE_COLUMN: usize = 5;

/// Minimum table width needed to reach every positional column.
pub const MIN_COLUMNS: usize = SUB_CODE_COLUMN + 1;

/// Parses the event table starting at `data_start` (the column header line).
///
/// Blank lines are skipped. Any row whose width differs from the header, or
/// whose sub-code is not a number, fails the whole table.
pub fn parse_table(content: &str, data_start: usize) -> Result<Vec<RawEventRow>, ConvertError> {
    let mut lines = content.lines().enumerate().skip(data_start);

    let (header_index, header_line) = lines.next().ok_or(ConvertError::MissingDataMarker)?;
    let header = split_fields(header_line).map_err(|reason| ConvertError::MalformedRow {
        line: header_index + 1,
        reason,
    })?;
    if header.len() < MIN_COLUMNS {
        return Err(ConvertError::MissingColumns {
            found: header.len(),
            expected: MIN_COLUMNS,
        });
    }

    let mut rows = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(line, index + 1, header.len())?);
    }

    log::trace!("Parsed {} event rows", rows.len());
    Ok(rows)
}

/// Parses a single data row. `line_number` is 1-based and only used for errors.
pub fn parse_row(line: &str, line_number: usize, width: usize) -> Result<RawEventRow, ConvertError> {
    let malformed = |reason: String| ConvertError::MalformedRow {
        line: line_number,
        reason,
    };

    let mut fields = split_fields(line).map_err(malformed)?;
    if fields.len() != width {
        return Err(malformed(format!(
            "expected {} fields, saw {}",
            width,
            fields.len()
        )));
    }

    let sub_code = parse_sub_code(&fields[SUB_CODE_COLUMN]).map_err(malformed)?;

    Ok(RawEventRow {
        timestamp: std::mem::take(&mut fields[TIMESTAMP_COLUMN]),
        category: std::mem::take(&mut fields[CATEGORY_COLUMN]),
        name: std::mem::take(&mut fields[NAME_COLUMN]),
        sub_code,
    })
}

/// Parses a sub-code cell.
///
/// Blank cells have no sub-code. Any finite number is accepted, including
/// float text such as "4.0" written by spreadsheet round-trips.
pub fn parse_sub_code(cell: &str) -> Result<Option<f64>, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(format!("non-finite sub-code {:?}", cell)),
        Err(_) => Err(format!("non-numeric sub-code {:?}", cell)),
    }
}

/// Splits one delimited line into fields.
///
/// Double-quoted fields may contain commas; a doubled quote inside a quoted
/// field is a literal quote.
pub fn split_fields(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}
