//! Output naming and CSV writing for binary tables.

use crate::error::ConvertError;
use crate::mapping::output_columns;
use crate::types::{BinaryRow, BinaryTable, SessionMetadata};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV writer for binary tables.
pub struct CsvWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Creates a new CSV writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Writes the column header row.
    pub fn write_header(&mut self) -> Result<(), ConvertError> {
        writeln!(self.writer, "{}", output_columns().join(","))?;
        Ok(())
    }

    /// Writes a batch of rows.
    pub fn write_rows(&mut self, rows: &[BinaryRow]) -> Result<(), ConvertError> {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    #[inline]
    fn write_row(&mut self, row: &BinaryRow) -> Result<(), ConvertError> {
        write_field(&mut self.writer, &row.timestamp)?;
        for value in row.indicators() {
            write!(self.writer, ",{}", value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Flushes the writer.
    pub fn flush(&mut self) -> Result<(), ConvertError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes a text field, quoting it only when it contains a delimiter, quote or newline.
fn write_field<W: Write>(writer: &mut W, field: &str) -> std::io::Result<()> {
    if field.contains([',', '"', '\n', '\r']) {
        write!(writer, "\"{}\"", field.replace('"', "\"\""))
    } else {
        writer.write_all(field.as_bytes())
    }
}

/// Writes a binary table to a CSV file.
///
/// If writing fails part-way the incomplete file is removed.
pub fn write_csv<P: AsRef<Path>>(path: P, table: &BinaryTable) -> Result<(), ConvertError> {
    let path = path.as_ref();
    let result = File::create(path).map_err(ConvertError::from).and_then(|file| {
        let mut writer = CsvWriter::new(file);
        writer.write_header()?;
        writer.write_rows(&table.rows)?;
        writer.flush()
    });

    if result.is_err() {
        std::fs::remove_file(path).ok();
    }
    result
}

/// Chooses the output file name for a converted export.
///
/// With both metadata fields the name is `{animal_id}_{date_time}.csv`, the
/// date/time having `:`, space and `/` replaced by `_`. Otherwise the name is
/// `Binary_{original_name}`.
pub fn output_file_name(metadata: &SessionMetadata, original_name: &str) -> String {
    match (&metadata.animal_id, &metadata.date_time) {
        (Some(animal_id), Some(date_time)) => format!(
            "{}_{}.csv",
            animal_id.replace(['/', '\\'], "_"),
            sanitize_date_time(date_time)
        ),
        _ => format!("Binary_{}", original_name),
    }
}

/// Replaces characters that are unsafe in file names (`:`, space, `/`) with `_`.
pub fn sanitize_date_time(date_time: &str) -> String {
    date_time.replace([':', ' ', '/'], "_")
}
