//! CSV chart-data writer.

use std::io;
use std::path::Path;

use crate::chart::ChartData;
use crate::error::Result;
use crate::output::{OutputConfig, column_names};

/// Writes chart data to a CSV file.
///
/// # Format
/// - Delimiter: `;` by default (see [`OutputConfig::with_delimiter`])
/// - Columns: `date`, then `Name_Messages` (and `Name_Chars`) per contact
/// - One row per bucket, first-encounter order
/// - Encoding: UTF-8
pub fn write_csv(data: &ChartData, output_path: &Path, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_path(output_path)?;

    write_records(&mut writer, data, config)?;

    writer.flush()?;
    Ok(())
}

/// Converts chart data to a CSV string.
///
/// Same format as [`write_csv`], but returns a `String` instead of writing
/// to a file.
pub fn to_csv(data: &ChartData, config: &OutputConfig) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(Vec::new());

    write_records(&mut writer, data, config)?;

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

fn write_records<W: io::Write>(
    writer: &mut csv::Writer<W>,
    data: &ChartData,
    config: &OutputConfig,
) -> Result<()> {
    writer.write_record(column_names(data.contacts(), config))?;

    for bucket in data.buckets() {
        let mut record = vec![bucket.date().to_string()];
        for contact in data.contacts() {
            let tally = bucket.tally(contact).unwrap_or_default();
            record.push(tally.messages.to_string());
            if config.include_chars {
                record.push(tally.chars.to_string());
            }
        }
        writer.write_record(&record)?;
    }

    Ok(())
}
