//! JSON chart-data writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};

use crate::chart::{ChartBucket, ChartData, column_prefix};
use crate::error::Result;
use crate::output::OutputConfig;

/// Writes chart data to a JSON file as an array of flat objects.
///
/// # Format
/// ```json
/// [
///   {"date": "02/01/2023", "Alice_Messages": 1, "Alice_Chars": 5},
///   {"date": "02/02/2023", "Alice_Messages": 0, "Alice_Chars": 0}
/// ]
/// ```
pub fn write_json(data: &ChartData, output_path: &Path, config: &OutputConfig) -> Result<()> {
    let json = to_json(data, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts chart data to a JSON string.
///
/// Same format as [`write_json`], but returns a `String` instead of writing
/// to a file. Key order within each object follows the contact column order,
/// so output is stable across runs.
pub fn to_json(data: &ChartData, config: &OutputConfig) -> Result<String> {
    let rows: Vec<Map<String, Value>> = data
        .buckets()
        .iter()
        .map(|bucket| bucket_to_row(bucket, data.contacts(), config))
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

fn bucket_to_row(
    bucket: &ChartBucket,
    contacts: &[String],
    config: &OutputConfig,
) -> Map<String, Value> {
    let mut row = Map::new();
    row.insert("date".to_string(), Value::from(bucket.date()));

    for contact in contacts {
        let prefix = column_prefix(contact);
        let tally = bucket.tally(contact).unwrap_or_default();
        row.insert(format!("{prefix}_Messages"), Value::from(tally.messages));
        if config.include_chars {
            row.insert(format!("{prefix}_Chars"), Value::from(tally.chars));
        }
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use crate::chart::{Granularity, aggregate};
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn sample_data() -> ChartData {
        let messages = vec![
            Message::new(
                Utc.with_ymd_and_hms(2023, 2, 1, 10, 0, 0).unwrap(),
                "Jo Ann",
                "Hello",
            ),
            Message::new(
                Utc.with_ymd_and_hms(2023, 3, 1, 10, 0, 0).unwrap(),
                "Bob",
                "Hi",
            ),
        ];
        aggregate(&messages, Granularity::Month)
    }

    #[test]
    fn test_to_json_shape() {
        let json = to_json(&sample_data(), &OutputConfig::new()).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["date"], "02/2023");
        assert_eq!(parsed[0]["Jo_Ann_Messages"], 1);
        assert_eq!(parsed[0]["Jo_Ann_Chars"], 5);
        // Bob seeded with zeros in the first month
        assert_eq!(parsed[0]["Bob_Messages"], 0);
        assert_eq!(parsed[1]["Bob_Messages"], 1);
    }

    #[test]
    fn test_to_json_messages_only() {
        let json = to_json(&sample_data(), &OutputConfig::new().messages_only()).unwrap();
        assert!(json.contains("Jo_Ann_Messages"));
        assert!(!json.contains("Jo_Ann_Chars"));
    }

    #[test]
    fn test_write_json_matches_to_json() {
        let data = sample_data();
        let config = OutputConfig::new();

        let temp_file = NamedTempFile::new().unwrap();
        write_json(&data, temp_file.path(), &config).unwrap();

        let written = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(written, to_json(&data, &config).unwrap());
    }

    #[test]
    fn test_empty_data_is_empty_array() {
        let data = aggregate(&[], Granularity::Day);
        let json = to_json(&data, &OutputConfig::new()).unwrap();
        assert_eq!(json, "[]");
    }
}
