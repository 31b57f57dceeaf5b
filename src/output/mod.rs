//! Chart-data writers.
//!
//! This module turns a [`ChartData`](crate::chart::ChartData) into the flat
//! tabular form chart consumers read: a `date` column followed by a
//! `Name_Messages` / `Name_Chars` column pair per contact (whitespace in
//! names becomes `_`). Buckets become rows in their first-encounter order
//! and contacts keep their first-appearance column order, so output is
//! byte-identical across runs over the same input.
//!
//! - [`write_csv`] / [`to_csv`] — CSV with semicolon delimiter — requires `csv-output` feature
//! - [`write_json`] / [`to_json`] — JSON array of flat objects — requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatchart::error::Result<()> {
//! use chatchart::chart::{Granularity, aggregate};
//! use chatchart::output::{OutputConfig, write_csv, write_json};
//! use std::path::Path;
//!
//! # let messages = vec![];
//! let by_day = aggregate(&messages, Granularity::Day);
//! let config = OutputConfig::new();
//!
//! write_csv(&by_day, Path::new("chart.day.csv"), &config)?;
//! write_json(&by_day, Path::new("chart.day.json"), &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};

/// Configuration for chart-data output.
///
/// # Example
///
/// ```
/// use chatchart::output::OutputConfig;
///
/// let config = OutputConfig::new()
///     .with_delimiter(b',')
///     .messages_only();
/// ```
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// CSV field delimiter (default: `;`)
    pub delimiter: u8,

    /// Emit the `Name_Chars` column pair half (default: true)
    pub include_chars: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            include_chars: true,
        }
    }
}

impl OutputConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CSV field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Drops the character-count columns, keeping message counts only.
    #[must_use]
    pub fn messages_only(mut self) -> Self {
        self.include_chars = false;
        self
    }
}

/// Column names for one chart data set under a configuration: `date` first,
/// then the per-contact pairs.
#[cfg(feature = "csv-output")]
pub(crate) fn column_names(
    contacts: &[String],
    config: &OutputConfig,
) -> Vec<String> {
    let mut names = vec!["date".to_string()];
    for contact in contacts {
        let prefix = crate::chart::column_prefix(contact);
        names.push(format!("{prefix}_Messages"));
        if config.include_chars {
            names.push(format!("{prefix}_Chars"));
        }
    }
    names
}
