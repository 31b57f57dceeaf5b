//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//! - [`GranularitySpec`] - Which aggregation passes to run
//!
//! # Using these types in libraries
//!
//! The enums are plain value types and work outside a CLI context:
//!
//! ```rust
//! use chatchart::cli::{GranularitySpec, OutputFormat};
//!
//! let format = OutputFormat::Csv;
//! assert_eq!(format.extension(), "csv");
//!
//! // "all" expands to the three aggregation passes
//! assert_eq!(GranularitySpec::All.granularities().len(), 3);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::chart::Granularity;

/// Turn a plain-text chat export into chart-ready per-contact
/// message and character statistics, bucketed by day, month, and year.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatchart")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatchart _chat.txt
    chatchart _chat.txt -g month
    chatchart _chat.txt -o holidays --format json
    chatchart _chat.txt -c contacts.json --messages-only")]
pub struct Args {
    /// Path to the chat export file
    pub input: String,

    /// Path to the contact registry (raw name -> canonical name JSON file)
    #[arg(short, long, default_value = "contacts.json", value_name = "FILE")]
    pub contacts: String,

    /// Output file stem; granularity and format extension are appended
    #[arg(short, long, default_value = "chart_data", value_name = "STEM")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Aggregation granularity
    #[arg(short, long, value_enum, default_value = "all")]
    pub granularity: GranularitySpec,

    /// Emit message counts only, without the character-count columns
    #[arg(long)]
    pub messages_only: bool,
}

/// Output format options.
///
/// # Example
///
/// ```rust
/// use chatchart::cli::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of flat bucket objects
    Json,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Which aggregation passes to run.
///
/// `All` is the default and runs the day, month, and year passes, writing
/// one output file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GranularitySpec {
    /// Day buckets only
    Day,

    /// Month buckets only
    Month,

    /// Year buckets only
    Year,

    /// Day, month, and year buckets
    #[default]
    All,
}

impl GranularitySpec {
    /// Expands the selection into the granularities to aggregate at.
    pub fn granularities(self) -> &'static [Granularity] {
        match self {
            GranularitySpec::Day => &[Granularity::Day],
            GranularitySpec::Month => &[Granularity::Month],
            GranularitySpec::Year => &[Granularity::Year],
            GranularitySpec::All => Granularity::all(),
        }
    }
}

impl std::fmt::Display for GranularitySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GranularitySpec::Day => write!(f, "day"),
            GranularitySpec::Month => write!(f, "month"),
            GranularitySpec::Year => write!(f, "year"),
            GranularitySpec::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for GranularitySpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(GranularitySpec::Day),
            "month" => Ok(GranularitySpec::Month),
            "year" => Ok(GranularitySpec::Year),
            "all" => Ok(GranularitySpec::All),
            _ => Err(format!(
                "Unknown granularity: '{}'. Expected one of: day, month, year, all",
                s
            )),
        }
    }
}
