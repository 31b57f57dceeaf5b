//! # Chatchart
//!
//! A Rust library for turning plain-text chat exports into per-message
//! records and chart-ready aggregate statistics.
//!
//! ## Overview
//!
//! Chatchart reads the line-oriented export format messaging apps produce
//! (`[DD/MM/YYYY, HH:MM:SS] Author: Body`, continuation lines unprefixed),
//! reconstructs the logical messages, resolves author names through a
//! user-curated contact registry, and buckets the result by day, month, and
//! year with a message count and character count per contact in every
//! bucket. The bucket tables are designed to feed straight into a charting
//! library: rectangular, chronological, and stable across runs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatchart::chart::{Granularity, aggregate};
//! use chatchart::contacts::ContactRegistry;
//! use chatchart::parser::ExportParser;
//! use std::path::Path;
//!
//! fn main() -> chatchart::error::Result<()> {
//!     // Raw name -> canonical name mappings, curated by the user
//!     let registry = ContactRegistry::load(Path::new("contacts.json"))?;
//!
//!     // Parse the export; fails only if nothing in it is a message
//!     let parser = ExportParser::new();
//!     let output = parser.parse_file(Path::new("_chat.txt"), &registry)?;
//!
//!     // Names the registry didn't know, queued for curation
//!     if !output.unresolved.is_empty() {
//!         ContactRegistry::save_replacements(
//!             Path::new("contacts.json"),
//!             output.unresolved.names(),
//!         )?;
//!     }
//!
//!     // Three independent aggregation passes over the same messages
//!     for granularity in Granularity::all() {
//!         let data = aggregate(&output.messages, *granularity);
//!         println!("{}: {} buckets", granularity, data.buckets().len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — export parsing
//!   - [`ExportParser`](parser::ExportParser) — boundary detection, continuation joining, field extraction
//!   - [`ParseOutput`](parser::ParseOutput) — messages plus unresolved names
//! - [`contacts`] — name resolution
//!   - [`ContactRegistry`](contacts::ContactRegistry) — raw → canonical mapping with JSON persistence
//!   - [`clean_name`](contacts::clean_name) — strips invisible formatting marks
//! - [`chart`] — aggregation
//!   - [`aggregate`](chart::aggregate), [`Granularity`](chart::Granularity), [`ChartData`](chart::ChartData)
//! - [`output`] — chart-data writers ([`write_csv`](output::write_csv), [`write_json`](output::write_json))
//! - [`cli`] — CLI types (requires the `cli` feature)
//! - [`error`] — unified error type ([`ChatchartError`], [`Result`](error::Result))
//! - [`prelude`] — convenient re-exports

pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod contacts;
pub mod error;
pub mod message;
pub mod output;
pub mod parser;

// Re-export the main types at the crate root for convenience
pub use error::{ChatchartError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatchart::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatchartError, Result};

    // Parsing
    pub use crate::parser::{ExportParser, ParseOutput};

    // Name resolution
    pub use crate::contacts::{ContactRegistry, UnresolvedNames, clean_name};

    // Aggregation
    pub use crate::chart::{ChartBucket, ChartData, ContactTally, Granularity, aggregate};

    // Output (file writers and string converters)
    pub use crate::output::OutputConfig;
    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, write_json};

    // CLI types
    #[cfg(feature = "cli")]
    pub use crate::cli::{GranularitySpec, OutputFormat};
}
