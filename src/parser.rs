//! Chat export parser.
//!
//! Exports are line-oriented text where each message starts with a bracketed
//! timestamp head line:
//!
//! ```text
//! [01/02/2023, 10:00:00] Alice: Hello
//! [01/02/2023, 10:00:05] Bob: Hi there
//! how are you?
//! ```
//!
//! Parsing runs in two phases. Phase one walks the lines and reassembles
//! logical messages: a line matching the boundary pattern starts a new block,
//! every other line is glued to the block before it with a line break (that is
//! how pasted text and multi-paragraph messages survive the export). Phase two
//! matches each block against the full structural pattern and builds a
//! [`Message`] from the captures; blocks that do not fit — group notices,
//! encryption banners, anything without an `Author: Body` shape — are dropped
//! without comment.
//!
//! The only hard failure is an input that produces zero messages; see
//! [`ChatchartError::NoMessages`].
//!
//! # Example
//!
//! ```
//! use chatchart::contacts::ContactRegistry;
//! use chatchart::parser::ExportParser;
//!
//! let export = "[01/02/2023, 10:00:00] Alice: Hello\n\
//!               [01/02/2023, 10:00:05] Bob: Hi there\n\
//!               how are you?";
//!
//! let parser = ExportParser::new();
//! let output = parser.parse_str(export, &ContactRegistry::new())?;
//!
//! assert_eq!(output.messages.len(), 2);
//! assert_eq!(output.messages[1].content(), "Hi there\nhow are you?");
//! # Ok::<(), chatchart::ChatchartError>(())
//! ```

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use regex::Regex;

use crate::Message;
use crate::contacts::{ContactRegistry, UnresolvedNames, clean_name};
use crate::error::{ChatchartError, Result};

/// Boundary pattern: bracketed `DD/MM/YYYY, HH:MM:SS` timestamp followed by
/// a space. Lines matching this start a new logical message.
const HEAD_PATTERN: &str = r"^\[\d{2}/\d{2}/\d{4},\s\d{2}:\d{2}:\d{2}\]\s";

/// Full structural pattern over a logical message: the six numeric timestamp
/// fields, the author (up to the first `: `), and the body (everything after
/// it, line breaks included — embedded colons stay in the body).
const FIELDS_PATTERN: &str =
    r"^\[(\d{2})/(\d{2})/(\d{4}),\s(\d{2}):(\d{2}):(\d{2})\]\s(.+?):\s(?s:(.+))$";

/// Parser for bracketed-timestamp chat exports.
///
/// The instance holds its compiled patterns, so reuse it when parsing more
/// than one input.
///
/// # Example
///
/// ```rust,no_run
/// use chatchart::contacts::ContactRegistry;
/// use chatchart::parser::ExportParser;
/// use std::path::Path;
///
/// let registry = ContactRegistry::load(Path::new("contacts.json"))?;
/// let parser = ExportParser::new();
/// let output = parser.parse_file(Path::new("_chat.txt"), &registry)?;
/// println!("{} messages", output.messages.len());
/// # Ok::<(), chatchart::ChatchartError>(())
/// ```
pub struct ExportParser {
    head_re: Regex,
    fields_re: Regex,
}

/// Everything a parse run produces: the ordered message sequence and the raw
/// names the registry could not resolve.
#[derive(Debug)]
pub struct ParseOutput {
    /// Parsed messages in input order.
    pub messages: Vec<Message>,
    /// Cleaned raw names with no registry entry, first appearance first.
    pub unresolved: UnresolvedNames,
}

impl ExportParser {
    /// Creates a parser with its patterns compiled.
    pub fn new() -> Self {
        Self {
            head_re: Regex::new(HEAD_PATTERN).unwrap(),
            fields_re: Regex::new(FIELDS_PATTERN).unwrap(),
        }
    }

    /// Reads a file and parses its content.
    ///
    /// The fatal empty-result error carries the file path for context.
    pub fn parse_file(&self, path: &Path, registry: &ContactRegistry) -> Result<ParseOutput> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content, registry).map_err(|e| match e {
            ChatchartError::NoMessages { .. } => ChatchartError::no_messages_in(path),
            other => other,
        })
    }

    /// Parses export text already in memory.
    ///
    /// Returns [`ChatchartError::NoMessages`] when not a single block matches
    /// the message shape. Everything else that is wrong with the input is
    /// absorbed: unmatched blocks are dropped and unknown contacts fall back
    /// to their cleaned raw name.
    pub fn parse_str(&self, content: &str, registry: &ContactRegistry) -> Result<ParseOutput> {
        let mut messages = Vec::new();
        let mut unresolved = UnresolvedNames::new();

        for block in self.collect_blocks(content) {
            if let Some(msg) = self.extract_message(&block, registry, &mut unresolved) {
                messages.push(msg);
            }
        }

        if messages.is_empty() {
            return Err(ChatchartError::no_messages());
        }

        Ok(ParseOutput {
            messages,
            unresolved,
        })
    }

    /// Phase one: normalize line endings and group lines into logical
    /// messages.
    ///
    /// A line matching the boundary pattern opens a new block; any other line
    /// is a continuation of the block before it. Continuations arriving
    /// before the first head line have nothing to attach to and are dropped.
    fn collect_blocks(&self, content: &str) -> Vec<String> {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

        let mut blocks: Vec<String> = Vec::new();
        for line in normalized.split('\n') {
            if self.head_re.is_match(line) {
                blocks.push(line.to_string());
            } else if let Some(last) = blocks.last_mut() {
                last.push('\n');
                last.push_str(line);
            }
        }
        blocks
    }

    /// Phase two: match one logical message against the structural pattern
    /// and build a [`Message`] from the captures.
    ///
    /// Returns `None` for blocks without the `Author: Body` shape and for
    /// timestamp fields that do not form a real calendar date; both are
    /// ordinary export noise, not errors.
    fn extract_message(
        &self,
        block: &str,
        registry: &ContactRegistry,
        unresolved: &mut UnresolvedNames,
    ) -> Option<Message> {
        let caps = self.fields_re.captures(block)?;

        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        let hour: u32 = caps[4].parse().ok()?;
        let minute: u32 = caps[5].parse().ok()?;
        let second: u32 = caps[6].parse().ok()?;

        let timestamp = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()?;

        let raw_name = clean_name(&caps[7]);
        let contact = match registry.replace(&raw_name) {
            Some(canonical) => canonical.to_string(),
            None => {
                unresolved.record(&raw_name);
                raw_name
            }
        };

        Some(Message::new(timestamp, contact, &caps[8]))
    }
}

impl Default for ExportParser {
    fn default() -> Self {
        Self::new()
    }
}
