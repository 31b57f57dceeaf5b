//! The per-message record produced by parsing.
//!
//! This module provides [`Message`], one record per logical message in the
//! export. A logical message is the timestamped head line plus any
//! continuation lines that followed it, joined with `\n`.
//!
//! # Overview
//!
//! A message consists of:
//! - `timestamp` — when the message was sent (export fields read as UTC)
//! - `contact` — canonical name if the registry resolved it, cleaned raw name otherwise
//! - `content` — the message body, possibly multiline
//! - `chars` — character count of `content`, computed once at construction
//!
//! Messages are immutable after construction and kept in the order the export
//! listed them.
//!
//! # Examples
//!
//! ```
//! use chatchart::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2023, 2, 1, 10, 0, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "Hello");
//! assert_eq!(msg.contact(), "Alice");
//! assert_eq!(msg.chars(), 5);
//! assert_eq!(msg.date_display(), "02/01/2023 10:00:00");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed render format for a message timestamp: zero-padded numeric
/// date and time with the comma between them dropped.
///
/// Chart bucket keys are truncations of this form, so it is part of the
/// data contract with downstream chart consumers, not a cosmetic choice.
pub(crate) const DATE_DISPLAY_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// A single parsed chat message.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `DateTime<Utc>` | Send time, second precision |
/// | `contact` | `String` | Resolved (or cleaned raw) author name |
/// | `content` | `String` | Message body; embedded `\n` for continuation lines |
/// | `chars` | `usize` | Character count of `content` |
///
/// # Construction
///
/// Use [`Message::new`]; the character count is derived from the content and
/// never supplied by the caller:
///
/// ```
/// use chatchart::Message;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
/// let msg = Message::new(ts, "Bob", "Hi there\nhow are you?");
/// assert_eq!(msg.chars(), msg.content().chars().count());
/// ```
///
/// # Serialization
///
/// Implements `Serialize` and `Deserialize`; timestamps use RFC 3339 format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Author display name, canonical where the registry knew it.
    pub contact: String,

    /// Text content of the message.
    ///
    /// Multiline bodies (pasted text, multi-paragraph messages) keep their
    /// line breaks.
    pub content: String,

    /// Character count of `content` (Unicode scalar values, not bytes).
    pub chars: usize,
}

impl Message {
    /// Creates a new message, computing the character count from the content.
    pub fn new(
        timestamp: DateTime<Utc>,
        contact: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let contact = contact.into();
        let content = content.into();
        let chars = content.chars().count();
        Self {
            timestamp,
            contact,
            content,
            chars,
        }
    }

    /// Returns the contact name.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the character count of the content.
    pub fn chars(&self) -> usize {
        self.chars
    }

    /// Renders the timestamp in the fixed display form `MM/DD/YYYY HH:MM:SS`.
    ///
    /// ```
    /// use chatchart::Message;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let ts = Utc.with_ymd_and_hms(2023, 2, 1, 9, 5, 0).unwrap();
    /// let msg = Message::new(ts, "Alice", "hi");
    /// assert_eq!(msg.date_display(), "02/01/2023 09:05:00");
    /// ```
    pub fn date_display(&self) -> String {
        self.timestamp.format(DATE_DISPLAY_FORMAT).to_string()
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
