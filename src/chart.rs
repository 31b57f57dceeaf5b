//! Time-bucketed aggregation of the parsed message sequence.
//!
//! [`aggregate`] runs once per [`Granularity`] over the full message
//! sequence and produces one [`ChartBucket`] per day, month, or year that
//! had activity, in first-encounter order. Each bucket holds a
//! [`ContactTally`] — message count and character sum — for **every** contact
//! seen anywhere in the run, so downstream charting always gets a complete,
//! rectangular data set; a contact silent in some period shows up there with
//! zeros rather than a hole.
//!
//! Periods with no activity produce no bucket at all: there is no gap
//! filling and no re-sorting, the export's own chronology is the order.
//!
//! # Example
//!
//! ```
//! use chatchart::chart::{Granularity, aggregate};
//! use chatchart::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let messages = vec![
//!     Message::new(Utc.with_ymd_and_hms(2023, 2, 1, 10, 0, 0).unwrap(), "Alice", "Hello"),
//!     Message::new(Utc.with_ymd_and_hms(2023, 2, 1, 10, 0, 5).unwrap(), "Bob", "Hi there"),
//! ];
//!
//! let by_day = aggregate(&messages, Granularity::Day);
//! assert_eq!(by_day.buckets().len(), 1);
//!
//! let bucket = &by_day.buckets()[0];
//! assert_eq!(bucket.date(), "02/01/2023");
//! assert_eq!(bucket.tally("Alice").unwrap().messages, 1);
//! assert_eq!(bucket.tally("Bob").unwrap().chars, 8);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;

/// Time precision of one aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day, keyed `MM/DD/YYYY`.
    Day,
    /// One bucket per calendar month, keyed `MM/YYYY`.
    Month,
    /// One bucket per calendar year, keyed `YYYY`.
    Year,
}

impl Granularity {
    /// Returns all granularities, finest first.
    pub fn all() -> &'static [Granularity] {
        &[Granularity::Day, Granularity::Month, Granularity::Year]
    }

    /// Derives the bucket key for a timestamp at this granularity.
    ///
    /// Keys are truncations of the message display form: the day key is the
    /// full date portion, the month key drops the day of month, the year key
    /// keeps the year alone.
    pub fn bucket_key(self, timestamp: &DateTime<Utc>) -> String {
        let format = match self {
            Granularity::Day => "%m/%d/%Y",
            Granularity::Month => "%m/%Y",
            Granularity::Year => "%Y",
        };
        timestamp.format(format).to_string()
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            _ => Err(format!(
                "Unknown granularity: '{}'. Expected one of: day, month, year",
                s
            )),
        }
    }
}

/// Per-contact counters within one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactTally {
    /// Number of messages the contact sent in the bucket's period.
    pub messages: u64,
    /// Sum of the character counts of those messages.
    pub chars: u64,
}

/// Aggregate record for one time period.
///
/// Holds the period key and a tally for every contact in the run. Tallies
/// are reached through [`tally`](ChartBucket::tally); the complete-contact
/// invariant means the lookup only misses for names that never appeared in
/// the message sequence at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBucket {
    date: String,
    tallies: HashMap<String, ContactTally>,
}

impl ChartBucket {
    /// Returns the bucket key (`MM/DD/YYYY`, `MM/YYYY`, or `YYYY`).
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the tally for a contact.
    pub fn tally(&self, contact: &str) -> Option<ContactTally> {
        self.tallies.get(contact).copied()
    }

    /// Returns the number of contacts tallied in this bucket.
    pub fn contact_count(&self) -> usize {
        self.tallies.len()
    }
}

/// One granularity's worth of chart data: the contact roster and the bucket
/// sequence, both in first-appearance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    granularity: Granularity,
    contacts: Vec<String>,
    buckets: Vec<ChartBucket>,
}

impl ChartData {
    /// Returns the granularity this data was aggregated at.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Returns every contact present in the source messages, in order of
    /// first appearance. This is the column order writers use.
    pub fn contacts(&self) -> &[String] {
        &self.contacts
    }

    /// Returns the buckets in first-encounter (chronological) order.
    pub fn buckets(&self) -> &[ChartBucket] {
        &self.buckets
    }

    /// Looks up a bucket by its period key.
    pub fn bucket(&self, date: &str) -> Option<&ChartBucket> {
        self.buckets.iter().find(|b| b.date == date)
    }

    /// Returns `true` if no messages were aggregated.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Derives the flat column prefix for a contact name.
///
/// Whitespace becomes `_` so the `Name_Messages` / `Name_Chars` column pair
/// is a single token in CSV headers and JSON keys. Only the serialized form
/// uses this; counters are keyed by the contact identity itself, so two
/// names that sanitize identically never share a tally.
pub fn column_prefix(contact: &str) -> String {
    contact
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Aggregates the message sequence at one granularity.
///
/// A first pass collects the full contact roster so every bucket can be
/// seeded with zeros for all of it at creation. The main pass then walks the
/// messages in order, opening a bucket the first time a period key is seen
/// and bumping the sender's counters. Messages are assumed chronological;
/// bucket order is simply first-encounter order, with no sort.
pub fn aggregate(messages: &[Message], granularity: Granularity) -> ChartData {
    let mut contacts: Vec<String> = Vec::new();
    for msg in messages {
        if !contacts.iter().any(|c| c == msg.contact()) {
            contacts.push(msg.contact().to_string());
        }
    }

    let mut buckets: Vec<ChartBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for msg in messages {
        let key = granularity.bucket_key(&msg.timestamp());
        let i = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(ChartBucket {
                date: key,
                tallies: contacts
                    .iter()
                    .map(|c| (c.clone(), ContactTally::default()))
                    .collect(),
            });
            buckets.len() - 1
        });

        let tally = buckets[i]
            .tallies
            .entry(msg.contact().to_string())
            .or_default();
        tally.messages += 1;
        tally.chars += msg.chars() as u64;
    }

    ChartData {
        granularity,
        contacts,
        buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn msg(y: i32, mo: u32, d: u32, contact: &str, content: &str) -> Message {
        Message::new(
            Utc.with_ymd_and_hms(y, mo, d, 10, 0, 0).unwrap(),
            contact,
            content,
        )
    }

    #[test]
    fn test_bucket_keys_per_granularity() {
        let ts = Utc.with_ymd_and_hms(2023, 2, 1, 10, 30, 0).unwrap();
        assert_eq!(Granularity::Day.bucket_key(&ts), "02/01/2023");
        assert_eq!(Granularity::Month.bucket_key(&ts), "02/2023");
        assert_eq!(Granularity::Year.bucket_key(&ts), "2023");
    }

    #[test]
    fn test_day_buckets_split_and_count() {
        let messages = vec![
            msg(2023, 2, 1, "Alice", "Hello"),
            msg(2023, 2, 1, "Bob", "Hi there"),
            msg(2023, 2, 2, "Alice", "Next day"),
        ];
        let data = aggregate(&messages, Granularity::Day);

        assert_eq!(data.buckets().len(), 2);
        let first = data.bucket("02/01/2023").unwrap();
        assert_eq!(first.tally("Alice").unwrap().messages, 1);
        assert_eq!(first.tally("Alice").unwrap().chars, 5);
        assert_eq!(first.tally("Bob").unwrap().chars, 8);
    }

    #[test]
    fn test_every_bucket_carries_every_contact() {
        let messages = vec![
            msg(2023, 1, 5, "Alice", "only alice today"),
            msg(2023, 2, 5, "Bob", "only bob today"),
        ];
        let data = aggregate(&messages, Granularity::Day);

        for bucket in data.buckets() {
            assert_eq!(bucket.contact_count(), 2);
        }
        // Bob is present with zeros in Alice's day
        let alice_day = data.bucket("01/05/2023").unwrap();
        assert_eq!(alice_day.tally("Bob").unwrap(), ContactTally::default());
    }

    #[test]
    fn test_bucket_order_is_first_encounter() {
        let messages = vec![
            msg(2022, 12, 31, "Alice", "a"),
            msg(2023, 1, 1, "Alice", "b"),
            msg(2023, 1, 2, "Alice", "c"),
        ];
        let data = aggregate(&messages, Granularity::Day);
        let keys: Vec<&str> = data.buckets().iter().map(ChartBucket::date).collect();
        assert_eq!(keys, ["12/31/2022", "01/01/2023", "01/02/2023"]);
    }

    #[test]
    fn test_contact_order_is_first_appearance() {
        let messages = vec![
            msg(2023, 1, 1, "Bob", "b"),
            msg(2023, 1, 1, "Alice", "a"),
            msg(2023, 1, 2, "Bob", "b2"),
        ];
        let data = aggregate(&messages, Granularity::Day);
        assert_eq!(data.contacts(), ["Bob".to_string(), "Alice".to_string()]);
    }

    #[test]
    fn test_month_and_year_accumulate_across_days() {
        let messages = vec![
            msg(2023, 2, 1, "Alice", "one"),
            msg(2023, 2, 15, "Alice", "two"),
            msg(2023, 3, 1, "Alice", "three"),
        ];

        let by_month = aggregate(&messages, Granularity::Month);
        assert_eq!(by_month.buckets().len(), 2);
        assert_eq!(
            by_month.bucket("02/2023").unwrap().tally("Alice").unwrap().messages,
            2
        );

        let by_year = aggregate(&messages, Granularity::Year);
        assert_eq!(by_year.buckets().len(), 1);
        assert_eq!(
            by_year.bucket("2023").unwrap().tally("Alice").unwrap().messages,
            3
        );
    }

    #[test]
    fn test_same_key_reappearing_later_reuses_its_bucket() {
        // Input is assumed chronological, but a repeated key still lands in
        // the bucket created at its first encounter.
        let messages = vec![
            msg(2023, 2, 1, "Alice", "a"),
            msg(2023, 2, 2, "Alice", "b"),
            msg(2023, 2, 1, "Alice", "c"),
        ];
        let data = aggregate(&messages, Granularity::Day);
        assert_eq!(data.buckets().len(), 2);
        assert_eq!(
            data.bucket("02/01/2023").unwrap().tally("Alice").unwrap().messages,
            2
        );
    }

    #[test]
    fn test_empty_messages_empty_data() {
        let data = aggregate(&[], Granularity::Day);
        assert!(data.is_empty());
        assert!(data.contacts().is_empty());
    }

    #[test]
    fn test_totals_match_across_granularities() {
        let messages = vec![
            msg(2022, 12, 31, "Alice", "a"),
            msg(2023, 1, 1, "Bob", "bb"),
            msg(2023, 1, 15, "Alice", "ccc"),
            msg(2023, 2, 1, "Alice", "dddd"),
        ];

        for granularity in Granularity::all() {
            let data = aggregate(&messages, *granularity);
            let alice_total: u64 = data
                .buckets()
                .iter()
                .map(|b| b.tally("Alice").unwrap().messages)
                .sum();
            assert_eq!(alice_total, 3, "granularity {granularity}");
        }
    }

    #[test]
    fn test_column_prefix_replaces_whitespace() {
        assert_eq!(column_prefix("Alice"), "Alice");
        assert_eq!(column_prefix("Jo Ann Smith"), "Jo_Ann_Smith");
        assert_eq!(column_prefix("tab\there"), "tab_here");
    }

    #[test]
    fn test_granularity_parse_and_display() {
        assert_eq!("day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!("MONTHLY".parse::<Granularity>().unwrap(), Granularity::Month);
        assert!("week".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Year.to_string(), "year");
    }
}
