//! Property-based tests for chatchart.
//!
//! These tests generate random exports and message sequences to check the
//! structural guarantees: block counting, continuation joining, bucket
//! completeness, and cross-granularity consistency.

use proptest::prelude::*;

use chatchart::Message;
use chatchart::chart::{Granularity, aggregate};
use chatchart::contacts::ContactRegistry;
use chatchart::parser::ExportParser;
use chrono::{TimeZone, Utc};

/// One synthetic export block: either a well-formed message or a system
/// notice (timestamp head without the `Author: Body` shape).
#[derive(Debug, Clone)]
enum Block {
    Message {
        contact: String,
        body: String,
        continuations: Vec<String>,
    },
    Notice(String),
}

fn arb_contact() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Alice".to_string(),
        "Bob".to_string(),
        "Charlie Brown".to_string(),
        "Иван".to_string(),
        "User123".to_string(),
    ])
}

fn arb_body_line() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "hello".to_string(),
        "how are you?".to_string(),
        "see: https://example.com".to_string(),
        "🎉🔥 emoji".to_string(),
        "ok".to_string(),
        "a slightly longer line of text".to_string(),
    ])
}

fn arb_continuation() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "a continuation".to_string(),
        String::new(),
        "   indented-ish".to_string(),
        "second paragraph".to_string(),
    ])
}

fn arb_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        4 => (
            arb_contact(),
            arb_body_line(),
            prop::collection::vec(arb_continuation(), 0..4),
        )
            .prop_map(|(contact, body, continuations)| Block::Message {
                contact,
                body,
                continuations,
            }),
        1 => prop::sample::select(vec![
            "Alice created this group".to_string(),
            "Messages are end-to-end encrypted".to_string(),
        ])
        .prop_map(Block::Notice),
    ]
}

/// Renders blocks into export text, each head stamped with a distinct
/// in-range timestamp.
fn render_export(blocks: &[Block]) -> String {
    let mut lines = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        let day = (i % 28) + 1;
        let month = (i / 28 % 12) + 1;
        let head = format!("[{day:02}/{month:02}/2023, 10:{:02}:{:02}]", i / 60 % 60, i % 60);
        match block {
            Block::Message {
                contact,
                body,
                continuations,
            } => {
                lines.push(format!("{head} {contact}: {body}"));
                lines.extend(continuations.iter().cloned());
            }
            Block::Notice(text) => lines.push(format!("{head} {text}")),
        }
    }
    lines.join("\n")
}

fn arb_timestamp() -> impl Strategy<Value = chrono::DateTime<Utc>> {
    (2020..=2024i32, 1..=12u32, 1..=28u32, 0..24u32, 0..60u32).prop_map(
        |(y, mo, d, h, mi)| Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap(),
    )
}

fn arb_message() -> impl Strategy<Value = Message> {
    (arb_timestamp(), arb_contact(), arb_body_line())
        .prop_map(|(ts, contact, content)| Message::new(ts, contact, content))
}

fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// Message count equals the count of well-formed blocks, no matter how
    /// many continuation lines each block carried.
    #[test]
    fn message_count_matches_wellformed_blocks(blocks in prop::collection::vec(arb_block(), 1..20)) {
        let export = render_export(&blocks);
        let wellformed = blocks.iter().filter(|b| matches!(b, Block::Message { .. })).count();

        let result = ExportParser::new().parse_str(&export, &ContactRegistry::new());
        match result {
            Ok(output) => prop_assert_eq!(output.messages.len(), wellformed),
            Err(e) => {
                prop_assert!(e.is_no_messages());
                prop_assert_eq!(wellformed, 0);
            }
        }
    }

    /// A body is its head line's text plus each continuation in order,
    /// joined with line breaks.
    #[test]
    fn continuation_joining_reconstructs_bodies(blocks in prop::collection::vec(arb_block(), 1..12)) {
        let export = render_export(&blocks);
        let Ok(output) = ExportParser::new().parse_str(&export, &ContactRegistry::new()) else {
            return Ok(());
        };

        let mut parsed = output.messages.iter();
        for block in &blocks {
            if let Block::Message { body, continuations, .. } = block {
                let mut expected = body.clone();
                for cont in continuations {
                    expected.push('\n');
                    expected.push_str(cont);
                }
                let msg = parsed.next().expect("one parsed message per block");
                prop_assert_eq!(msg.content(), expected);
            }
        }
    }

    /// Unresolved names come out deduplicated, in first-appearance order.
    #[test]
    fn unresolved_names_are_first_appearance_dedup(blocks in prop::collection::vec(arb_block(), 1..20)) {
        let export = render_export(&blocks);
        let Ok(output) = ExportParser::new().parse_str(&export, &ContactRegistry::new()) else {
            return Ok(());
        };

        let mut expected: Vec<&str> = Vec::new();
        for msg in &output.messages {
            if !expected.contains(&msg.contact()) {
                expected.push(msg.contact());
            }
        }
        prop_assert_eq!(output.unresolved.names().iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    /// The parser never panics, whatever the input text.
    #[test]
    fn parser_never_panics(text in "\\PC{0,200}") {
        let _ = ExportParser::new().parse_str(&text, &ContactRegistry::new());
    }

    // ============================================
    // AGGREGATION PROPERTIES
    // ============================================

    /// Every bucket carries a tally for every contact in the run, and all
    /// counters stay consistent with the bucket's own totals.
    #[test]
    fn buckets_are_complete_over_contacts(messages in arb_messages(30)) {
        for granularity in Granularity::all() {
            let data = aggregate(&messages, *granularity);
            for bucket in data.buckets() {
                for contact in data.contacts() {
                    prop_assert!(bucket.tally(contact).is_some());
                }
                prop_assert_eq!(bucket.contact_count(), data.contacts().len());
            }
        }
    }

    /// Per-contact totals agree across day, month, and year granularities,
    /// and match the message sequence itself.
    #[test]
    fn totals_agree_across_granularities(messages in arb_messages(30)) {
        let by_day = aggregate(&messages, Granularity::Day);

        for contact in by_day.contacts() {
            let direct_count = messages.iter().filter(|m| m.contact() == contact).count() as u64;
            let direct_chars: u64 = messages
                .iter()
                .filter(|m| m.contact() == contact)
                .map(|m| m.chars() as u64)
                .sum();

            for granularity in Granularity::all() {
                let data = aggregate(&messages, *granularity);
                let count: u64 = data.buckets().iter().map(|b| b.tally(contact).unwrap().messages).sum();
                let chars: u64 = data.buckets().iter().map(|b| b.tally(contact).unwrap().chars).sum();
                prop_assert_eq!(count, direct_count);
                prop_assert_eq!(chars, direct_chars);
            }
        }
    }

    /// Bucket keys are unique within one granularity.
    #[test]
    fn bucket_keys_are_unique(messages in arb_messages(30)) {
        for granularity in Granularity::all() {
            let data = aggregate(&messages, *granularity);
            let mut keys: Vec<&str> = data.buckets().iter().map(|b| b.date()).collect();
            let before = keys.len();
            keys.sort_unstable();
            keys.dedup();
            prop_assert_eq!(keys.len(), before);
        }
    }

    /// Aggregation is deterministic.
    #[test]
    fn aggregation_is_deterministic(messages in arb_messages(30)) {
        let a = aggregate(&messages, Granularity::Day);
        let b = aggregate(&messages, Granularity::Day);
        prop_assert_eq!(a, b);
    }

    /// Bucket count never exceeds message count, and each message landed
    /// somewhere: totals over all contacts equal the sequence length.
    #[test]
    fn every_message_lands_in_a_bucket(messages in arb_messages(30)) {
        let data = aggregate(&messages, Granularity::Day);
        prop_assert!(data.buckets().len() <= messages.len().max(1));

        let total: u64 = data
            .buckets()
            .iter()
            .flat_map(|b| data.contacts().iter().map(move |c| b.tally(c).unwrap().messages))
            .sum();
        prop_assert_eq!(total, messages.len() as u64);
    }
}
