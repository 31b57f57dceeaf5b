//! Contact name resolution and the raw-name cleanup applied before lookup.
//!
//! Export tools wrap display names in invisible directionality and zero-width
//! marks that vary by locale and platform. [`clean_name`] strips those so the
//! same contact always produces the same lookup key, and [`ContactRegistry`]
//! maps the cleaned raw name to the curated canonical one.
//!
//! A name missing from the registry is not an error: the message keeps the
//! cleaned raw name, and the name is collected (first appearance, no
//! duplicates) so it can be written back to the registry file as a placeholder
//! for manual curation on a later run.
//!
//! # Example
//!
//! ```
//! use chatchart::contacts::{ContactRegistry, clean_name};
//!
//! let mut registry = ContactRegistry::new();
//! registry.insert("+1 555 0100", "Alice");
//!
//! assert_eq!(registry.replace("+1 555 0100"), Some("Alice"));
//! assert_eq!(registry.replace("Unknown"), None);
//!
//! // Lookup keys are stable across rendering artifacts
//! assert_eq!(clean_name("\u{200E}Alice\u{200F}"), "Alice");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{ChatchartError, Result};

/// Invisible marks some export tools prepend/append to display names:
/// LRM/RLM, the directional embedding and override block, zero-width
/// space/joiners, word joiner, narrow no-break space, and BOM.
const FORMATTING_MARKS: &[char] = &[
    '\u{200B}', '\u{200C}', '\u{200D}', '\u{200E}', '\u{200F}', '\u{202A}', '\u{202B}',
    '\u{202C}', '\u{202D}', '\u{202E}', '\u{202F}', '\u{2060}', '\u{FEFF}',
];

/// Normalizes a raw extracted name for registry lookup.
///
/// Strips the invisible formatting marks export encodings insert around
/// names, then trims surrounding whitespace. Visible characters, including
/// emoji and combining accents, pass through untouched.
pub fn clean_name(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !FORMATTING_MARKS.contains(c))
        .collect();
    stripped.trim().to_string()
}

/// Mapping from raw export names to curated canonical names.
///
/// Loaded once at startup and consulted read-only during parsing. The
/// on-disk form is a flat JSON object:
///
/// ```json
/// {
///   "+49 151 1234567": "Daniel",
///   "Mum ❤": "Mum"
/// }
/// ```
///
/// An entry with an empty canonical value is a placeholder written by
/// [`save_replacements`](ContactRegistry::save_replacements) and behaves as
/// absent on lookup.
#[derive(Debug, Clone, Default)]
pub struct ContactRegistry {
    replacements: HashMap<String, String>,
}

impl ContactRegistry {
    /// Creates an empty registry. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a registry from a JSON file.
    ///
    /// A missing file yields an empty registry; that is the normal state on
    /// the first run. A file that exists but does not parse as a string map
    /// is a [`ChatchartError::Registry`] error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let replacements: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| ChatchartError::registry(path, e))?;
        Ok(Self { replacements })
    }

    /// Adds or overwrites a single mapping.
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) {
        self.replacements.insert(raw.into(), canonical.into());
    }

    /// Looks up the canonical name for a raw name.
    ///
    /// Returns `None` when the name is unknown or only present as an
    /// uncurated placeholder. Absence is an expected outcome, not a failure.
    pub fn replace(&self, raw: &str) -> Option<&str> {
        self.replacements
            .get(raw)
            .map(String::as_str)
            .filter(|canonical| !canonical.is_empty())
    }

    /// Returns the number of entries, placeholders included.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Returns `true` if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Merges unresolved names into the registry file as empty placeholders.
    ///
    /// Existing entries are preserved; each new name is written as
    /// `"name": ""` for the user to fill in before the next run. The file is
    /// created if it does not exist. Keys are written in sorted order so
    /// repeated runs produce identical files.
    pub fn save_replacements(path: &Path, names: &[String]) -> Result<()> {
        let mut merged: BTreeMap<String, String> = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| ChatchartError::registry(path, e))?
        } else {
            BTreeMap::new()
        };

        for name in names {
            merged.entry(name.clone()).or_default();
        }

        fs::write(path, serde_json::to_string_pretty(&merged)?)?;
        Ok(())
    }
}

/// Raw names seen during a run that the registry could not resolve.
///
/// Keeps first-appearance order and rejects duplicates, matching what the
/// registry file curation step expects to receive.
#[derive(Debug, Clone, Default)]
pub struct UnresolvedNames {
    names: Vec<String>,
}

impl UnresolvedNames {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a name unless it was already recorded.
    ///
    /// Returns `true` if the name was newly added.
    pub fn record(&mut self, name: &str) -> bool {
        if self.names.iter().any(|n| n == name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Returns the recorded names in first-appearance order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of distinct unresolved names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Consumes the collection, yielding the ordered names.
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}
