//! # Symptom Dictionary
//!
//! In-memory form of the dictionary file:
//!
//! ```json
//! {
//!     "Symptom1": { "fever": ["Mild", "Low", "High"] },
//!     "Symptom2": { "cough": ["Mild", "Low", "High"] }
//! }
//! ```
//!
//! ## Invariants
//!
//! - Keys are unique and keep insertion order (file order on load)
//! - Every key maps to exactly one symptom name
//! - Newly minted keys are `Symptom<N>` with `N` strictly greater than
//!   every existing numeric suffix, so keys never collide even after the
//!   file was edited by hand and entries removed
//!
//! serde's map types would either sort keys ("Symptom10" before
//! "Symptom2") or drop order entirely, so (de)serialization is written
//! out against an ordered `Vec`.

use crate::error::Error;
use crate::matcher::MatchStrategy;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Severity vocabulary given to automatically discovered symptoms
pub const DEFAULT_SEVERITIES: [&str; 3] = ["Mild", "Low", "High"];

/// Prefix of every minted dictionary key
pub const KEY_PREFIX: &str = "Symptom";

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Symptom(\d+)$").expect("static key pattern"));

/// One dictionary value: a symptom name and its ordered severity labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomEntry {
    pub name: String,
    pub severities: Vec<String>,
}

impl SymptomEntry {
    pub fn new(name: impl Into<String>, severities: Vec<String>) -> Self {
        Self {
            name: name.into(),
            severities,
        }
    }
}

/// Ordered symptom dictionary owning its key counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomDictionary {
    entries: Vec<(String, SymptomEntry)>,
    /// `None` once the `u64` suffix space is used up
    next_index: Option<u64>,
}

impl Default for SymptomDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl SymptomDictionary {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_index: Some(1),
        }
    }

    /// Build from already-keyed entries, keeping their order
    fn from_entries(entries: Vec<(String, SymptomEntry)>) -> Self {
        let highest = entries
            .iter()
            .filter_map(|(key, _)| key_index(key))
            .max()
            .unwrap_or(0);
        let next_index = highest.max(entries.len() as u64).checked_add(1);
        Self {
            entries,
            next_index,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymptomEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn get(&self, key: &str) -> Option<&SymptomEntry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, entry)| entry)
    }

    /// Symptom names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, entry)| entry.name.as_str())
    }

    /// Key the next [`add`](Self::add) will use, if any is left
    pub fn next_key(&self) -> Option<String> {
        self.next_index.map(|index| format!("{}{}", KEY_PREFIX, index))
    }

    /// Is `candidate` already present under any key?
    ///
    /// Full linear scan in insertion order; the result does not depend on
    /// that order.
    pub fn is_known(&self, candidate: &str, strategy: MatchStrategy) -> bool {
        self.names().any(|known| strategy.matches(candidate, known))
    }

    /// Does a raw symptom cell mention any known symptom?
    pub fn is_mentioned_in(&self, cell: &str, strategy: MatchStrategy) -> bool {
        self.names().any(|known| strategy.mentions(cell, known))
    }

    /// Append a new entry under a freshly minted key and return that key
    ///
    /// No containment check happens here; callers decide with
    /// [`is_known`](Self::is_known) first.
    ///
    /// # Errors
    ///
    /// [`Error::KeySpaceExhausted`] when a hand-edited file already holds
    /// `Symptom18446744073709551615`; the dictionary is left unchanged.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        severities: Vec<String>,
    ) -> crate::Result<String> {
        let index = self.next_index.ok_or(Error::KeySpaceExhausted)?;
        let key = format!("{}{}", KEY_PREFIX, index);
        self.entries.push((key.clone(), SymptomEntry::new(name, severities)));
        self.next_index = index.checked_add(1);
        Ok(key)
    }
}

/// Numeric suffix of a `Symptom<N>` key
fn key_index(key: &str) -> Option<u64> {
    KEY_PATTERN
        .captures(key)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

pub fn default_severities() -> Vec<String> {
    DEFAULT_SEVERITIES.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Serialization
// ============================================================================

impl Serialize for SymptomEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.severities)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for SymptomEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = SymptomEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with exactly one symptom name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let (name, severities) = map
                    .next_entry::<String, Vec<String>>()?
                    .ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;

                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }

                Ok(SymptomEntry { name, severities })
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

impl Serialize for SymptomDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SymptomDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DictionaryVisitor;

        impl<'de> Visitor<'de> for DictionaryVisitor {
            type Value = SymptomDictionary;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping symptom keys to symptom entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, SymptomEntry)> = Vec::new();
                while let Some((key, entry)) = map.next_entry::<String, SymptomEntry>()? {
                    if entries.iter().any(|(existing, _)| *existing == key) {
                        return Err(de::Error::custom(format!("duplicate symptom key {key}")));
                    }
                    entries.push((key, entry));
                }
                Ok(SymptomDictionary::from_entries(entries))
            }
        }

        deserializer.deserialize_map(DictionaryVisitor)
    }
}
