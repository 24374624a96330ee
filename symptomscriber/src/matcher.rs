//! Symptom matching strategies
//!
//! Two questions are answered with the same machinery:
//! - is a candidate symptom name already in the dictionary (enhancement and
//!   manual update)?
//! - does a record's raw symptom text mention any known symptom (filtering)?
//!
//! Which notion of "match" applies is an explicit [`MatchStrategy`] chosen
//! per use site, never hard-coded.

use serde::Deserialize;
use std::fmt;

/// How a piece of text is compared against a known symptom name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Text must equal the known name
    Exact,
    /// Known name must occur somewhere in the text
    Containment,
}

impl MatchStrategy {
    /// Compare one candidate against one known name
    pub fn matches(self, candidate: &str, known: &str) -> bool {
        match self {
            MatchStrategy::Exact => candidate == known,
            MatchStrategy::Containment => candidate.contains(known),
        }
    }

    /// Does a raw comma-separated symptom cell mention `known`?
    ///
    /// Containment looks at the untouched cell text, so "fever" also hits
    /// "high fever". Exact compares each trimmed token.
    pub fn mentions(self, cell: &str, known: &str) -> bool {
        match self {
            MatchStrategy::Containment => cell.contains(known),
            MatchStrategy::Exact => split_symptoms(cell).any(|token| token == known),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Exact => write!(f, "exact"),
            MatchStrategy::Containment => write!(f, "containment"),
        }
    }
}

/// Split a symptom cell on commas into trimmed, non-blank tokens (left to right)
pub fn split_symptoms(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|token| !token.is_empty())
}
