//! Human-readable console output
//!
//! Text only, not meant for machine parsing.

use crate::dictionary::SymptomDictionary;
use crate::filter::Matched;
use crate::manual::ManualOutcome;
use std::io::{self, Write};
use std::path::Path;

pub const FILTER_HEADER: &str = "Filtered Data Based on Available Symptoms in Dictionary:";

/// Rendering of a null cell
const NULL_CELL: &str = "NaN";

/// Dump retained records, one line each, prefixed by their input row index
pub fn write_filtered<W: Write>(out: &mut W, matched: &[Matched<'_>]) -> io::Result<()> {
    writeln!(out, "{}", FILTER_HEADER)?;
    if matched.is_empty() {
        return writeln!(out, "Empty result");
    }

    for m in matched {
        let cells: Vec<String> = m
            .record
            .iter()
            .map(|(column, value)| format!("{}={}", column, value.unwrap_or(NULL_CELL)))
            .collect();
        writeln!(out, "{:>5}  {}", m.index, cells.join("  "))?;
    }
    Ok(())
}

pub fn write_dumped<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "Dictionary has been dumped to {}", path.display())
}

pub fn write_missing_dictionary<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(
        out,
        "No dictionary found at {}. Initializing with an empty dictionary.",
        path.display()
    )
}

pub fn write_manual_outcome<W: Write>(
    out: &mut W,
    symptom: &str,
    severities: &[String],
    outcome: &ManualOutcome,
) -> io::Result<()> {
    match outcome {
        ManualOutcome::AlreadyKnown => {
            writeln!(out, "Symptom '{}' already exists in the dictionary.", symptom.trim())
        }
        ManualOutcome::Added { key } => writeln!(
            out,
            "Added '{}' with levels [{}] to the dictionary as {}.",
            symptom.trim(),
            severities.join(", "),
            key
        ),
    }
}

/// One line per entry: `Symptom1  fever: Mild, Low, High`
pub fn write_dictionary<W: Write>(out: &mut W, dictionary: &SymptomDictionary) -> io::Result<()> {
    if dictionary.is_empty() {
        return writeln!(out, "Dictionary is empty");
    }
    for (key, entry) in dictionary.iter() {
        writeln!(out, "{}  {}: {}", key, entry.name, entry.severities.join(", "))?;
    }
    Ok(())
}
