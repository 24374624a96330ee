//! # Processing Pipeline
//!
//! ## Stages
//!
//! 1. **Load**: read the input file into records
//! 2. **Report**: dump records matching the dictionary as it stands
//! 3. **Enhance**: add unknown symptoms from the symptom column
//! 4. **Report**: dump records matching the enhanced dictionary
//! 5. **Persist**: overwrite the dictionary file
//!
//! Any failure aborts the run before stage 5, leaving the dictionary file
//! as the previous run wrote it.

use crate::config::Settings;
use crate::dictionary::SymptomDictionary;
use crate::enhancer::enhance;
use crate::error::Result;
use crate::filter::filter;
use crate::loader::read_records;
use crate::manual::{manual_update, parse_severities, ManualOutcome};
use crate::prompt::{confirm, read_manual_entry, MANUAL_UPDATE_QUESTION};
use crate::report;
use crate::store;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;

/// Counts from one [`process_data`] run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub records: usize,
    pub matched_before: usize,
    pub matched_after: usize,
    /// Keys minted during enhancement, in order
    pub added: Vec<String>,
}

/// Run the load, report, enhance, report, persist sequence on one input file
pub fn process_data<W: Write>(
    input: &Path,
    settings: &Settings,
    dictionary: &mut SymptomDictionary,
    out: &mut W,
) -> Result<ProcessReport> {
    let column = settings.symptom_column.as_str();
    let records = read_records(input)?;

    let before = filter(&records, column, dictionary, settings.matching.filter);
    report::write_filtered(out, &before)?;
    let matched_before = before.len();

    let added = enhance(&records, column, dictionary, &settings.enhance_policy())?;

    let after = filter(&records, column, dictionary, settings.matching.filter);
    report::write_filtered(out, &after)?;
    let matched_after = after.len();

    store::save(dictionary, &settings.dictionary_path)?;
    report::write_dumped(out, &settings.dictionary_path)?;

    let summary = ProcessReport {
        records: records.len(),
        matched_before,
        matched_after,
        added,
    };
    info!(
        "Processed {}: {} records, {} matched before, {} after, {} symptoms added",
        input.display(),
        summary.records,
        summary.matched_before,
        summary.matched_after,
        summary.added.len()
    );
    Ok(summary)
}

/// Ask whether to update manually and, on `Y`, run one manual update
///
/// Returns `None` when the user declined.
pub fn manual_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    settings: &Settings,
    dictionary: &mut SymptomDictionary,
) -> Result<Option<ManualOutcome>> {
    if !confirm(input, out, MANUAL_UPDATE_QUESTION)? {
        return Ok(None);
    }

    let entry = read_manual_entry(input, out)?;
    add_entry(out, settings, dictionary, &entry.symptom, entry.severities).map(Some)
}

/// Add one symptom with severities given as comma-separated text, then
/// report the outcome and where the dictionary was saved
pub fn add_symptom<W: Write>(
    out: &mut W,
    settings: &Settings,
    dictionary: &mut SymptomDictionary,
    symptom: &str,
    severities: &str,
) -> Result<ManualOutcome> {
    add_entry(out, settings, dictionary, symptom, parse_severities(severities))
}

fn add_entry<W: Write>(
    out: &mut W,
    settings: &Settings,
    dictionary: &mut SymptomDictionary,
    symptom: &str,
    severities: Vec<String>,
) -> Result<ManualOutcome> {
    let outcome = manual_update(
        dictionary,
        symptom,
        severities.clone(),
        settings.matching.enhance,
        &settings.dictionary_path,
    )?;
    report::write_manual_outcome(out, symptom, &severities, &outcome)?;
    report::write_dumped(out, &settings.dictionary_path)?;
    Ok(outcome)
}
