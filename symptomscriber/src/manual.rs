//! Manual dictionary update: one symptom with caller-supplied severities

use crate::dictionary::SymptomDictionary;
use crate::error::{Error, Result};
use crate::matcher::MatchStrategy;
use crate::store;
use std::path::Path;
use tracing::info;

/// Result of a manual update attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualOutcome {
    /// New entry appended under this key
    Added { key: String },
    /// The symptom was already present; the dictionary is unchanged
    AlreadyKnown,
}

/// Split "Mild, Low , High" into trimmed labels
///
/// Labels keep their position, so "Mild,,High" yields an empty middle
/// label. Blank input yields no labels at all.
pub fn parse_severities(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|label| label.trim().to_string()).collect()
}

/// Add `symptom` with exactly the given severities unless it is already known,
/// then persist the dictionary
///
/// # Errors
///
/// - [`Error::InvalidInput`] for a blank symptom name, or a severity list
///   with no non-blank label for a symptom that would be added
/// - [`Error::KeySpaceExhausted`] if no key is left to mint
/// - any persistence failure from [`store::save`]
pub fn manual_update(
    dictionary: &mut SymptomDictionary,
    symptom: &str,
    severities: Vec<String>,
    strategy: MatchStrategy,
    dictionary_path: &Path,
) -> Result<ManualOutcome> {
    let symptom = symptom.trim();
    if symptom.is_empty() {
        return Err(Error::InvalidInput("symptom name is empty".to_string()));
    }

    let outcome = if dictionary.is_known(symptom, strategy) {
        info!("Symptom '{}' already exists in the dictionary", symptom);
        ManualOutcome::AlreadyKnown
    } else {
        if severities.iter().all(|label| label.is_empty()) {
            return Err(Error::InvalidInput(format!(
                "no severity levels given for '{}'",
                symptom
            )));
        }
        let key = dictionary.add(symptom, severities)?;
        info!("Added '{}' as {}", symptom, key);
        ManualOutcome::Added { key }
    };

    store::save(dictionary, dictionary_path)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::default_severities;
    use tempfile::TempDir;

    #[test]
    fn parse_severities_trims_labels() {
        assert_eq!(parse_severities("Mild, Low ,High"), vec!["Mild", "Low", "High"]);
        assert_eq!(parse_severities("Mild,,High"), vec!["Mild", "", "High"]);
        assert_eq!(parse_severities("Low, "), vec!["Low", ""]);
        assert_eq!(parse_severities("   "), Vec::<String>::new());
    }

    #[test]
    fn new_symptom_is_added_with_given_levels_and_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symptoms_dict.json");
        let mut dictionary = SymptomDictionary::new();
        dictionary.add("fever", default_severities()).unwrap();

        let outcome = manual_update(
            &mut dictionary,
            " nausea ",
            parse_severities("Low, Severe"),
            MatchStrategy::Exact,
            &path,
        )
        .unwrap();

        assert_eq!(
            outcome,
            ManualOutcome::Added {
                key: "Symptom2".to_string()
            }
        );
        let entry = dictionary.get("Symptom2").unwrap();
        assert_eq!(entry.name, "nausea");
        assert_eq!(entry.severities, vec!["Low", "Severe"]);
        assert_eq!(store::load(&path).unwrap(), dictionary);
    }

    #[test]
    fn blank_labels_between_commas_are_stored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symptoms_dict.json");
        let mut dictionary = SymptomDictionary::new();

        manual_update(
            &mut dictionary,
            "rash",
            parse_severities("Mild,,High"),
            MatchStrategy::Exact,
            &path,
        )
        .unwrap();

        assert_eq!(dictionary.get("Symptom1").unwrap().severities, vec!["Mild", "", "High"]);
        assert_eq!(store::load(&path).unwrap(), dictionary);
    }

    #[test]
    fn known_symptom_leaves_dictionary_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symptoms_dict.json");
        let mut dictionary = SymptomDictionary::new();
        dictionary.add("fever", default_severities()).unwrap();
        let before = dictionary.clone();

        let outcome = manual_update(
            &mut dictionary,
            "fever",
            parse_severities("Low"),
            MatchStrategy::Exact,
            &path,
        )
        .unwrap();

        assert_eq!(outcome, ManualOutcome::AlreadyKnown);
        assert_eq!(dictionary, before);
    }

    #[test]
    fn blank_input_is_rejected_without_saving() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symptoms_dict.json");
        let mut dictionary = SymptomDictionary::new();

        let blank_name = manual_update(
            &mut dictionary,
            "  ",
            default_severities(),
            MatchStrategy::Exact,
            &path,
        );
        assert!(matches!(blank_name, Err(Error::InvalidInput(_))));

        let no_levels =
            manual_update(&mut dictionary, "rash", Vec::new(), MatchStrategy::Exact, &path);
        assert!(matches!(no_levels, Err(Error::InvalidInput(_))));

        let blank_levels = manual_update(
            &mut dictionary,
            "rash",
            parse_severities(" , "),
            MatchStrategy::Exact,
            &path,
        );
        assert!(matches!(blank_levels, Err(Error::InvalidInput(_))));

        assert!(dictionary.is_empty());
        assert!(!path.exists());
    }
}
