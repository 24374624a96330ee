//! Dictionary enhancement: add symptoms seen in records but not yet known

use crate::dictionary::SymptomDictionary;
use crate::error::Result;
use crate::matcher::{split_symptoms, MatchStrategy};
use crate::record::Record;
use tracing::{debug, info, warn};

/// What to do with each newly discovered symptom
#[derive(Debug, Clone)]
pub struct EnhancePolicy {
    /// How a candidate is compared against known names
    pub strategy: MatchStrategy,
    /// Severity labels given to every new entry
    pub severities: Vec<String>,
}

/// Scan `column` of every record and append unknown symptoms to the dictionary
///
/// Records are visited in source order and each cell's comma-separated
/// tokens left to right, so key numbering follows first appearance. Every
/// candidate is checked against the live dictionary, which means a symptom
/// repeated later in the same run is only added once.
///
/// # Returns
///
/// The keys minted by this call, in insertion order.
///
/// # Errors
///
/// [`crate::Error::KeySpaceExhausted`] if no key is left to mint. Entries
/// added before that point stay in the dictionary.
pub fn enhance(
    records: &[Record],
    column: &str,
    dictionary: &mut SymptomDictionary,
    policy: &EnhancePolicy,
) -> Result<Vec<String>> {
    if !records.is_empty() && !records.iter().any(|record| record.has_column(column)) {
        warn!("No record has a '{}' column", column);
    }

    let mut added = Vec::new();

    for cell in records.iter().filter_map(|record| record.get(column)) {
        for candidate in split_symptoms(cell) {
            if dictionary.is_known(candidate, policy.strategy) {
                continue;
            }
            let key = dictionary.add(candidate, policy.severities.clone())?;
            debug!("Added {} -> {}", key, candidate);
            added.push(key);
        }
    }

    info!(
        "Enhancement added {} new symptoms ({} total)",
        added.len(),
        dictionary.len()
    );
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::default_severities;

    fn policy() -> EnhancePolicy {
        EnhancePolicy {
            strategy: MatchStrategy::Exact,
            severities: default_severities(),
        }
    }

    fn record(symptoms: Option<&str>) -> Record {
        [("Name", Some("patient")), ("Other_Symptoms", symptoms)]
            .into_iter()
            .collect()
    }

    #[test]
    fn fresh_dictionary_gets_one_entry_per_token() {
        let mut dictionary = SymptomDictionary::new();
        let added = enhance(
            &[record(Some("fever, cough"))],
            "Other_Symptoms",
            &mut dictionary,
            &policy(),
        )
        .unwrap();

        assert_eq!(added, vec!["Symptom1", "Symptom2"]);
        assert_eq!(dictionary.get("Symptom1").unwrap().name, "fever");
        assert_eq!(dictionary.get("Symptom2").unwrap().name, "cough");
        assert_eq!(
            dictionary.get("Symptom2").unwrap().severities,
            vec!["Mild", "Low", "High"]
        );
    }

    #[test]
    fn known_and_repeated_symptoms_are_not_duplicated() {
        let mut dictionary = SymptomDictionary::new();
        dictionary.add("fever", vec!["Low".to_string()]).unwrap();

        let records = [
            record(Some("fever, headache")),
            record(None),
            record(Some("headache,fever , rash")),
        ];
        let added = enhance(&records, "Other_Symptoms", &mut dictionary, &policy()).unwrap();

        assert_eq!(added, vec!["Symptom2", "Symptom3"]);
        let names: Vec<_> = dictionary.names().collect();
        assert_eq!(names, vec!["fever", "headache", "rash"]);
        assert_eq!(dictionary.get("Symptom1").unwrap().severities, vec!["Low"]);
    }

    #[test]
    fn blank_tokens_and_missing_columns_are_ignored() {
        let mut dictionary = SymptomDictionary::new();
        let other: Record = [("Name", Some("x"))].into_iter().collect();
        let added = enhance(
            &[record(Some(" , ,")), other],
            "Other_Symptoms",
            &mut dictionary,
            &policy(),
        )
        .unwrap();

        assert!(added.is_empty());
        assert!(dictionary.is_empty());
    }

    #[test]
    fn containment_strategy_treats_longer_mentions_as_known() {
        let mut dictionary = SymptomDictionary::new();
        dictionary.add("fever", default_severities()).unwrap();

        let containment = EnhancePolicy {
            strategy: MatchStrategy::Containment,
            severities: default_severities(),
        };
        let added = enhance(
            &[record(Some("high fever, cough"))],
            "Other_Symptoms",
            &mut dictionary,
            &containment,
        )
        .unwrap();

        assert_eq!(added, vec!["Symptom2"]);
        assert_eq!(dictionary.get("Symptom2").unwrap().name, "cough");
    }

    #[test]
    fn configured_severities_are_used() {
        let mut dictionary = SymptomDictionary::new();
        let custom = EnhancePolicy {
            strategy: MatchStrategy::Exact,
            severities: vec!["None".to_string(), "Severe".to_string()],
        };
        enhance(&[record(Some("rash"))], "Other_Symptoms", &mut dictionary, &custom).unwrap();

        assert_eq!(
            dictionary.get("Symptom1").unwrap().severities,
            vec!["None", "Severe"]
        );
    }
}
