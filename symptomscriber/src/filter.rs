//! Record filtering against the current dictionary

use crate::dictionary::SymptomDictionary;
use crate::matcher::MatchStrategy;
use crate::record::Record;

/// A record retained by [`filter`], with its position in the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matched<'a> {
    pub index: usize,
    pub record: &'a Record,
}

/// Keep records whose symptom cell mentions at least one known symptom
///
/// Records with a null or absent cell never match. Input order is kept and
/// nothing is copied or mutated.
pub fn filter<'a>(
    records: &'a [Record],
    column: &str,
    dictionary: &SymptomDictionary,
    strategy: MatchStrategy,
) -> Vec<Matched<'a>> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            record
                .get(column)
                .is_some_and(|cell| dictionary.is_mentioned_in(cell, strategy))
        })
        .map(|(index, record)| Matched { index, record })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::default_severities;

    fn records(cells: &[Option<&str>]) -> Vec<Record> {
        cells
            .iter()
            .map(|cell| [("Other_Symptoms", *cell)].into_iter().collect::<Record>())
            .collect()
    }

    fn dictionary(names: &[&str]) -> SymptomDictionary {
        let mut dictionary = SymptomDictionary::new();
        for name in names {
            dictionary.add(*name, default_severities()).unwrap();
        }
        dictionary
    }

    #[test]
    fn empty_dictionary_matches_nothing() {
        let input = records(&[Some("fever"), Some("cough")]);
        let empty = SymptomDictionary::new();
        let matched = filter(&input, "Other_Symptoms", &empty, MatchStrategy::Containment);
        assert!(matched.is_empty());
    }

    #[test]
    fn keeps_order_and_skips_null_cells() {
        let input = records(&[Some("cough"), None, Some("rash"), Some("fever, cough")]);
        let dict = dictionary(&["cough"]);

        let matched = filter(&input, "Other_Symptoms", &dict, MatchStrategy::Containment);
        let indices: Vec<_> = matched.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 3]);
        assert!(std::ptr::eq(matched[1].record, &input[3]));
    }

    #[test]
    fn containment_hits_partial_mentions_exact_does_not() {
        let input = records(&[Some("high fever"), Some("fever")]);
        let dict = dictionary(&["fever"]);

        let loose = filter(&input, "Other_Symptoms", &dict, MatchStrategy::Containment);
        assert_eq!(loose.len(), 2);

        let strict = filter(&input, "Other_Symptoms", &dict, MatchStrategy::Exact);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].index, 1);
    }

    #[test]
    fn wrong_column_matches_nothing() {
        let input = records(&[Some("fever")]);
        let dict = dictionary(&["fever"]);
        assert!(filter(&input, "Symptoms", &dict, MatchStrategy::Containment).is_empty());
    }
}
