//! Dictionary file persistence
//!
//! The file is read whole at start-up and rewritten whole at every
//! checkpoint (end of enhancement, end of a manual update). Writes go to a
//! sibling temp file first and are renamed over the target.

use crate::dictionary::SymptomDictionary;
use crate::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// Load the dictionary, or an empty one when the file does not exist
///
/// # Errors
///
/// Any read failure other than "not found", or malformed JSON.
pub fn load(path: &Path) -> Result<SymptomDictionary> {
    debug!("Loading dictionary from {}", path.display());

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                "No dictionary found at {}. Initializing with an empty dictionary.",
                path.display()
            );
            return Ok(SymptomDictionary::new());
        }
        Err(e) => return Err(e.into()),
    };

    let dictionary: SymptomDictionary = serde_json::from_str(&content)?;
    info!("Loaded {} dictionary entries", dictionary.len());
    Ok(dictionary)
}

/// Render the dictionary as the on-disk JSON text (4-space indentation)
pub fn to_pretty_json(dictionary: &SymptomDictionary) -> Result<String> {
    let mut content = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut content, PrettyFormatter::with_indent(b"    "));
    dictionary.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&content).into_owned())
}

/// Overwrite the dictionary file (temp file + rename)
///
/// # Errors
///
/// Any failure to create the parent directory, write, sync or rename.
pub fn save(dictionary: &SymptomDictionary, path: &Path) -> Result<()> {
    debug!(
        "Persisting {} dictionary entries to {}",
        dictionary.len(),
        path.display()
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = to_pretty_json(dictionary)?;
    let temp_path = path.with_extension("tmp");

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!("Dictionary has been dumped to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::default_severities;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_an_empty_dictionary() {
        let dir = TempDir::new().unwrap();
        let dictionary = load(&dir.path().join("symptoms_dict.json")).unwrap();
        assert!(dictionary.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("symptoms_dict.json");

        let mut dictionary = SymptomDictionary::new();
        dictionary.add("fever", default_severities()).unwrap();
        dictionary.add("cough", vec!["High".to_string(), "Mild".to_string()]).unwrap();

        save(&dictionary, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, dictionary);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn file_is_pretty_printed_with_four_spaces() {
        let mut dictionary = SymptomDictionary::new();
        dictionary.add("fever", default_severities()).unwrap();

        let expected = "{\n    \"Symptom1\": {\n        \"fever\": [\n            \"Mild\",\n            \"Low\",\n            \"High\"\n        ]\n    }\n}";
        assert_eq!(to_pretty_json(&dictionary).unwrap(), expected);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symptoms_dict.json");

        let mut big = SymptomDictionary::new();
        for name in ["fever", "cough", "rash"] {
            big.add(name, default_severities()).unwrap();
        }
        save(&big, &path).unwrap();

        let mut small = SymptomDictionary::new();
        small.add("fever", default_severities()).unwrap();
        save(&small, &path).unwrap();

        assert_eq!(load(&path).unwrap(), small);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symptoms_dict.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load(&path), Err(crate::Error::Json(_))));
    }
}
