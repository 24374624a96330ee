//! # Symptomscriber - Symptom Dictionary Builder
//!
//! Reads patient records from CSV, TSV, JSON or XML files, pulls the
//! free-text symptom mentions out of one column, and grows a persisted
//! dictionary that maps generated keys to symptom names and their severity
//! vocabularies.
//!
//! ## Pipeline Overview
//!
//! 1. **Record Loading**: dispatch on file extension to a format parser
//! 2. **Filtering**: report the records whose symptoms the dictionary knows
//! 3. **Enhancement**: mint `Symptom<N>` entries for unknown symptoms
//! 4. **Re-filtering**: report again against the enhanced dictionary
//! 5. **Persistence**: overwrite the dictionary file
//! 6. **Manual Update** (optional): add one symptom with custom severities
//!
//! The dictionary is an explicit [`SymptomDictionary`] value owned by the
//! caller and passed into each stage.

pub mod config;
pub mod dictionary;
pub mod enhancer;
pub mod error;
pub mod filter;
pub mod loader;
pub mod manual;
pub mod matcher;
pub mod pipeline;
pub mod prompt;
pub mod record;
pub mod report;
pub mod store;

pub use config::Settings;
pub use dictionary::{SymptomDictionary, SymptomEntry, DEFAULT_SEVERITIES};
pub use error::{Error, Result};
pub use loader::{read_records, InputFormat};
pub use matcher::MatchStrategy;
pub use pipeline::{add_symptom, manual_session, process_data, ProcessReport};
pub use record::Record;
