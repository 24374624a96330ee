//! # Record Loader
//!
//! Turns a patient data file into an ordered sequence of [`Record`]s. The
//! format is chosen from the file extension alone; there is no content
//! sniffing.
//!
//! ## Supported Formats
//!
//! - **CSV** (`.csv`): comma-delimited, first row is the header
//! - **TSV** (`.tsv`): tab-delimited, first row is the header
//! - **JSON** (`.json`): array of objects, or an object of columns
//! - **XML** (`.xml`): every `<Patient>` child of the document root is one
//!   record, its child elements are the columns
//!
//! Anything else fails with [`Error::UnsupportedFormat`] before the file is
//! opened.
//!
//! In delimited and XML input a cell whose whole text is one of
//! [`NULL_MARKERS`] is null, the same as an empty cell. JSON has its own
//! `null` and keeps strings verbatim.

use crate::error::{Error, Result};
use crate::record::Record;
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Element name of one record inside an XML document
const XML_RECORD_TAG: &[u8] = b"Patient";

/// Cell texts read as "no value" in delimited and XML input
///
/// Matched case-sensitively against the untrimmed cell, so `"none"` and
/// `" NA"` are kept as text.
pub const NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Closed set of input formats, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Tsv,
    Json,
    Xml,
}

impl InputFormat {
    /// Pick the format for a path by its extension (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "tsv" => Ok(InputFormat::Tsv),
            "json" => Ok(InputFormat::Json),
            "xml" => Ok(InputFormat::Xml),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse raw file contents into records
    pub fn parse(self, bytes: &[u8]) -> Result<Vec<Record>> {
        match self {
            InputFormat::Csv => parse_delimited(bytes, b','),
            InputFormat::Tsv => parse_delimited(bytes, b'\t'),
            InputFormat::Json => parse_json(bytes),
            InputFormat::Xml => parse_xml(bytes),
        }
    }
}

/// Read a patient data file into records
///
/// # Errors
///
/// Returns error if:
/// - The extension is not supported (the file is never opened)
/// - The file cannot be read
/// - The contents are malformed for the chosen format
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let format = InputFormat::from_path(path)?;
    debug!("Reading {} as {:?}", path.display(), format);

    let bytes = fs::read(path)?;
    let records = format.parse(&bytes)?;

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

// ============================================================================
// Delimited text
// ============================================================================

/// Parse CSV/TSV with a mandatory header row
///
/// Empty fields, [`NULL_MARKERS`] and fields missing from short rows are
/// null. Rows longer than the header keep only the named columns.
fn parse_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = row.get(i).and_then(cell_value);
                (column.to_string(), value)
            })
            .collect();
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// JSON
// ============================================================================

fn parse_json(bytes: &[u8]) -> Result<Vec<Record>> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(rows) => rows.into_iter().map(record_from_row).collect(),
        Value::Object(columns) => records_from_columns(columns),
        _ => Err(json_shape_error(
            "expected an array of records or an object of columns",
        )),
    }
}

/// Records orientation: `[{"col": value, ...}, ...]`
fn record_from_row(row: Value) -> Result<Record> {
    match row {
        Value::Object(fields) => Ok(fields
            .into_iter()
            .map(|(column, value)| (column, cell_text(value)))
            .collect()),
        _ => Err(json_shape_error("array element is not an object")),
    }
}

/// Columns orientation: `{"col": {"0": value, ...}, ...}` or `{"col": [value, ...]}`
fn records_from_columns(columns: serde_json::Map<String, Value>) -> Result<Vec<Record>> {
    let mut rows: Vec<(String, Record)> = Vec::new();

    for (column, cells) in columns {
        let cells: Vec<(String, Value)> = match cells {
            Value::Object(indexed) => indexed.into_iter().collect(),
            Value::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(i, value)| (i.to_string(), value))
                .collect(),
            _ => return Err(json_shape_error("column is neither an object nor an array")),
        };

        for (row_key, value) in cells {
            let position = match rows.iter().position(|(key, _)| *key == row_key) {
                Some(position) => position,
                None => {
                    rows.push((row_key, Record::new()));
                    rows.len() - 1
                }
            };
            rows[position].1.insert(column.clone(), cell_text(value));
        }
    }

    // Row labels are usually integers; order them numerically when they all are
    if rows.iter().all(|(key, _)| key.parse::<u64>().is_ok()) {
        rows.sort_by_key(|(key, _)| key.parse::<u64>().unwrap_or(u64::MAX));
    }

    Ok(rows.into_iter().map(|(_, record)| record).collect())
}

fn cell_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        nested => Some(nested.to_string()),
    }
}

/// Null for [`NULL_MARKERS`], owned text otherwise
fn cell_value(text: &str) -> Option<String> {
    if NULL_MARKERS.contains(&text) {
        None
    } else {
        Some(text.to_string())
    }
}

fn json_shape_error(message: &str) -> Error {
    Error::Json(<serde_json::Error as serde::de::Error>::custom(message))
}

// ============================================================================
// XML
// ============================================================================

/// Parse `<Root><Patient><Column>text</Column>...</Patient>...</Root>`
///
/// ## Parsing Strategy
///
/// - **Depth tracking**: root is depth 1, `Patient` depth 2, columns depth 3
/// - Only direct `Patient` children of the root become records
/// - A column's value is its text up to the first nested element; that
///   element and everything after it inside the column are ignored
/// - Empty or self-closing column elements, and [`NULL_MARKERS`], are null
fn parse_xml(bytes: &[u8]) -> Result<Vec<Record>> {
    let mut reader = XmlReader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut current: Option<Record> = None;
    let mut column: Option<(String, String)> = None;
    // set once the open column has seen a child element
    let mut nested = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                match depth {
                    2 if e.name().as_ref() == XML_RECORD_TAG => current = Some(Record::new()),
                    3 if current.is_some() => {
                        column = Some((tag_name(e.name().as_ref()), String::new()));
                        nested = false;
                    }
                    4 => nested = true,
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => match depth + 1 {
                2 if e.name().as_ref() == XML_RECORD_TAG => records.push(Record::new()),
                3 => {
                    if let Some(record) = current.as_mut() {
                        record.insert(tag_name(e.name().as_ref()), None);
                    }
                }
                4 => nested = true,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if depth == 3 && !nested {
                    if let Some((_, text)) = column.as_mut() {
                        let unescaped = e.unescape().map_err(|err| {
                            Error::Xml(format!(
                                "error at position {}: {}",
                                reader.buffer_position(),
                                err
                            ))
                        })?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if depth == 3 && !nested {
                    if let Some((_, text)) = column.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
            }
            Ok(Event::End(_)) => {
                match depth {
                    3 => {
                        if let (Some(record), Some((tag, text))) = (current.as_mut(), column.take())
                        {
                            record.insert(tag, cell_value(&text));
                        }
                    }
                    2 => {
                        if let Some(record) = current.take() {
                            records.push(record);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
