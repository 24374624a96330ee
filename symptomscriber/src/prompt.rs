//! Interactive console prompts
//!
//! Readers and writers are injected so the prompt sequence can be driven
//! from tests as well as from stdin/stdout.

use crate::error::Result;
use crate::manual::parse_severities;
use std::io::{BufRead, Write};

pub const MANUAL_UPDATE_QUESTION: &str = "Do you want to manually update the dictionary : [Y,N]";
pub const SYMPTOM_PROMPT: &str = "Enter the symptom you want to add: ";
pub const SEVERITY_PROMPT: &str =
    "Enter severity levels (comma-separated, e.g., Mild, Low, High): ";

/// Answers collected by [`read_manual_entry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    pub symptom: String,
    pub severities: Vec<String>,
}

/// Print `prompt` and read one line without its line ending (empty at EOF)
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Yes/no gate: only an exact `Y` counts as yes
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool> {
    Ok(ask(input, output, question)? == "Y")
}

/// Ask for the symptom name, then its comma-separated severity levels
pub fn read_manual_entry<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<ManualEntry> {
    let symptom = ask(input, output, SYMPTOM_PROMPT)?;
    let severities = parse_severities(&ask(input, output, SEVERITY_PROMPT)?);
    Ok(ManualEntry { symptom, severities })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn only_capital_y_confirms() {
        let answers = [
            ("Y\n", true),
            ("Y\r\n", true),
            ("y\n", false),
            ("N\n", false),
            ("", false),
            ("Yes\n", false),
        ];
        for (answer, expected) in answers {
            let mut output: Vec<u8> = Vec::new();
            let confirmed =
                confirm(&mut Cursor::new(answer), &mut output, MANUAL_UPDATE_QUESTION).unwrap();
            assert_eq!(confirmed, expected, "answer {answer:?}");
        }
    }

    #[test]
    fn manual_entry_reads_two_lines() {
        let mut input = Cursor::new("nausea\nLow, Moderate ,Severe\n");
        let mut output = Vec::new();

        let entry = read_manual_entry(&mut input, &mut output).unwrap();

        assert_eq!(entry.symptom, "nausea");
        assert_eq!(entry.severities, vec!["Low", "Moderate", "Severe"]);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with(SYMPTOM_PROMPT));
        assert!(shown.ends_with(SEVERITY_PROMPT));
    }
}
