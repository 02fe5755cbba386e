//! Tab-delimited transcript records.
//!
//! Layout: `Filename \t LineNumber \t Status \t Text [\t Comment]`.

use serde::Serialize;
use thiserror::Error;

pub const MIN_FIELDS: usize = 4;
pub const MAX_FIELDS: usize = 5;

/// One input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Comment/header lines (starting with `#`) and blank lines, copied as-is.
    Passthrough(String),
    Record(TranscriptRecord),
}

/// A single transcribed line of handwriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptRecord {
    pub filename: String,
    pub line_number: String,
    pub status: String,
    pub text: String,

    /// `Some("")` when the column is present but empty; it is written back that way.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldCountError {
    #[error(
        "expected 4 or 5 tab-separated columns \
         (Filename, LineNumber, Status, Text[, Comment]) but found {0}"
    )]
    TooMany(usize),

    #[error("expected at least 4 tab-separated columns but found {0}")]
    TooFew(usize),
}

/// Split a line (without its line terminator) into a [`Line`].
pub fn parse_line(line: &str) -> Result<Line, FieldCountError> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Passthrough(line.to_owned()));
    }

    let fields: Vec<&str> = line.split('\t').collect();
    match fields.len() {
        n if n > MAX_FIELDS => Err(FieldCountError::TooMany(n)),
        n if n < MIN_FIELDS => Err(FieldCountError::TooFew(n)),
        _ => Ok(Line::Record(TranscriptRecord {
            filename: fields[0].to_owned(),
            line_number: fields[1].to_owned(),
            status: fields[2].to_owned(),
            text: fields[3].to_owned(),
            comment: fields.get(4).map(|c| (*c).to_owned()),
        })),
    }
}

impl TranscriptRecord {
    /// Join the fields back with tabs. No line terminator is appended.
    pub fn to_line(&self) -> String {
        let mut out = [
            self.filename.as_str(),
            self.line_number.as_str(),
            self.status.as_str(),
            self.text.as_str(),
        ]
        .join("\t");
        if let Some(comment) = &self.comment {
            out.push('\t');
            out.push_str(comment);
        }
        out
    }
}
