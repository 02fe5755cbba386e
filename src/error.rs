use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::markup::MarkupError;
use crate::record::FieldCountError;

/// Scrawl's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Scrawl's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Walk(#[from] ignore::Error),

    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn file(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::File { path, source }
    }
}

/// Input/output paths that cannot be used for a conversion run.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("input path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "input {} is a directory, so the output {} must be a directory too",
        .input.display(),
        .output.display()
    )]
    OutputNotDirectory { input: PathBuf, output: PathBuf },

    #[error("invalid file format for {}: only .{extension} files are allowed", .path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("no .{extension} files found in the input folder {}", .dir.display())]
    NoInputFiles { dir: PathBuf, extension: String },
}

/// A transcript line that violates the input format.
#[derive(Debug, Error)]
#[error("{location}: {kind}")]
pub struct FormatError {
    pub location: RecordLocation,
    pub kind: FormatErrorKind,
}

#[derive(Debug, Error)]
pub enum FormatErrorKind {
    #[error(transparent)]
    FieldCount(#[from] FieldCountError),

    #[error("{source} in text {text:?}")]
    Markup { source: MarkupError, text: String },
}

/// Where a record came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLocation {
    /// Name of the input being converted (usually its path).
    pub source_name: String,

    /// 1-based physical line in the input.
    pub position: usize,

    /// The record's own `Filename` and `LineNumber` columns, when it had them.
    pub record: Option<(String, String)>,
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_name, self.position)?;
        if let Some((filename, line_number)) = &self.record {
            write!(f, " (record {filename}, line {line_number})")?;
        }
        Ok(())
    }
}
