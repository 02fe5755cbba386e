//! Turning the user's input/output paths into a list of files to convert.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::Result;
use crate::error::PathError;

/// Extension of transcript files, compared ASCII case-insensitively.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Name of the directory, inside the output directory, that receives run metadata.
pub const METADATA_DIR: &str = "metadata";

/// One input file and where its conversion goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A single input file converted into a single output file.
    File,

    /// Every transcript below an input directory, mirrored into an output directory.
    Directory,
}

/// What a run will do.
#[derive(Debug, Clone)]
pub struct Plan {
    pub mode: Mode,

    /// Jobs sorted by input path.
    pub jobs: Vec<FileJob>,

    /// Set in directory mode; the directory already exists.
    pub metadata_dir: Option<PathBuf>,
}

/// Work out the jobs for `input` → `output`.
///
/// Directory mode creates the output directory and its metadata directory when they are
/// missing. File mode touches nothing.
pub fn plan(input: &Path, output: &Path) -> Result<Plan> {
    if input.is_dir() {
        return plan_directory(input, output);
    }

    if input.is_file() {
        require_extension(input)?;
        require_extension(output)?;
        return Ok(Plan {
            mode: Mode::File,
            jobs: vec![FileJob {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }],
            metadata_dir: None,
        });
    }

    Err(PathError::NotFound(input.to_path_buf()).into())
}

/// Whether `path` carries the transcript extension.
pub fn is_transcript(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TRANSCRIPT_EXTENSION))
}

fn plan_directory(input: &Path, output: &Path) -> Result<Plan> {
    if output.is_file() {
        return Err(PathError::OutputNotDirectory {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        }
        .into());
    }

    let metadata_dir = output.join(METADATA_DIR);
    fs::create_dir_all(&metadata_dir).map_err(crate::Error::file(&metadata_dir))?;

    let walker = WalkBuilder::new(input).standard_filters(false).build();

    let mut jobs = Vec::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_some_and(|ft| ft.is_file()) || !is_transcript(path) {
            continue;
        }

        // An output directory nested in the input must not feed its own results back in.
        if path.starts_with(output) {
            debug!(path = %path.display(), "skipping file inside the output directory");
            continue;
        }

        let Ok(rel_path) = path.strip_prefix(input) else {
            continue;
        };

        jobs.push(FileJob {
            input: path.to_path_buf(),
            output: output.join(rel_path),
        });
    }

    if jobs.is_empty() {
        return Err(PathError::NoInputFiles {
            dir: input.to_path_buf(),
            extension: TRANSCRIPT_EXTENSION.to_owned(),
        }
        .into());
    }

    jobs.sort_by(|a, b| a.input.cmp(&b.input));

    Ok(Plan {
        mode: Mode::Directory,
        jobs,
        metadata_dir: Some(metadata_dir),
    })
}

fn require_extension(path: &Path) -> Result<()> {
    if is_transcript(path) {
        return Ok(());
    }

    Err(PathError::UnsupportedExtension {
        path: path.to_path_buf(),
        extension: TRANSCRIPT_EXTENSION.to_owned(),
    }
    .into())
}
