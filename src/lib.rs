//! `scrawl` — converts annotated handwriting transcripts into raw line-wise text for
//! handwriting recognition (HWR) training.
//!
//! Transcripts are tab-separated records (`Filename`, `LineNumber`, `Status`, `Text`,
//! optional `Comment`) whose text carries `{...}` annotation markup for overlays,
//! insertions, tally marks, mirrored letters and the like. This crate provides:
//! - The markup resolver (`markup`)
//! - Record parsing and output encoders (TSV, JSON)
//! - A file/directory conversion driver with per-file outcomes
//! - Word and character bookkeeping for run metadata
//!
//! ```
//! use scrawl::{Converter, MetaStats};
//!
//! let mut out = Vec::new();
//! let mut stats = MetaStats::new();
//! Converter::default()
//!     .convert("inline", "file1\t1\tOK\tHe{-said}\n".as_bytes(), &mut out, &mut stats)
//!     .unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "file1\t1\tOK\tHe said\n");
//! ```

mod error;

// High-level API (most consumers should start here).
pub mod converter;
pub mod opts;

// Annotation markup and the character tables it relies on.
pub mod charset;
pub mod markup;

// Transcript records.
pub mod record;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod record_encoder;

// Output encoders that serialize records into various formats.
pub mod json_array_encoder;
pub mod tsv_encoder;

// File discovery, batch runs and their metadata.
pub mod batch;
pub mod paths;
pub mod stats;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub use converter::{Converter, FileSummary};
pub use error::{Error, FormatError, FormatErrorKind, PathError, RecordLocation, Result};
pub use markup::{MarkupError, Resolver, resolve};
pub use opts::Opts;
pub use output_type::OutputType;
pub use stats::MetaStats;

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
