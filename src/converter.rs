//! High-level API for converting transcripts.
//!
//! `Converter` wires the pieces together: line parsing → markup resolution →
//! (optional) character reduction → bookkeeping → encoder. Each piece stays testable
//! in its own module.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, debug_span, info};

use crate::charset::reduce_characters;
use crate::error::{FormatError, FormatErrorKind, RecordLocation};
use crate::json_array_encoder::JsonArrayEncoder;
use crate::markup::Resolver;
use crate::opts::Opts;
use crate::output_type::OutputType;
use crate::record::{Line, parse_line};
use crate::record_encoder::RecordEncoder;
use crate::stats::MetaStats;
use crate::tsv_encoder::TsvEncoder;
use crate::{Error, Result};

/// Line counts of one converted input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Transcript records converted.
    pub records: usize,

    /// Comment and blank lines copied unchanged.
    pub passthrough: usize,
}

/// Converts annotated transcripts into raw line-wise text.
///
/// The converter itself is immutable; per-file state (the open insertion span) lives
/// inside a single `convert` call, and bookkeeping goes into the `MetaStats` the caller
/// passes in.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    opts: Opts,
}

impl Converter {
    pub fn new(opts: Opts) -> Self {
        Self { opts }
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    /// Convert a transcript read from `r` and write the result to `w`.
    ///
    /// `source_name` only appears in diagnostics. The first format violation aborts the
    /// conversion; whatever was already written stays written.
    pub fn convert<R, W>(
        &self,
        source_name: &str,
        r: R,
        w: W,
        stats: &mut MetaStats,
    ) -> Result<FileSummary>
    where
        R: BufRead,
        W: Write,
    {
        let writer = BufWriter::new(w);

        match self.opts.output_type {
            OutputType::Tsv => {
                let mut encoder = TsvEncoder::new(writer);
                let run_res = self.convert_with_encoder(source_name, r, &mut encoder, stats);
                merge_run_and_close(run_res, encoder.close())
            }
            OutputType::Json => {
                let mut encoder = JsonArrayEncoder::new(writer);
                let run_res = self.convert_with_encoder(source_name, r, &mut encoder, stats);
                merge_run_and_close(run_res, encoder.close())
            }
        }
    }

    /// Convert the file at `input` into `output`.
    ///
    /// Output goes to `<output>.part` first and is renamed into place only when the whole
    /// file converted, so a failed conversion never leaves a truncated output behind.
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        stats: &mut MetaStats,
    ) -> Result<FileSummary> {
        let file = File::open(input).map_err(Error::file(input))?;
        let source_name = input.display().to_string();
        let part_path = part_path(output);

        let result = (|| -> Result<FileSummary> {
            let mut out = File::create(&part_path).map_err(Error::file(&part_path))?;
            let summary = self.convert(&source_name, BufReader::new(file), &mut out, stats)?;
            out.sync_all().map_err(Error::file(&part_path))?;
            fs::rename(&part_path, output).map_err(Error::file(output))?;
            Ok(summary)
        })();

        match &result {
            Ok(summary) => info!(
                input = %input.display(),
                output = %output.display(),
                records = summary.records,
                "converted"
            ),
            Err(_) => {
                let _ = fs::remove_file(&part_path);
            }
        }

        result
    }

    fn convert_with_encoder<R, E>(
        &self,
        source_name: &str,
        r: R,
        encoder: &mut E,
        stats: &mut MetaStats,
    ) -> Result<FileSummary>
    where
        R: BufRead,
        E: RecordEncoder,
    {
        let mut resolver = Resolver::new();
        let mut summary = FileSummary::default();

        // Location and text of the record that opened the current insertion span.
        let mut span_origin: Option<(RecordLocation, String)> = None;

        for (idx, line) in r.lines().enumerate() {
            let line = line?;
            let position = idx + 1;

            let span = debug_span!("record", source = source_name, position);
            let _enter = span.enter();

            let parsed = parse_line(&line).map_err(|err| FormatError {
                location: RecordLocation {
                    source_name: source_name.to_owned(),
                    position,
                    record: None,
                },
                kind: err.into(),
            })?;

            let mut record = match parsed {
                Line::Record(record) => record,
                passthrough @ Line::Passthrough(_) => {
                    encoder.write_line(&passthrough)?;
                    summary.passthrough += 1;
                    continue;
                }
            };

            let location = RecordLocation {
                source_name: source_name.to_owned(),
                position,
                record: Some((record.filename.clone(), record.line_number.clone())),
            };

            let span_was_open = resolver.insertion_open();
            let resolution =
                resolver
                    .resolve_field(&record.text)
                    .map_err(|source| FormatError {
                        location: location.clone(),
                        kind: FormatErrorKind::Markup {
                            source,
                            text: record.text.clone(),
                        },
                    })?;
            if resolution.opened_insertion {
                debug!(reopened = span_was_open, "insertion span opened");
                span_origin = Some((location, record.text.clone()));
            } else if span_was_open && !resolver.insertion_open() {
                debug!("insertion span closed");
                span_origin = None;
            }

            let mut text = resolution.text;
            if self.opts.reduce_characters {
                text = reduce_characters(&text);
            }
            stats.observe_field(&text, &resolution.annotations);

            record.text = text;
            encoder.write_line(&Line::Record(record))?;
            summary.records += 1;
        }

        if let (Err(source), Some((location, text))) = (resolver.finish(), span_origin) {
            return Err(FormatError {
                location,
                kind: FormatErrorKind::Markup { source, text },
            }
            .into());
        }

        Ok(summary)
    }
}

fn part_path(output: &Path) -> PathBuf {
    PathBuf::from(format!("{}.part", output.display()))
}

fn merge_run_and_close(
    run_res: Result<FileSummary>,
    close_res: Result<()>,
) -> Result<FileSummary> {
    match (run_res, close_res) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), _) => Err(err),
    }
}
