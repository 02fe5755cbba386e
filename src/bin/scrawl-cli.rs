// Command-line driver: converts a transcript file, or every transcript below a folder,
// into raw line-wise text for handwriting recognition.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use scrawl::batch::{self, BatchReport};
use scrawl::paths::{self, Mode, Plan};
use scrawl::{Converter, Opts, OutputType};

#[derive(Parser, Debug)]
#[command(name = "scrawl-cli", version)]
#[command(about = "Convert annotated handwriting transcripts into raw text for HWR training")]
struct Params {
    /// Path to the input transcript file or folder.
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Path to the output file or folder. Must be the same kind as the input.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Replace typographic characters (curly quotes, ellipsis, arrows, ...) with plain ones.
    #[arg(short = 'r', long = "reduce-chars", default_value_t = false)]
    reduce_chars: bool,

    #[arg(long = "output-type", value_enum, default_value_t = OutputType::Tsv)]
    output_type: OutputType,

    /// Folder for run metadata (word list, character counts, per-file results).
    ///
    /// Defaults to `<OUTPUT>/metadata` when converting a folder; a single file only
    /// writes metadata when this is given.
    #[arg(long = "metadata")]
    metadata_dir: Option<PathBuf>,
}

impl Params {
    fn opts(&self) -> Opts {
        Opts {
            reduce_characters: self.reduce_chars,
            output_type: self.output_type,
        }
    }
}

fn main() -> ExitCode {
    scrawl::init_logging();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = ?err, "scrawl-cli failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every file converted.
fn run() -> Result<bool> {
    let params = Params::parse();

    let plan = paths::plan(&params.input, &params.output).context("cannot plan conversion")?;
    let converter = Converter::new(params.opts());

    let report = match plan.mode {
        Mode::Directory => run_with_progress(&plan, &converter)?,
        Mode::File => batch::run(&plan, &converter, |_| {}),
    };

    let metadata_dir = params
        .metadata_dir
        .as_deref()
        .or(plan.metadata_dir.as_deref());
    if let Some(dir) = metadata_dir {
        batch::write_metadata(dir, &report)
            .with_context(|| format!("failed to write metadata to {}", dir.display()))?;
    }

    print!("{}", summary_string(&report));
    Ok(report.is_success())
}

fn run_with_progress(plan: &Plan, converter: &Converter) -> Result<BatchReport> {
    let pb = ProgressBar::new(plan.jobs.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {pos}/{len} {bar:40.cyan/blue} {msg}")
            .context("invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let report = batch::run(plan, converter, |outcome| {
        pb.set_message(outcome.input.display().to_string());
        pb.inc(1);
    });

    pb.finish_and_clear();
    Ok(report)
}

fn summary_string(report: &BatchReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "converted {} of {} file(s), {} record(s)",
        report.succeeded(),
        report.outcomes.len(),
        report.stats.records()
    );
    for outcome in report.failed() {
        let _ = writeln!(
            out,
            "  failed: {}: {}",
            outcome.input.display(),
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }

    out
}
