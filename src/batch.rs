//! Running a [`Plan`] file by file.
//!
//! A broken transcript fails only its own file: the run records the error, moves on to
//! the next job and reports every outcome at the end. Bookkeeping of a failed file is
//! discarded so the totals only describe what was written.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::Error;
use crate::Result;
use crate::converter::{Converter, FileSummary};
use crate::paths::Plan;
use crate::stats::{MetaReport, MetaStats};

/// Run metadata file, written into the metadata directory.
pub const REPORT_FILE: &str = "report.json";

/// Word list file, one unique word per line in first-seen order.
pub const DICTIONARY_FILE: &str = "dictionary.txt";

/// Result of converting a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per job, in job order.
    pub outcomes: Vec<FileOutcome>,

    /// Merged bookkeeping of every successful file.
    pub stats: MetaStats,
}

impl BatchReport {
    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_success)
    }
}

#[derive(Serialize)]
struct MetadataFile<'a> {
    stats: MetaReport<'a>,
    files: &'a [FileOutcome],
}

/// Convert every job of `plan`, calling `on_progress` after each file.
pub fn run<F>(plan: &Plan, converter: &Converter, mut on_progress: F) -> BatchReport
where
    F: FnMut(&FileOutcome),
{
    let mut report = BatchReport::default();

    for job in &plan.jobs {
        let mut stats = MetaStats::new();
        let result = ensure_parent(&job.output)
            .and_then(|()| converter.convert_file(&job.input, &job.output, &mut stats));

        let outcome = match result {
            Ok(summary) => {
                report.stats.merge(stats);
                FileOutcome {
                    input: job.input.clone(),
                    output: job.output.clone(),
                    summary: Some(summary),
                    error: None,
                }
            }
            Err(err) => {
                error!(input = %job.input.display(), error = %err, "conversion failed");
                FileOutcome {
                    input: job.input.clone(),
                    output: job.output.clone(),
                    summary: None,
                    error: Some(err.to_string()),
                }
            }
        };

        on_progress(&outcome);
        report.outcomes.push(outcome);
    }

    info!(
        files = report.outcomes.len(),
        failed = report.outcomes.len() - report.succeeded(),
        records = report.stats.records(),
        "batch finished"
    );

    report
}

/// Write `report.json` and `dictionary.txt` into `dir`, creating it when missing.
pub fn write_metadata(dir: &Path, report: &BatchReport) -> Result<()> {
    fs::create_dir_all(dir).map_err(Error::file(dir))?;

    let report_path = dir.join(REPORT_FILE);
    let file = fs::File::create(&report_path).map_err(Error::file(&report_path))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(
        &mut w,
        &MetadataFile {
            stats: report.stats.report(),
            files: &report.outcomes,
        },
    )?;
    writeln!(w)?;
    w.flush()?;

    let dictionary_path = dir.join(DICTIONARY_FILE);
    let file = fs::File::create(&dictionary_path).map_err(Error::file(&dictionary_path))?;
    let mut w = BufWriter::new(file);
    for word in report.stats.words() {
        writeln!(w, "{word}")?;
    }
    w.flush()?;

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(Error::file(parent))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{FileJob, Mode};

    fn plan_for(dir: &Path, files: &[(&str, &str)]) -> anyhow::Result<Plan> {
        let mut jobs = Vec::new();
        for (name, content) in files {
            let input = dir.join("in").join(name);
            fs::create_dir_all(dir.join("in"))?;
            fs::write(&input, content)?;
            jobs.push(FileJob {
                input,
                output: dir.join("out").join(name),
            });
        }
        Ok(Plan {
            mode: Mode::Directory,
            jobs,
            metadata_dir: Some(dir.join("out").join("metadata")),
        })
    }

    #[test]
    fn continues_after_a_failed_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let plan = plan_for(
            dir.path(),
            &[
                ("a.txt", "f\t1\tOK\t{open\n"),
                ("b.txt", "f\t1\tOK\tHe{-said}\n"),
            ],
        )?;

        let mut seen = 0;
        let report = run(&plan, &Converter::default(), |_| seen += 1);

        assert_eq!(seen, 2);
        assert!(!report.is_success());
        assert_eq!(report.succeeded(), 1);

        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].input.ends_with("a.txt"));
        assert!(
            failed[0]
                .error
                .as_deref()
                .is_some_and(|e| e.contains("missing closing bracket"))
        );

        assert!(!dir.path().join("out/a.txt").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("out/b.txt"))?,
            "f\t1\tOK\tHe said\n"
        );
        Ok(())
    }

    #[test]
    fn stats_only_cover_successful_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let plan = plan_for(
            dir.path(),
            &[
                ("a.txt", "f\t1\tOK\tgood\nf\t2\tOK\tbroken}\n"),
                ("b.txt", "f\t1\tOK\tfine\n"),
            ],
        )?;

        let report = run(&plan, &Converter::default(), |_| {});
        assert_eq!(report.stats.words(), ["fine"]);
        assert_eq!(report.stats.records(), 1);
        Ok(())
    }

    #[test]
    fn writes_report_and_dictionary() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let plan = plan_for(dir.path(), &[("a.txt", "f\t1\tOK\tEr {e+E}r er\n")])?;
        let report = run(&plan, &Converter::default(), |_| {});

        let metadata_dir = dir.path().join("out/metadata");
        write_metadata(&metadata_dir, &report)?;

        assert_eq!(
            fs::read_to_string(metadata_dir.join(DICTIONARY_FILE))?,
            "Er\ner\n"
        );

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(metadata_dir.join(REPORT_FILE))?)?;
        assert_eq!(json["stats"]["records"], 1);
        assert_eq!(json["stats"]["annotations"]["overlay"], 1);
        assert_eq!(json["files"][0]["summary"]["records"], 1);
        assert!(json["files"][0].get("error").is_none());
        Ok(())
    }
}
