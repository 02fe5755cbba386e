use std::fs;
use std::path::Path;

use scrawl::batch::{self, DICTIONARY_FILE, REPORT_FILE};
use scrawl::markup::AnnotationKind;
use scrawl::paths::{self, METADATA_DIR, Mode};
use scrawl::{Converter, Error, MetaStats, Opts};

const FIXTURES: &str = "tests/fixtures/transcripts";

fn convert(input: &str) -> anyhow::Result<String> {
    let mut out = Vec::new();
    let mut stats = MetaStats::new();
    Converter::new(Opts::default()).convert("inline", input.as_bytes(), &mut out, &mut stats)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn separator_line_end_to_end() -> anyhow::Result<()> {
    assert_eq!(convert("file1\t1\tOK\tHe{-said}\n")?, "file1\t1\tOK\tHe said\n");
    Ok(())
}

#[test]
fn overlay_line_end_to_end() -> anyhow::Result<()> {
    assert_eq!(convert("file1\t2\tOK\t{e+E}rror\n")?, "file1\t2\tOK\terror\n");
    Ok(())
}

#[test]
fn converting_output_again_changes_nothing() -> anyhow::Result<()> {
    let once = convert(&fs::read_to_string(Path::new(FIXTURES).join("page_01.txt"))?)?;
    assert_eq!(convert(&once)?, once);
    Ok(())
}

#[test]
fn converts_a_single_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("page_01.txt");

    let plan = paths::plan(&Path::new(FIXTURES).join("page_01.txt"), &output)?;
    assert_eq!(plan.mode, Mode::File);

    let report = batch::run(&plan, &Converter::default(), |_| {});
    assert!(report.is_success());

    assert_eq!(
        fs::read_to_string(&output)?,
        "# Filename\tLineNumber\tStatus\tText\tComment\n\
         page_01\t1\tOK\tHe said error\n\
         page_01\t2\tOK\tals tag niemals\tchecked\n\
         page_01\t3\tOK\tEr | ging\n\
         page_01\t4\tOK\tnach Hause heute\n"
    );
    assert_eq!(report.stats.records(), 4);
    assert_eq!(report.stats.annotation_count(AnnotationKind::Emoticon), 1);
    Ok(())
}

#[test]
fn converts_a_folder_and_reports_per_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("out");

    let plan = paths::plan(Path::new(FIXTURES), &output)?;
    assert_eq!(plan.mode, Mode::Directory);
    assert_eq!(plan.jobs.len(), 3);

    let report = batch::run(&plan, &Converter::default(), |_| {});
    assert_eq!(report.succeeded(), 2);

    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].input.ends_with("letters/broken.txt"));
    assert!(!output.join("letters/broken.txt").exists());

    assert_eq!(
        fs::read_to_string(output.join("letters/page_02.txt"))?,
        "page_02\t1\tOK\tGrüße\npage_02\t2\tunsure\tabd \n"
    );
    assert!(output.join("page_01.txt").is_file());

    let metadata_dir = plan.metadata_dir.clone().expect("folder runs have metadata");
    assert_eq!(metadata_dir, output.join(METADATA_DIR));
    batch::write_metadata(&metadata_dir, &report)?;

    let dictionary = fs::read_to_string(metadata_dir.join(DICTIONARY_FILE))?;
    assert!(dictionary.starts_with("Grüße\nabd\n"));
    assert!(dictionary.contains("niemals\n"));
    assert!(!dictionary.contains("fine"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(metadata_dir.join(REPORT_FILE))?)?;
    assert_eq!(json["stats"]["records"], 6);
    assert_eq!(json["stats"]["annotations"]["empty"], 1);
    assert_eq!(json["files"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn missing_input_is_a_path_error() {
    let err = paths::plan(Path::new("tests/fixtures/nope"), Path::new("out")).unwrap_err();
    assert!(matches!(err, Error::Path(_)));
}
