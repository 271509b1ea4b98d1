//! Integration tests for the directory pipeline.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use pdf_outline::{
    DocumentPipeline, Error, ErrorMode, FileOutcome, JsonFormat, LayoutParser, PageLayout,
    PipelineConfig, Result,
};
use tempfile::TempDir;

/// Serves canned page layouts keyed by file name; unknown names fail to parse.
#[derive(Default)]
struct CannedParser {
    documents: HashMap<String, Vec<PageLayout>>,
}

impl CannedParser {
    fn with(mut self, name: &str, pages: Vec<PageLayout>) -> Self {
        self.documents.insert(name.to_string(), pages);
        self
    }
}

impl LayoutParser for CannedParser {
    fn parse_path(&self, path: &Path) -> Result<Vec<PageLayout>> {
        let name = path.file_name().unwrap().to_string_lossy();
        self.documents
            .get(name.as_ref())
            .cloned()
            .ok_or_else(|| Error::PdfParse(format!("malformed: {}", name)))
    }
}

fn report_pages() -> Vec<PageLayout> {
    vec![
        PageLayout::new(1)
            .with_text("RFP\n")
            .with_text("Request for Proposal To Present A Proposal\n")
            .with_text("Summary Of The Ontario Digital Library\nTimeline\n"),
        PageLayout::new(2).with_text("Background Of The Digital Library\n7\n"),
    ]
}

fn form_pages() -> Vec<PageLayout> {
    vec![PageLayout::new(1)
        .with_text("LTC Advance Form\nGovernment Servant Details\n")
        .with_text("1. Name of the Government Servant\n2. Designation\n3. Pay + SI + NPA\nDate\n")]
}

fn setup(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("input")).unwrap();
    for file in files {
        fs::write(dir.path().join("input").join(file), b"%PDF-1.4\n").unwrap();
    }
    dir
}

fn config(dir: &TempDir) -> PipelineConfig {
    PipelineConfig::new()
        .with_input_dir(dir.path().join("input"))
        .with_output_dir(dir.path().join("output"))
}

fn parser() -> CannedParser {
    CannedParser::default()
        .with("report.pdf", report_pages())
        .with("FORM.PDF", form_pages())
}

#[test]
fn test_run_writes_one_json_per_pdf() {
    let dir = setup(&["report.pdf", "FORM.PDF", "notes.txt"]);
    let pipeline = DocumentPipeline::with_parser(config(&dir), parser());

    let report = pipeline.run().unwrap();

    assert_eq!(report.written.len(), 2);
    assert!(report.is_success());
    let output = dir.path().join("output");
    assert!(output.join("report.json").exists());
    assert!(output.join("FORM.json").exists());
    assert!(!output.join("notes.json").exists());
}

#[test]
fn test_report_document_json() {
    let dir = setup(&["report.pdf"]);
    DocumentPipeline::with_parser(config(&dir), parser())
        .run()
        .unwrap();

    let json = fs::read_to_string(dir.path().join("output/report.json")).unwrap();
    let expected = r#"{
  "title": "Request for Proposal To Present A Proposal",
  "outline": [
    {
      "level": "H1",
      "text": "Request for Proposal To Present A Proposal",
      "page": 1
    },
    {
      "level": "H1",
      "text": "Summary Of The Ontario Digital Library",
      "page": 1
    },
    {
      "level": "H1",
      "text": "Background Of The Digital Library",
      "page": 2
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn test_form_outline_vetoed_title_kept() {
    let dir = setup(&["FORM.PDF"]);
    DocumentPipeline::with_parser(config(&dir), parser())
        .run()
        .unwrap();

    let json = fs::read_to_string(dir.path().join("output/FORM.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    // the title block keeps its interior line break
    assert_eq!(value["title"], "LTC Advance Form\nGovernment Servant Details");
    assert_eq!(value["outline"], serde_json::json!([]));
}

#[test]
fn test_round_trip_keys() {
    let dir = setup(&["report.pdf", "FORM.PDF"]);
    let report = DocumentPipeline::with_parser(config(&dir), parser())
        .run()
        .unwrap();

    for path in &report.written {
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["outline", "title"]);

        for entry in object["outline"].as_array().unwrap() {
            let entry = entry.as_object().unwrap();
            let mut keys: Vec<_> = entry.keys().map(String::as_str).collect();
            keys.sort();
            assert_eq!(keys, vec!["level", "page", "text"]);
            assert_eq!(entry["level"], "H1");
            assert!(entry["page"].is_u64());
        }

        let parsed: pdf_outline::DocumentResult =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert!(!parsed.title.is_empty());
    }
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = setup(&["report.pdf", "FORM.PDF"]);
    let pipeline = DocumentPipeline::with_parser(config(&dir), parser());

    pipeline.run().unwrap();
    let first = fs::read(dir.path().join("output/report.json")).unwrap();
    pipeline.run().unwrap();
    let second = fs::read(dir.path().join("output/report.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = setup(&["report.pdf", "FORM.PDF"]);
    let sequential = DocumentPipeline::with_parser(config(&dir), parser())
        .run()
        .unwrap();
    let before = fs::read(dir.path().join("output/report.json")).unwrap();

    let parallel = DocumentPipeline::with_parser(config(&dir).with_parallel(true), parser())
        .run()
        .unwrap();
    let after = fs::read(dir.path().join("output/report.json")).unwrap();

    assert_eq!(sequential.written, parallel.written);
    assert_eq!(before, after);
}

#[test]
fn test_strict_mode_aborts_on_bad_file() {
    let dir = setup(&["broken.pdf", "report.pdf"]);
    let pipeline = DocumentPipeline::with_parser(config(&dir), parser());

    let err = pipeline.run().unwrap_err();
    match err {
        Error::File { path, source } => {
            assert!(path.ends_with("broken.pdf"));
            assert!(matches!(*source, Error::PdfParse(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // inputs are processed in name order, so nothing after the failure is written
    assert!(!dir.path().join("output/report.json").exists());
}

#[test]
fn test_parallel_strict_mode_reports_first_failure() {
    let dir = setup(&["broken.pdf", "report.pdf"]);
    let pipeline = DocumentPipeline::with_parser(config(&dir).with_parallel(true), parser());

    let err = pipeline.run().unwrap_err();
    assert!(matches!(&err, Error::File { path, .. } if path.ends_with("broken.pdf")));
    // every input is converted before the failure is reported
    assert!(dir.path().join("output/report.json").exists());
}

#[test]
fn test_lenient_mode_continues() {
    let dir = setup(&["broken.pdf", "report.pdf"]);
    let pipeline = DocumentPipeline::with_parser(
        config(&dir).with_error_mode(ErrorMode::Lenient),
        parser(),
    );

    let seen = Mutex::new(Vec::new());
    let report = pipeline
        .run_with(|outcome| {
            let label = match outcome {
                FileOutcome::Written { headings, .. } => format!("ok:{headings}"),
                FileOutcome::Failed { .. } => "failed".to_string(),
            };
            seen.lock().unwrap().push(label);
        })
        .unwrap();

    assert_eq!(report.written.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("broken.pdf"));
    assert_eq!(seen.into_inner().unwrap(), vec!["failed", "ok:3"]);
}

#[test]
fn test_creates_output_dir_and_handles_empty_input() {
    let dir = setup(&[]);
    let report = DocumentPipeline::with_parser(config(&dir), parser())
        .run()
        .unwrap();

    assert_eq!(report.total(), 0);
    assert!(dir.path().join("output").is_dir());
}

#[test]
fn test_missing_input_dir_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = DocumentPipeline::with_parser(config(&dir), parser()).run();
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_compact_output() {
    let dir = setup(&["report.pdf"]);
    DocumentPipeline::with_parser(
        config(&dir).with_json_format(JsonFormat::Compact),
        parser(),
    )
    .run()
    .unwrap();

    let json = fs::read_to_string(dir.path().join("output/report.json")).unwrap();
    assert!(!json.contains('\n'));
    assert!(json.starts_with(r#"{"title":"Request for Proposal"#));
}
