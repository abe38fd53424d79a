use std::fs;
use std::path::Path;

use anyhow::{Result, bail};

use crate::pdf::PageSource;
use crate::util::today_local;

use super::engine::{MANUAL_REVIEW_DIR, ProgressSink, SplitOptions, run_split};

struct FakeSource {
    pages: Vec<String>,
}

impl FakeSource {
    fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|page| page.to_string()).collect(),
        }
    }
}

impl PageSource for FakeSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page_number: usize) -> Result<String> {
        Ok(self.pages[page_number - 1].clone())
    }

    fn write_page(&self, page_number: usize, path: &Path) -> Result<()> {
        fs::write(path, format!("page {page_number}"))?;
        Ok(())
    }
}

struct FailingSource {
    inner: FakeSource,
    fail_on: usize,
}

impl PageSource for FailingSource {
    fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    fn page_text(&self, page_number: usize) -> Result<String> {
        self.inner.page_text(page_number)
    }

    fn write_page(&self, page_number: usize, path: &Path) -> Result<()> {
        if page_number == self.fail_on {
            bail!("disk full");
        }
        self.inner.write_page(page_number, path)
    }
}

#[derive(Default)]
struct CollectingSink {
    lines: Vec<String>,
}

impl ProgressSink for CollectingSink {
    fn line(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}

fn options(output_root: &Path, simulate: bool) -> SplitOptions {
    SplitOptions {
        output_root: output_root.to_path_buf(),
        file_pattern: "[LINE 0].pdf".to_string(),
        folder_pattern: "[LINE 1]".to_string(),
        route_to_folders: false,
        simulate,
    }
}

fn audit_rows(audit_path: &Path) -> Vec<Vec<String>> {
    let contents = fs::read_to_string(audit_path).unwrap();
    contents
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(|field| field.to_string()).collect())
        .collect()
}

#[test]
fn zero_page_document_short_circuits_without_writes() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let source = FakeSource::new(&[]);
    let mut sink = CollectingSink::default();
    let summary = run_split(&source, &options(&output_root, false), &mut sink).unwrap();

    assert_eq!(summary.total, 0);
    assert_eq!(summary.success, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.audit_path, None);
    assert!(!output_root.exists());
}

#[test]
fn simulated_run_never_touches_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let source = FakeSource::new(&["Smith", "???", "Jones"]);
    let mut sink = CollectingSink::default();
    let mut opts = options(&output_root, true);
    opts.route_to_folders = true;
    let summary = run_split(&source, &opts, &mut sink).unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.audit_path, None);
    assert!(!output_root.exists());
    assert!(dir.path().read_dir().unwrap().next().is_none());
}

#[test]
fn simulated_run_reports_would_be_outcomes_through_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let source = FakeSource::new(&["Smith", "???"]);
    let mut sink = CollectingSink::default();
    run_split(&source, &options(&output_root, true), &mut sink).unwrap();

    assert!(
        sink.lines
            .iter()
            .any(|line| line.contains("page 1: would save as") && line.contains("Smith.pdf"))
    );
    assert!(
        sink.lines
            .iter()
            .any(|line| line.contains("page 2: no valid filename"))
    );
    assert!(
        sink.lines
            .iter()
            .any(|line| line.contains("no audit CSV written"))
    );
}

#[test]
fn simulated_run_dumps_first_page_lines_for_pattern_building() {
    let dir = tempfile::tempdir().unwrap();
    let source = FakeSource::new(&["Smith\nMarch 2026"]);
    let mut sink = CollectingSink::default();
    run_split(&source, &options(&dir.path().join("out"), true), &mut sink).unwrap();

    assert!(sink.lines.iter().any(|line| line == "LINE 0: Smith"));
    assert!(sink.lines.iter().any(|line| line == "LINE 1: March 2026"));
}

#[test]
fn unresolvable_live_page_lands_in_manual_review() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let pages: Vec<String> = (1..=10)
        .map(|index| {
            if index == 4 {
                "???".to_string()
            } else {
                format!("Person{index}")
            }
        })
        .collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();

    let source = FakeSource::new(&page_refs);
    let mut sink = CollectingSink::default();
    let summary = run_split(&source, &options(&output_root, false), &mut sink).unwrap();

    assert_eq!(summary.success, 9);
    assert_eq!(summary.failed, 1);
    assert!(
        output_root
            .join(MANUAL_REVIEW_DIR)
            .join("Unmatched_Page_4.pdf")
            .is_file()
    );

    let rows = audit_rows(summary.audit_path.as_deref().unwrap());
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[3][0], "4");
    assert_eq!(rows[3][1], "Failed");
    assert_eq!(rows[3][2], "");
    assert_eq!(rows[3][5], "Sent to Unmatched_Page_4.pdf");
}

#[test]
fn manual_review_dir_is_not_created_when_everything_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let source = FakeSource::new(&["Smith", "Jones"]);
    let mut sink = CollectingSink::default();
    run_split(&source, &options(&output_root, false), &mut sink).unwrap();

    assert!(!output_root.join(MANUAL_REVIEW_DIR).exists());
}

#[test]
fn colliding_file_names_survive_under_numeric_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let source = FakeSource::new(&["Smith", "Smith"]);
    let mut sink = CollectingSink::default();
    let summary = run_split(&source, &options(&output_root, false), &mut sink).unwrap();

    assert_eq!(summary.success, 2);
    assert!(output_root.join("Smith.pdf").is_file());
    assert!(output_root.join("Smith_1.pdf").is_file());

    let rows = audit_rows(summary.audit_path.as_deref().unwrap());
    assert_eq!(rows[0][1], "OK");
    assert_eq!(rows[0][2], "Smith.pdf");
    assert_eq!(rows[1][1], "OK");
    assert_eq!(rows[1][2], "Smith_1.pdf");
}

#[test]
fn folder_routing_uses_normalized_names_and_unknown_bucket() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let source = FakeSource::new(&["Smith\nŠantić", "Jones"]);
    let mut sink = CollectingSink::default();
    let mut opts = options(&output_root, false);
    opts.route_to_folders = true;
    let summary = run_split(&source, &opts, &mut sink).unwrap();

    assert_eq!(summary.success, 2);
    assert!(output_root.join("santic").join("Smith.pdf").is_file());
    assert!(output_root.join("unknown").join("Jones.pdf").is_file());

    let rows = audit_rows(summary.audit_path.as_deref().unwrap());
    assert_eq!(rows[0][3], "Šantić");
    assert_eq!(rows[0][4], "santic");
    assert_eq!(rows[1][3], "");
    assert_eq!(rows[1][4], "");
}

#[test]
fn audit_log_name_is_date_keyed_and_collision_suffixed() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");
    let date = today_local().format("%Y-%m-%d").to_string();

    let source = FakeSource::new(&["Smith"]);
    let mut sink = CollectingSink::default();

    let first = run_split(&source, &options(&output_root, false), &mut sink).unwrap();
    assert_eq!(
        first.audit_path,
        Some(output_root.join(format!("audit_log_{date}.csv")))
    );

    let second = run_split(&source, &options(&output_root, false), &mut sink).unwrap();
    assert_eq!(
        second.audit_path,
        Some(output_root.join(format!("audit_log_{date}_1.csv")))
    );
}

#[test]
fn simulated_and_live_runs_agree_on_decisions() {
    let dir = tempfile::tempdir().unwrap();
    let live_root = dir.path().join("live");
    let simulated_root = dir.path().join("simulated");

    let pages = ["Alpha", "Beta", "???"];

    let source = FakeSource::new(&pages);
    let mut live_sink = CollectingSink::default();
    let live = run_split(&source, &options(&live_root, false), &mut live_sink).unwrap();

    let mut simulated_sink = CollectingSink::default();
    let simulated = run_split(&source, &options(&simulated_root, true), &mut simulated_sink)
        .unwrap();

    assert_eq!(live.total, simulated.total);
    assert_eq!(live.failed, simulated.failed);

    let rows = audit_rows(live.audit_path.as_deref().unwrap());
    assert_eq!(rows[0][1], "OK");
    assert_eq!(rows[0][2], "Alpha.pdf");
    assert_eq!(rows[1][1], "OK");
    assert_eq!(rows[1][2], "Beta.pdf");
    assert_eq!(rows[2][1], "Failed");

    assert!(
        simulated_sink
            .lines
            .iter()
            .any(|line| line.contains("page 1: would save as") && line.contains("Alpha.pdf"))
    );
    assert!(
        simulated_sink
            .lines
            .iter()
            .any(|line| line.contains("page 2: would save as") && line.contains("Beta.pdf"))
    );
    assert!(!simulated_root.exists());
}

#[test]
fn artifact_save_failure_is_fatal_not_manual_review() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let source = FailingSource {
        inner: FakeSource::new(&["Smith", "Jones"]),
        fail_on: 2,
    };
    let mut sink = CollectingSink::default();
    let result = run_split(&source, &options(&output_root, false), &mut sink);

    assert!(result.is_err());
    assert!(output_root.join("Smith.pdf").is_file());
    assert!(!output_root.join(MANUAL_REVIEW_DIR).exists());
    assert!(
        !output_root
            .read_dir()
            .unwrap()
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_name().to_string_lossy().starts_with("audit_log_"))
    );
}

#[test]
fn flat_mode_ignores_folder_patterns_for_routing() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let source = FakeSource::new(&["Smith\nŠantić"]);
    let mut sink = CollectingSink::default();
    let summary = run_split(&source, &options(&output_root, false), &mut sink).unwrap();

    assert_eq!(summary.success, 1);
    assert!(output_root.join("Smith.pdf").is_file());
    assert!(!output_root.join("santic").exists());

    let rows = audit_rows(summary.audit_path.as_deref().unwrap());
    assert_eq!(rows[0][4], "santic");
}
