use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::audit::{self, AuditRecord, AuditStatus};
use crate::classify::Classifier;
use crate::model::{DecisionStatus, RunSummary};
use crate::paths;
use crate::pdf::PageSource;
use crate::util::{ensure_directory, today_local};

pub const MANUAL_REVIEW_DIR: &str = "!manual_review";

pub trait ProgressSink {
    fn line(&mut self, message: &str);
}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub output_root: PathBuf,
    pub file_pattern: String,
    pub folder_pattern: String,
    pub route_to_folders: bool,
    pub simulate: bool,
}

pub fn run_split(
    source: &dyn PageSource,
    options: &SplitOptions,
    sink: &mut dyn ProgressSink,
) -> Result<RunSummary> {
    let total = source.page_count();
    if total == 0 {
        sink.line("input PDF has no pages");
        return Ok(RunSummary {
            total: 0,
            success: 0,
            failed: 0,
            audit_path: None,
        });
    }

    if !options.simulate {
        ensure_directory(&options.output_root)?;
    }

    let classifier = Classifier::new(
        &options.file_pattern,
        &options.folder_pattern,
        &options.output_root,
        options.route_to_folders,
    );

    let mut records: Vec<AuditRecord> = Vec::with_capacity(total);
    let mut success = 0;
    let mut failed = 0;
    let mut review_dir: Option<PathBuf> = None;

    for page_number in 1..=total {
        let text = source.page_text(page_number)?;
        let lines: Vec<String> = text.lines().map(str::to_string).collect();

        if options.simulate && page_number == 1 {
            dump_page_lines(sink, page_number, &lines);
        }

        let decision = classifier.classify(&lines);

        match decision.status {
            DecisionStatus::Unresolvable => {
                failed += 1;
                sink.line(&format!(
                    "page {page_number}: no valid filename, manual review needed"
                ));

                if options.simulate {
                    records.push(AuditRecord {
                        page: page_number,
                        status: AuditStatus::FailedSimulated,
                        file_name: String::new(),
                        folder_raw: decision.folder_raw,
                        folder_name: decision.folder_name,
                        note: format!("Would be sent to {MANUAL_REVIEW_DIR}"),
                    });
                    continue;
                }

                let review_dir = ensure_review_dir(&options.output_root, &mut review_dir)?;
                let review_name = format!("Unmatched_Page_{page_number}.pdf");
                source.write_page(page_number, &review_dir.join(&review_name))?;
                sink.line(&format!("page {page_number}: sent to {review_name}"));

                records.push(AuditRecord {
                    page: page_number,
                    status: AuditStatus::Failed,
                    file_name: String::new(),
                    folder_raw: decision.folder_raw,
                    folder_name: decision.folder_name,
                    note: format!("Sent to {review_name}"),
                });
            }
            DecisionStatus::Resolved => {
                if options.simulate {
                    let would_be = decision.target_directory.join(&decision.file_name);
                    sink.line(&format!(
                        "page {page_number}: would save as {}",
                        would_be.display()
                    ));
                    records.push(AuditRecord {
                        page: page_number,
                        status: AuditStatus::OkSimulated,
                        file_name: decision.file_name,
                        folder_raw: decision.folder_raw,
                        folder_name: decision.folder_name,
                        note: "Would be saved".to_string(),
                    });
                    continue;
                }

                ensure_directory(&decision.target_directory)?;
                let final_name =
                    paths::unique_name_in_dir(&decision.target_directory, &decision.file_name);
                let out_path = decision.target_directory.join(&final_name);

                source.write_page(page_number, &out_path)?;

                success += 1;
                sink.line(&format!("page {page_number}: saved as {}", out_path.display()));
                records.push(AuditRecord {
                    page: page_number,
                    status: AuditStatus::Ok,
                    file_name: final_name,
                    folder_raw: decision.folder_raw,
                    folder_name: decision.folder_name,
                    note: String::new(),
                });
            }
        }
    }

    let mut audit_path = None;
    if options.simulate {
        sink.line("simulated run: no audit CSV written");
    } else {
        let destination = paths::audit_log_path(&options.output_root, today_local());
        match audit::write_audit_csv(&destination, &records) {
            Ok(()) => {
                sink.line(&format!("audit log saved: {}", destination.display()));
                audit_path = Some(destination);
            }
            Err(error) => {
                warn!(error = %error, "failed to write audit log");
                sink.line(&format!("failed to write audit log: {error:#}"));
            }
        }
    }

    sink.line(&format!(
        "split finished: pages={total}, success={success}, manual review={failed}"
    ));

    Ok(RunSummary {
        total,
        success,
        failed,
        audit_path,
    })
}

fn ensure_review_dir<'a>(
    output_root: &Path,
    review_dir: &'a mut Option<PathBuf>,
) -> Result<&'a PathBuf> {
    match review_dir {
        Some(dir) => Ok(dir),
        None => {
            let dir = output_root.join(MANUAL_REVIEW_DIR);
            ensure_directory(&dir)?;
            Ok(review_dir.insert(dir))
        }
    }
}

fn dump_page_lines(sink: &mut dyn ProgressSink, page_number: usize, lines: &[String]) {
    sink.line(&format!("--- page {page_number} lines ---"));
    for (index, line) in lines.iter().enumerate() {
        sink.line(&format!("LINE {index}: {line}"));
    }
    sink.line("--- end of page lines ---");
}
