use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::SplitArgs;
use crate::config;
use crate::pdf::PdfFile;
use crate::util::reveal_in_file_browser;

use super::engine::{ProgressSink, SplitOptions, run_split};

struct TracingSink;

impl ProgressSink for TracingSink {
    fn line(&mut self, message: &str) {
        info!("{message}");
    }
}

pub fn run(args: SplitArgs) -> Result<()> {
    if !args.input.is_file() {
        bail!("input PDF not found: {}", args.input.display());
    }

    let (file_pattern, folder_pattern) = resolve_patterns(&args)?;
    let output_root = args
        .out_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));

    info!(
        input = %args.input.display(),
        output = %output_root.display(),
        file_pattern = %file_pattern,
        folder_pattern = %folder_pattern,
        simulate = args.safe,
        "starting split"
    );

    let source = PdfFile::open(&args.input)?;
    let options = SplitOptions {
        output_root: output_root.clone(),
        file_pattern,
        folder_pattern,
        route_to_folders: !args.flat,
        simulate: args.safe,
    };

    let mut sink = TracingSink;
    let summary = run_split(&source, &options, &mut sink)?;

    if args.open && !args.safe {
        if let Err(error) = reveal_in_file_browser(&output_root) {
            warn!(error = %error, "failed to open output folder");
        }
    }

    info!(
        pages = summary.total,
        success = summary.success,
        manual_review = summary.failed,
        audit_log = %summary
            .audit_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        "split completed"
    );

    Ok(())
}

// Explicit --file-pattern/--folder-pattern flags win over a schema preset.
fn resolve_patterns(args: &SplitArgs) -> Result<(String, String)> {
    let preset = match &args.schema {
        Some(name) => Some(config::load_schema(&args.config_root, name)?),
        None => None,
    };

    let file_pattern = args
        .file_pattern
        .clone()
        .or_else(|| preset.as_ref().map(|preset| preset.file_pattern.clone()));
    let Some(file_pattern) = file_pattern else {
        bail!("no file pattern given; pass --file-pattern or --schema");
    };

    let folder_pattern = args
        .folder_pattern
        .clone()
        .or_else(|| preset.as_ref().map(|preset| preset.folder_pattern.clone()))
        .unwrap_or_default();

    Ok((file_pattern, folder_pattern))
}

fn default_output_dir(input: &std::path::Path) -> PathBuf {
    input
        .parent()
        .map(|parent| parent.join("output_pdfs"))
        .unwrap_or_else(|| PathBuf::from("output_pdfs"))
}
