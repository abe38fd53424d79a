use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::MergeArgs;
use crate::paths::{merged_file_name, unique_path};
use crate::pdf::merge_documents;
use crate::util::{ensure_directory, reveal_in_file_browser, today_local};

pub fn run(args: MergeArgs) -> Result<()> {
    for file in &args.files {
        if !file.is_file() {
            bail!("input PDF not found: {}", file.display());
        }
    }

    let out_dir = args.out_dir.clone().unwrap_or_else(|| {
        args.files[0]
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    info!(files = args.files.len(), output = %out_dir.display(), "starting merge");

    ensure_directory(&out_dir)?;

    let file_name = output_file_name(args.name.as_deref());
    let final_path = unique_path(&out_dir.join(file_name));

    for file in &args.files {
        info!(file = %file.display(), "merging");
    }

    merge_documents(&args.files, &final_path)?;
    info!(path = %final_path.display(), "merged PDF saved");

    if args.open {
        if let Err(error) = reveal_in_file_browser(&out_dir) {
            warn!(error = %error, "failed to open output folder");
        }
    }

    Ok(())
}

fn output_file_name(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => {
            if name.to_lowercase().ends_with(".pdf") {
                name.to_string()
            } else {
                format!("{name}.pdf")
            }
        }
        _ => merged_file_name(today_local()),
    }
}
