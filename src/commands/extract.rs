use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::paths::unique_path;
use crate::pdf::{PageSource, PdfFile};
use crate::util::{ensure_directory, reveal_in_file_browser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Single(usize),
    Range { from: usize, to: usize },
}

pub fn run(args: ExtractArgs) -> Result<()> {
    if !args.input.is_file() {
        bail!("input PDF not found: {}", args.input.display());
    }

    let out_dir = args.out_dir.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    info!(input = %args.input.display(), output = %out_dir.display(), "starting extract");

    let source = PdfFile::open(&args.input)?;
    let total = source.page_count();
    if total == 0 {
        warn!("input PDF has no pages");
        return Ok(());
    }

    let selection = validate_selection(total, args.page, args.from, args.to)?;
    ensure_directory(&out_dir)?;

    let stem = args
        .input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("pages");

    match selection {
        Selection::Single(page) => {
            let final_path = unique_path(&out_dir.join(format!("{stem}_page_{page}.pdf")));
            source.write_page(page, &final_path)?;
            info!(page, path = %final_path.display(), "extracted single page");
        }
        Selection::Range { from, to } if args.per_page => {
            for page in from..=to {
                let final_path = unique_path(&out_dir.join(format!("{stem}_page_{page}.pdf")));
                source.write_page(page, &final_path)?;
                info!(page, path = %final_path.display(), "extracted page");
            }
        }
        Selection::Range { from, to } => {
            let final_path = unique_path(&out_dir.join(format!("{stem}_pages_{from}-{to}.pdf")));
            source.write_range(from, to, &final_path)?;
            info!(from, to, path = %final_path.display(), "extracted page range");
        }
    }

    if args.open {
        if let Err(error) = reveal_in_file_browser(&out_dir) {
            warn!(error = %error, "failed to open output folder");
        }
    }

    Ok(())
}

fn validate_selection(
    total: usize,
    page: Option<usize>,
    from: Option<usize>,
    to: Option<usize>,
) -> Result<Selection> {
    match (page, from, to) {
        (Some(page), None, None) => {
            if page < 1 || page > total {
                bail!("page {} out of range (document has {} pages)", page, total);
            }
            Ok(Selection::Single(page))
        }
        (None, Some(from), Some(to)) => {
            if from < 1 || to > total || from > to {
                bail!(
                    "invalid page range {}-{} (document has {} pages)",
                    from,
                    to,
                    total
                );
            }
            Ok(Selection::Range { from, to })
        }
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            bail!("--page cannot be combined with --from/--to")
        }
        _ => bail!("specify --page or both --from and --to"),
    }
}
