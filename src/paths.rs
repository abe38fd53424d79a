use std::path::{Path, PathBuf};

use chrono::NaiveDate;

pub fn unique_path(desired: &Path) -> PathBuf {
    if !desired.exists() {
        return desired.to_path_buf();
    }

    let parent = desired.parent().map(Path::to_path_buf).unwrap_or_default();
    let (stem, extension) = split_stem_extension(desired);

    let mut counter: u64 = 1;
    loop {
        let candidate = parent.join(format!("{stem}_{counter}{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

pub fn unique_name_in_dir(directory: &Path, file_name: &str) -> String {
    if !directory.join(file_name).exists() {
        return file_name.to_string();
    }

    let (stem, extension) = split_stem_extension(Path::new(file_name));

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{stem}_{counter}{extension}");
        if !directory.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

pub fn audit_log_path(output_root: &Path, date: NaiveDate) -> PathBuf {
    unique_path(&output_root.join(format!("audit_log_{}.csv", date.format("%Y-%m-%d"))))
}

pub fn merged_file_name(date: NaiveDate) -> String {
    format!("merged_{}.pdf", date.format("%Y-%m-%d"))
}

fn split_stem_extension(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or_default()
        .to_string();
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    (stem, extension)
}
