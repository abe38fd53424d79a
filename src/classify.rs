use std::path::Path;

use crate::model::{DecisionStatus, NamingDecision};
use crate::{naming, pattern};

pub const UNKNOWN_FOLDER: &str = "unknown";

#[derive(Debug)]
pub struct Classifier<'a> {
    file_pattern: &'a str,
    folder_pattern: &'a str,
    output_root: &'a Path,
    route_to_folders: bool,
}

impl<'a> Classifier<'a> {
    pub fn new(
        file_pattern: &'a str,
        folder_pattern: &'a str,
        output_root: &'a Path,
        route_to_folders: bool,
    ) -> Self {
        Self {
            file_pattern,
            folder_pattern,
            output_root,
            route_to_folders,
        }
    }

    pub fn classify(&self, lines: &[String]) -> NamingDecision {
        let file_name = naming::file_name_from_pattern(lines, self.file_pattern);
        let folder_raw = pattern::resolve(lines, self.folder_pattern);
        let folder_name = if folder_raw.is_empty() {
            String::new()
        } else {
            naming::normalize_folder_name(&folder_raw)
        };

        if file_name.is_empty() || file_name.eq_ignore_ascii_case(".pdf") {
            return NamingDecision {
                status: DecisionStatus::Unresolvable,
                file_name: String::new(),
                folder_raw,
                folder_name,
                target_directory: self.output_root.to_path_buf(),
            };
        }

        let target_directory = if self.route_to_folders {
            if folder_name.is_empty() {
                self.output_root.join(UNKNOWN_FOLDER)
            } else {
                self.output_root.join(&folder_name)
            }
        } else {
            self.output_root.to_path_buf()
        };

        NamingDecision {
            status: DecisionStatus::Resolved,
            file_name,
            folder_raw,
            folder_name,
            target_directory,
        }
    }
}
