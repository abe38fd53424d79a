use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionStatus {
    Resolved,
    Unresolvable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingDecision {
    pub status: DecisionStatus,
    pub file_name: String,
    pub folder_raw: String,
    pub folder_name: String,
    pub target_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub audit_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaPreset {
    pub schema_name: String,
    pub file_pattern: String,
    pub folder_pattern: String,
}
