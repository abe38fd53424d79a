use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuditStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "OK (simulated)")]
    OkSimulated,
    #[serde(rename = "Failed")]
    Failed,
    #[serde(rename = "Failed (simulated)")]
    FailedSimulated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    #[serde(rename = "Page")]
    pub page: usize,
    #[serde(rename = "Status")]
    pub status: AuditStatus,
    #[serde(rename = "Filename")]
    pub file_name: String,
    #[serde(rename = "FolderRaw")]
    pub folder_raw: String,
    #[serde(rename = "FolderName")]
    pub folder_name: String,
    #[serde(rename = "Note")]
    pub note: String,
}

pub fn write_audit_csv(path: &Path, records: &[AuditRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create audit log: {}", path.display()))?;

    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("failed to write audit row for page {}", record.page))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to finalize audit log: {}", path.display()))?;

    Ok(())
}
