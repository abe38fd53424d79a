use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::model::SchemaPreset;
use crate::util::write_json_pretty;

// One JSON file per preset under <config-root>/schemas.

fn schema_dir(config_root: &Path) -> PathBuf {
    config_root.join("schemas")
}

fn schema_path(config_root: &Path, name: &str) -> PathBuf {
    schema_dir(config_root).join(format!("{name}.json"))
}

pub fn list_schemas(config_root: &Path) -> Result<Vec<String>> {
    let dir = schema_dir(config_root);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let entries =
        fs::read_dir(&dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if !is_json {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(stem.to_string());
        }
    }

    names.sort();
    Ok(names)
}

pub fn load_schema(config_root: &Path, name: &str) -> Result<SchemaPreset> {
    let path = schema_path(config_root, name);
    if !path.exists() {
        bail!("schema '{}' not found at {}", name, path.display());
    }

    let raw = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let preset: SchemaPreset = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(preset)
}

pub fn save_schema(config_root: &Path, preset: &SchemaPreset) -> Result<PathBuf> {
    if preset.schema_name.is_empty() {
        bail!("schema name must not be empty");
    }

    let path = schema_path(config_root, &preset.schema_name);
    write_json_pretty(&path, preset)?;
    Ok(path)
}

pub fn delete_schema(config_root: &Path, name: &str) -> Result<()> {
    let path = schema_path(config_root, name);
    if !path.exists() {
        bail!("schema '{}' not found at {}", name, path.display());
    }

    fs::remove_file(&path).with_context(|| format!("failed to remove {}", path.display()))
}
