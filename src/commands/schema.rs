use anyhow::Result;
use tracing::info;

use crate::cli::{SchemaArgs, SchemaCommand};
use crate::config;
use crate::model::SchemaPreset;

pub fn run(args: SchemaArgs) -> Result<()> {
    match args.command {
        SchemaCommand::List => {
            let names = config::list_schemas(&args.config_root)?;
            if names.is_empty() {
                info!("no schema presets saved");
            }
            for name in names {
                info!(schema = %name, "schema preset");
            }
            Ok(())
        }
        SchemaCommand::Show { name } => {
            let preset = config::load_schema(&args.config_root, &name)?;
            info!(
                schema = %preset.schema_name,
                file_pattern = %preset.file_pattern,
                folder_pattern = %preset.folder_pattern,
                "schema preset"
            );
            Ok(())
        }
        SchemaCommand::Save {
            name,
            file_pattern,
            folder_pattern,
        } => {
            let preset = SchemaPreset {
                schema_name: name,
                file_pattern,
                folder_pattern,
            };
            let path = config::save_schema(&args.config_root, &preset)?;
            info!(schema = %preset.schema_name, path = %path.display(), "schema preset saved");
            Ok(())
        }
        SchemaCommand::Remove { name } => {
            config::delete_schema(&args.config_root, &name)?;
            info!(schema = %name, "schema preset removed");
            Ok(())
        }
    }
}
