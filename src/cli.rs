use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "paysplit",
    version,
    about = "Pattern-driven payroll PDF splitting and naming tools"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Split(SplitArgs),
    Extract(ExtractArgs),
    Merge(MergeArgs),
    Schema(SchemaArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    pub input: PathBuf,

    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    #[arg(long)]
    pub file_pattern: Option<String>,

    #[arg(long)]
    pub folder_pattern: Option<String>,

    #[arg(long)]
    pub schema: Option<String>,

    #[arg(long, default_value = ".paysplit")]
    pub config_root: PathBuf,

    #[arg(long, default_value_t = false)]
    pub flat: bool,

    #[arg(long, default_value_t = false)]
    pub safe: bool,

    #[arg(long, default_value_t = false)]
    pub open: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    pub input: PathBuf,

    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    #[arg(long)]
    pub page: Option<usize>,

    #[arg(long)]
    pub from: Option<usize>,

    #[arg(long)]
    pub to: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub per_page: bool,

    #[arg(long, default_value_t = false)]
    pub open: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, default_value_t = false)]
    pub open: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    #[arg(long, default_value = ".paysplit")]
    pub config_root: PathBuf,

    #[command(subcommand)]
    pub command: SchemaCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SchemaCommand {
    List,
    Show {
        name: String,
    },
    Save {
        name: String,

        #[arg(long)]
        file_pattern: String,

        #[arg(long, default_value = "")]
        folder_pattern: String,
    },
    Remove {
        name: String,
    },
}
