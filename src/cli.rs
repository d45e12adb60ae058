use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "botiquin", version, about = "Checklist de inspección de botiquines")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Collection endpoint URL override")]
    pub endpoint: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List zones with their titles and sections
    Zones,
    /// List the fixed question template
    Questions,
    /// Completeness report for an answers file
    Check {
        #[arg(long)]
        zone: String,
        #[arg(long, help = "JSON answers file")]
        answers: PathBuf,
        #[arg(
            long,
            default_value_t = false,
            help = "Compatibility completeness: compare answered count only"
        )]
        count_based: bool,
    },
    /// Build the inspection report and upload it (or write it with --out)
    Inspect {
        #[arg(long)]
        inspector: String,
        #[arg(long, help = "Inspection date, AAAA-MM-DD")]
        date: String,
        #[arg(long)]
        zone: String,
        #[arg(long, help = "JSON answers file")]
        answers: PathBuf,
        #[arg(long, help = "Write the workbook locally instead of uploading")]
        out: Option<PathBuf>,
        #[arg(
            long,
            default_value_t = false,
            help = "Compatibility completeness: compare answered count only"
        )]
        count_based: bool,
    },
    /// Interactive two-screen inspection flow
    Wizard,
}
