use crate::core::SchemaVariant;
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "incident-trends")]
#[command(about = "Endpoint incident trend analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an incident CSV export and write a trend report
    Analyze {
        /// Incident export with a header row
        csv_path: PathBuf,

        /// Report path (defaults to reports/incident_trends_report.<ext>)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Report format (defaults to output.default_format from config, else xlsx)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Configuration file (defaults to ./.incident-trends.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Column schema to apply
        #[arg(long, value_enum)]
        schema: Option<SchemaVariant>,

        /// Number of top categories that receive recommendations
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        top: Option<usize>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
