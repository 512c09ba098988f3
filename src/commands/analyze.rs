use crate::config::{self, TrendConfig};
use crate::core::SchemaVariant;
use crate::io::{self, writers::TerminalWriter, OutputFormat, OutputWriter};
use crate::report::{build_report, Report};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORT_STEM: &str = "reports/incident_trends_report";

pub struct AnalyzeConfig {
    pub csv_path: PathBuf,
    pub out: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    pub schema: Option<SchemaVariant>,
    pub top: Option<usize>,
}

/// Run the pipeline and write the report; nothing is written unless every stage succeeds.
pub fn handle_analyze(options: AnalyzeConfig) -> Result<Report> {
    let settings = config::load_config(options.config.as_deref())?;
    let format = resolve_format(options.format, &settings)?;

    let table = io::read_incident_csv(&options.csv_path)?;
    let report = build_report(&table, &settings, options.schema, options.top)?;

    match format.extension() {
        None => {
            TerminalWriter::stdout()
                .with_paths(&options.csv_path, None)
                .write_report(&report)?;
        }
        Some(extension) => {
            let out_path = options
                .out
                .clone()
                .unwrap_or_else(|| default_output_path(extension));
            let bytes = io::render_to_bytes(format, &report)?;
            io::write_report_file(&out_path, &bytes)
                .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
            log::info!("Wrote {:?} report to {}", format, out_path.display());

            TerminalWriter::stdout()
                .with_paths(&options.csv_path, Some(&out_path))
                .write_report(&report)?;
        }
    }

    Ok(report)
}

/// CLI flag wins over the configured default.
fn resolve_format(flag: Option<OutputFormat>, settings: &TrendConfig) -> Result<OutputFormat> {
    match flag {
        Some(format) => Ok(format),
        None => settings
            .output
            .default_format
            .parse()
            .map_err(|e: String| anyhow::anyhow!("Invalid output.default_format: {e}")),
    }
}

pub fn default_output_path(extension: &str) -> PathBuf {
    Path::new(DEFAULT_REPORT_STEM).with_extension(extension)
}
