use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter, XlsxWriter};
use crate::report::Report;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Multi-sheet spreadsheet
    Xlsx,
    Json,
    Markdown,
    /// Console summary only; nothing is written to disk
    Terminal,
}

impl OutputFormat {
    /// File extension of the default output path, if the format writes a file
    pub fn extension(self) -> Option<&'static str> {
        match self {
            OutputFormat::Xlsx => Some("xlsx"),
            OutputFormat::Json => Some("json"),
            OutputFormat::Markdown => Some("md"),
            OutputFormat::Terminal => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "terminal" => Ok(OutputFormat::Terminal),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Xlsx => Box::new(XlsxWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// Render the whole report in memory so a failure leaves nothing on disk.
pub fn render_to_bytes(format: OutputFormat, report: &Report) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    create_writer(format, &mut buffer).write_report(report)?;
    Ok(buffer)
}
