pub mod csv_input;
pub mod output;
pub mod tables;
pub mod writers;

pub use csv_input::{read_incident_csv, read_incident_csv_from};
pub use output::{create_writer, render_to_bytes, OutputFormat, OutputWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Create the parent directory if needed, then write the whole file in one call.
pub fn write_report_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    write_file(path, content)
}
