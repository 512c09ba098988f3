use crate::io::output::OutputWriter;
use crate::report::Report;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Rows of the frequency table shown on the console
const CONSOLE_TOP_ISSUES: usize = 5;

/// Console summary of a run.
pub struct TerminalWriter<W: Write> {
    writer: W,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl TerminalWriter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            input: None,
            output: None,
        }
    }

    /// Echo the input and report paths under the banner
    pub fn with_paths(mut self, input: &Path, output: Option<&Path>) -> Self {
        self.input = Some(input.to_path_buf());
        self.output = output.map(Path::to_path_buf);
        self
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.print_header()?;
        self.print_summary(report)?;
        self.print_top_issues(report)?;
        self.print_sla_risk(report)?;
        self.print_recommendations(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Endpoint Incident Trend Analyzer".bold().blue())?;
        if let Some(input) = &self.input {
            writeln!(self.writer, "Input:  {}", input.display())?;
        }
        if let Some(output) = &self.output {
            writeln!(self.writer, "Output: {}", output.display())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "{}", "Summary:".bold())?;
        writeln!(self.writer, "  Total incidents: {}", summary.total)?;
        writeln!(self.writer, "  Resolved: {}", summary.resolved)?;

        let unresolved = if summary.unresolved == 0 {
            summary.unresolved.to_string().green()
        } else {
            summary.unresolved.to_string().yellow()
        };
        writeln!(self.writer, "  Unresolved: {unresolved}")?;
        if summary.unknown_status > 0 {
            writeln!(
                self.writer,
                "  Unknown resolution status: {}",
                summary.unknown_status
            )?;
        }
        if let Some(mttr) = summary.mean_resolution_minutes {
            writeln!(self.writer, "  MTTR: {mttr:.1} min")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_top_issues(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Top Issues:".bold())?;
        if report.top_issues.is_empty() {
            writeln!(self.writer, "  (no incidents)")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["issue_category", "count", "percent"]);
        for row in report.top_issues.iter().take(CONSOLE_TOP_ISSUES) {
            table.add_row(vec![
                row.category.clone(),
                row.count.to_string(),
                format!("{:.1}", row.percent),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_sla_risk(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.sla_risk.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "{}", "SLA Risk:".bold())?;
        for row in &report.sla_risk {
            let rate = format!("{:.1}%", row.breach_rate_percent);
            let rate = match row.breach_rate_percent {
                r if r >= 50.0 => rate.red(),
                r if r > 0.0 => rate.yellow(),
                _ => rate.green(),
            };
            writeln!(
                self.writer,
                "  {}: {}/{} breached ({})",
                row.priority, row.breaches, row.eligible, rate
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_recommendations(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Recommendations:".bold())?;
        for rec in &report.recommendations {
            writeln!(self.writer, "- {}", rec.text)?;
        }
        Ok(())
    }
}
