use crate::io::output::OutputWriter;
use crate::io::tables::{report_tables, SheetTable};
use crate::report::Report;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_header(report)?;
        for table in report_tables(report) {
            self.write_table(&table)?;
        }
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "# Endpoint Incident Trend Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Schema: {}", report.variant)?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_table(&mut self, table: &SheetTable) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", table.name.replace('_', " "))?;
        writeln!(self.writer)?;

        if table.rows.is_empty() {
            writeln!(self.writer, "_No data._")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "| {} |", table.headers.join(" | "))?;
        let rule: Vec<&str> = table.headers.iter().map(|_| "---").collect();
        writeln!(self.writer, "| {} |", rule.join(" | "))?;
        for row in &table.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| escape_cell(&cell.display()))
                .collect();
            writeln!(self.writer, "| {} |", cells.join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
