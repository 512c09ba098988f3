//! Multi-sheet spreadsheet report.
//!
//! One worksheet per report table, header row bold and frozen. The extended
//! export adds a line chart of daily volume and a column chart of the top
//! categories, both drawing on their own sheet's cells.

use crate::core::Result;
use crate::io::output::OutputWriter;
use crate::io::tables::{report_tables, Cell, SheetTable, DAILY_TREND, TOP_ISSUES};
use crate::report::Report;
use rust_xlsxwriter::{Chart, ChartType, Format, FormatBorder, Workbook, Worksheet};
use std::io::Write;

/// Categories plotted on the top-issues chart
const CHART_CATEGORIES: u32 = 10;

pub struct XlsxWriter<W: Write> {
    writer: W,
}

impl<W: Write> XlsxWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for XlsxWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let bytes = render_workbook(report)?;
        self.writer.write_all(&bytes)?;
        Ok(())
    }
}

struct SheetFormats {
    header: Format,
    number: Format,
    integer: Format,
}

impl SheetFormats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(0x4472C4)
                .set_font_color(0xFFFFFF)
                .set_border(FormatBorder::Thin),
            number: Format::new().set_num_format("0.0"),
            integer: Format::new().set_num_format("0"),
        }
    }
}

/// Build the workbook and return its bytes.
pub fn render_workbook(report: &Report) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let formats = SheetFormats::new();

    for table in report_tables(report) {
        let sheet = workbook.add_worksheet();
        write_table(sheet, &table, &formats)?;

        if report.includes_charts() && !table.rows.is_empty() {
            match table.name {
                DAILY_TREND => insert_daily_chart(sheet, &table)?,
                TOP_ISSUES => insert_top_issues_chart(sheet, &table)?,
                _ => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_table(sheet: &mut Worksheet, table: &SheetTable, formats: &SheetFormats) -> Result<()> {
    sheet.set_name(table.name)?;

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &formats.header)?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(r, c, text)?;
                }
                Cell::Number(n) if n.fract() == 0.0 => {
                    sheet.write_number_with_format(r, c, *n, &formats.integer)?;
                }
                Cell::Number(n) => {
                    sheet.write_number_with_format(r, c, *n, &formats.number)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                Cell::Blank => {}
            }
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();
    Ok(())
}

fn insert_daily_chart(sheet: &mut Worksheet, table: &SheetTable) -> Result<()> {
    let last = table.rows.len() as u32;
    let mut chart = Chart::new(ChartType::Line);
    chart
        .add_series()
        .set_name("Incidents")
        .set_categories((table.name, 1, 0, last, 0))
        .set_values((table.name, 1, 1, last, 1));
    chart
        .add_series()
        .set_name("Unresolved")
        .set_categories((table.name, 1, 0, last, 0))
        .set_values((table.name, 1, 3, last, 3));
    chart.title().set_name("Daily incident volume");
    chart.x_axis().set_name("Date");
    chart.y_axis().set_name("Incidents");

    sheet.insert_chart(1, table.headers.len() as u16 + 1, &chart)?;
    Ok(())
}

fn insert_top_issues_chart(sheet: &mut Worksheet, table: &SheetTable) -> Result<()> {
    let last = (table.rows.len() as u32).min(CHART_CATEGORIES);
    let mut chart = Chart::new(ChartType::Column);
    chart
        .add_series()
        .set_name("Incidents")
        .set_categories((table.name, 1, 0, last, 0))
        .set_values((table.name, 1, 1, last, 1));
    chart.title().set_name("Top issue categories");
    chart.legend().set_hidden();

    sheet.insert_chart(1, table.headers.len() as u16 + 1, &chart)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrendConfig;
    use crate::core::{RawTable, SchemaVariant};
    use crate::report::build_report;

    fn report(schema: SchemaVariant) -> Report {
        let headers = [
            "incident_id",
            "opened_at",
            "resolved_at",
            "user_role",
            "device_type",
            "site",
            "network_path",
            "vendor",
            "issue_category",
            "priority",
            "resolution_minutes",
            "resolved",
        ];
        let rows = (0..12)
            .map(|i| {
                vec![
                    format!("INC{i:04}"),
                    format!("2025-03-{:02} 10:00", i % 4 + 1),
                    String::new(),
                    "Analyst".into(),
                    "Laptop".into(),
                    "NYC-HQ".into(),
                    "WiFi".into(),
                    "Cisco".into(),
                    ["Wi-Fi Drop", "Printer", "EDR Alert Investigation"][i % 3].into(),
                    "P3".into(),
                    (i * 100).to_string(),
                    "Yes".into(),
                ]
            })
            .collect();
        let table = RawTable::new(headers.iter().map(|s| s.to_string()).collect(), rows);
        build_report(&table, &TrendConfig::default(), Some(schema), None).unwrap()
    }

    #[test]
    fn test_workbook_is_a_zip_container() {
        for schema in [SchemaVariant::Minimal, SchemaVariant::Extended] {
            let bytes = render_workbook(&report(schema)).unwrap();
            assert!(bytes.len() > 1000);
            assert_eq!(&bytes[..2], b"PK");
        }
    }

    fn has_zip_entry(bytes: &[u8], name: &str) -> bool {
        bytes.windows(name.len()).any(|w| w == name.as_bytes())
    }

    #[test]
    fn test_charts_only_in_extended_workbook() {
        let extended = render_workbook(&report(SchemaVariant::Extended)).unwrap();
        assert!(has_zip_entry(&extended, "xl/charts/chart1.xml"));
        assert!(has_zip_entry(&extended, "xl/charts/chart2.xml"));

        let minimal = render_workbook(&report(SchemaVariant::Minimal)).unwrap();
        assert!(!has_zip_entry(&minimal, "xl/charts/"));
    }

    #[test]
    fn test_writer_streams_rendered_bytes() {
        let report = report(SchemaVariant::Extended);
        let mut buffer = Vec::new();
        XlsxWriter::new(&mut buffer).write_report(&report).unwrap();
        assert_eq!(&buffer[..2], b"PK");
    }
}
