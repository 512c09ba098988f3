//! Report tables flattened into named grids of cells, in sheet order.
//!
//! Both the spreadsheet and markdown writers render from this layout.

use chrono::NaiveDateTime;

use crate::core::{columns, IncidentRecord};
use crate::report::Report;

pub const SUMMARY: &str = "Summary";
pub const TOP_ISSUES: &str = "Top_Issues";
pub const TIME_BY_ISSUE: &str = "Time_By_Issue";
pub const DAILY_TREND: &str = "Daily_Trend";
pub const EXECUTIVE_IMPACT: &str = "Executive_Impact";
pub const CATEGORY_PRIORITY: &str = "Category_Priority";
pub const SLA_RISK: &str = "SLA_Risk";
pub const RECOMMENDATIONS: &str = "Recommendations";
pub const RAW_DATA: &str = "Raw_Data";

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Blank,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn count(value: usize) -> Self {
        Cell::Number(value as f64)
    }

    fn opt_number(value: Option<u32>) -> Self {
        value.map(|v| Cell::Number(f64::from(v))).unwrap_or(Cell::Blank)
    }

    fn opt_text(value: Option<&str>) -> Self {
        value.map(Cell::text).unwrap_or(Cell::Blank)
    }

    fn timestamp(value: Option<NaiveDateTime>) -> Self {
        value
            .map(|ts| Cell::Text(ts.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(Cell::Blank)
    }

    /// Plain-text rendering used by text formats.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
            Cell::Number(n) => format!("{n:.1}"),
            Cell::Bool(b) => b.to_string(),
            Cell::Blank => String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SheetTable {
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    fn new(name: &'static str, headers: &[&str]) -> Self {
        Self {
            name,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

pub fn report_tables(report: &Report) -> Vec<SheetTable> {
    vec![
        summary_table(report),
        top_issues_table(report),
        time_by_issue_table(report),
        daily_trend_table(report),
        executive_table(report),
        category_priority_table(report),
        sla_table(report),
        recommendations_table(report),
        raw_data_table(report),
    ]
}

fn summary_table(report: &Report) -> SheetTable {
    let mut table = SheetTable::new(SUMMARY, &["metric", "value"]);
    table.rows = report
        .summary
        .rows()
        .into_iter()
        .map(|(metric, value)| vec![Cell::text(metric), Cell::Text(value)])
        .collect();
    table
}

fn top_issues_table(report: &Report) -> SheetTable {
    let mut table = SheetTable::new(TOP_ISSUES, &["issue_category", "count", "percent"]);
    table.rows = report
        .top_issues
        .iter()
        .map(|row| {
            vec![
                Cell::text(&row.category),
                Cell::count(row.count),
                Cell::Number(row.percent),
            ]
        })
        .collect();
    table
}

fn time_by_issue_table(report: &Report) -> SheetTable {
    let mut table = SheetTable::new(
        TIME_BY_ISSUE,
        &["issue_category", "n_with_time", "avg_minutes", "median", "max"],
    );
    table.rows = report
        .time_by_issue
        .iter()
        .map(|row| {
            vec![
                Cell::text(&row.category),
                Cell::count(row.count),
                Cell::Number(row.mean_minutes),
                Cell::Number(row.median_minutes),
                Cell::Number(f64::from(row.max_minutes)),
            ]
        })
        .collect();
    table
}

fn daily_trend_table(report: &Report) -> SheetTable {
    let mut table = SheetTable::new(DAILY_TREND, &["date", "total", "resolved", "unresolved"]);
    table.rows = report
        .daily_trend
        .iter()
        .map(|row| {
            vec![
                Cell::Text(row.date.to_string()),
                Cell::count(row.total),
                Cell::count(row.resolved),
                Cell::count(row.unresolved),
            ]
        })
        .collect();
    table
}

fn executive_table(report: &Report) -> SheetTable {
    let mut table = SheetTable::new(EXECUTIVE_IMPACT, &["user_group", "issue_category", "count"]);
    table.rows = report
        .executive_impact
        .iter()
        .map(|row| {
            vec![
                Cell::text(row.user_group.label()),
                Cell::text(&row.category),
                Cell::count(row.count),
            ]
        })
        .collect();
    table
}

fn category_priority_table(report: &Report) -> SheetTable {
    let pivot = &report.category_priority;
    let mut table = SheetTable {
        name: CATEGORY_PRIORITY,
        headers: std::iter::once("issue_category".to_string())
            .chain(pivot.priorities.iter().cloned())
            .chain(std::iter::once("total".to_string()))
            .collect(),
        rows: Vec::new(),
    };
    table.rows = pivot
        .rows
        .iter()
        .map(|row| {
            std::iter::once(Cell::text(&row.category))
                .chain(row.counts.iter().map(|&c| Cell::count(c)))
                .chain(std::iter::once(Cell::count(row.total())))
                .collect()
        })
        .collect();
    table
}

fn sla_table(report: &Report) -> SheetTable {
    let mut table = SheetTable::new(
        SLA_RISK,
        &[
            "priority",
            "sla_minutes",
            "total_with_sla",
            "breaches",
            "breach_rate_percent",
        ],
    );
    table.rows = report
        .sla_risk
        .iter()
        .map(|row| {
            vec![
                Cell::text(&row.priority),
                Cell::Number(f64::from(row.threshold_minutes)),
                Cell::count(row.eligible),
                Cell::count(row.breaches),
                Cell::Number(row.breach_rate_percent),
            ]
        })
        .collect();
    table
}

fn recommendations_table(report: &Report) -> SheetTable {
    let mut table = SheetTable::new(RECOMMENDATIONS, &["issue_category", "recommendation"]);
    table.rows = report
        .recommendations
        .iter()
        .map(|rec| vec![Cell::text(&rec.category), Cell::text(&rec.text)])
        .collect();
    table
}

fn raw_data_table(report: &Report) -> SheetTable {
    let present = |col: &str| report.optional_columns.iter().any(|c| c == col);
    let resolved_at = present(columns::RESOLVED_AT);
    let locations: Vec<&str> = [columns::SITE, columns::NETWORK_PATH, columns::VENDOR]
        .into_iter()
        .filter(|col| present(*col))
        .collect();

    let mut headers: Vec<&str> = vec![columns::INCIDENT_ID, columns::OPENED_AT];
    if resolved_at {
        headers.push(columns::RESOLVED_AT);
    }
    headers.extend([columns::USER_ROLE, columns::DEVICE_TYPE]);
    headers.extend(locations.iter().copied());
    headers.extend([
        columns::ISSUE_CATEGORY,
        columns::PRIORITY,
        columns::RESOLUTION_MINUTES,
        columns::RESOLVED,
        "is_executive",
        "sla_minutes",
        "sla_breached",
    ]);

    let mut table = SheetTable::new(RAW_DATA, &headers);
    table.headers.extend(report.extra_columns.iter().cloned());
    table.rows = report
        .records
        .iter()
        .map(|record| raw_row(record, resolved_at, &locations))
        .collect();
    table
}

fn raw_row(record: &IncidentRecord, resolved_at: bool, locations: &[&str]) -> Vec<Cell> {
    let mut row = vec![Cell::text(&record.id), Cell::timestamp(record.opened_at)];
    if resolved_at {
        row.push(Cell::timestamp(record.resolved_at));
    }
    row.extend([Cell::text(&record.role), Cell::text(&record.device_type)]);
    row.extend(
        locations
            .iter()
            .map(|&col| Cell::opt_text(location_field(record, col))),
    );
    row.extend([
        Cell::text(&record.issue_category),
        Cell::text(&record.priority),
        Cell::opt_number(record.resolution_minutes),
        match record.resolved.as_bool() {
            Some(flag) => Cell::Bool(flag),
            None => Cell::Blank,
        },
        Cell::Bool(record.is_executive),
        Cell::opt_number(record.sla_minutes),
        Cell::Bool(record.sla_breached),
    ]);
    row.extend(record.extra.iter().map(Cell::text));
    row
}

fn location_field<'a>(record: &'a IncidentRecord, col: &str) -> Option<&'a str> {
    match col {
        columns::SITE => record.site.as_deref(),
        columns::NETWORK_PATH => record.network_path.as_deref(),
        columns::VENDOR => record.vendor.as_deref(),
        _ => None,
    }
}
