//! Raw rows to canonical incident records.
//!
//! The header is checked against the required columns of the schema variant
//! before any row is touched. Per-cell problems never fail the run: the cell
//! becomes absent/unknown and is tallied in [`CoercionStats`].

pub mod coerce;

pub use coerce::{is_breach, is_executive_role, parse_minutes, parse_resolved, parse_timestamp};

use serde::Serialize;

use crate::config::SlaThresholds;
use crate::core::{columns, Error, IncidentRecord, RawTable, ResolvedState, Result, SchemaVariant};

/// Canonical record set produced from one input batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedBatch {
    pub variant: SchemaVariant,
    pub records: Vec<IncidentRecord>,
    /// Input columns the pipeline does not consume, in header order
    pub extra_columns: Vec<String>,
    /// Extended-only columns present in the header, whatever the resolved variant
    pub optional_columns: Vec<String>,
    pub coercion: CoercionStats,
}

/// Count of non-blank cells that could not be read and were replaced by absent values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CoercionStats {
    pub opened_at: usize,
    pub resolved_at: usize,
    pub resolution_minutes: usize,
    pub resolved: usize,
}

impl CoercionStats {
    pub fn total(&self) -> usize {
        self.opened_at + self.resolved_at + self.resolution_minutes + self.resolved
    }
}

/// Header positions resolved once per batch.
struct ColumnIndex {
    id: usize,
    opened_at: usize,
    role: usize,
    device_type: usize,
    issue_category: usize,
    priority: usize,
    resolution_minutes: usize,
    resolved: usize,
    resolved_at: Option<usize>,
    site: Option<usize>,
    network_path: Option<usize>,
    vendor: Option<usize>,
    extras: Vec<usize>,
}

impl ColumnIndex {
    fn build(table: &RawTable) -> Result<Self> {
        let required = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| Error::schema([name]))
        };

        Ok(Self {
            id: required(columns::INCIDENT_ID)?,
            opened_at: required(columns::OPENED_AT)?,
            role: required(columns::USER_ROLE)?,
            device_type: required(columns::DEVICE_TYPE)?,
            issue_category: required(columns::ISSUE_CATEGORY)?,
            priority: required(columns::PRIORITY)?,
            resolution_minutes: required(columns::RESOLUTION_MINUTES)?,
            resolved: required(columns::RESOLVED)?,
            resolved_at: table.column_index(columns::RESOLVED_AT),
            site: table.column_index(columns::SITE),
            network_path: table.column_index(columns::NETWORK_PATH),
            vendor: table.column_index(columns::VENDOR),
            extras: table
                .headers
                .iter()
                .enumerate()
                .filter(|(_, name)| !columns::is_known(name))
                .map(|(i, _)| i)
                .collect(),
        })
    }
}

/// Validate the header, then coerce every row and derive the per-record flags.
pub fn normalize(
    table: &RawTable,
    requested: SchemaVariant,
    sla: &SlaThresholds,
) -> Result<NormalizedBatch> {
    let variant = requested.resolve(&table.headers);
    let missing = table.missing_columns(&variant.required_columns());
    if !missing.is_empty() {
        return Err(Error::schema(missing));
    }

    let index = ColumnIndex::build(table)?;
    let mut coercion = CoercionStats::default();
    let records = (0..table.len())
        .map(|row| normalize_row(table, row, &index, sla, &mut coercion))
        .collect::<Vec<_>>();

    if coercion.total() > 0 {
        log::warn!(
            "Absorbed {} unreadable cells (opened_at: {}, resolved_at: {}, resolution_minutes: {}, resolved: {})",
            coercion.total(),
            coercion.opened_at,
            coercion.resolved_at,
            coercion.resolution_minutes,
            coercion.resolved
        );
    }
    log::debug!(
        "Normalized {} records against the {} schema",
        records.len(),
        variant
    );

    Ok(NormalizedBatch {
        variant,
        records,
        extra_columns: index
            .extras
            .iter()
            .map(|&i| table.headers[i].clone())
            .collect(),
        optional_columns: columns::EXTENDED_ONLY
            .iter()
            .filter(|col| table.column_index(col).is_some())
            .map(|col| col.to_string())
            .collect(),
        coercion,
    })
}

fn normalize_row(
    table: &RawTable,
    row: usize,
    index: &ColumnIndex,
    sla: &SlaThresholds,
    coercion: &mut CoercionStats,
) -> IncidentRecord {
    let cell = |col: usize| table.cell(row, col);
    let optional = |col: Option<usize>| col.map(|c| table.cell(row, c).trim().to_string());

    let opened_raw = cell(index.opened_at);
    let opened_at = parse_timestamp(opened_raw);
    if opened_at.is_none() && !opened_raw.trim().is_empty() {
        coercion.opened_at += 1;
    }

    let resolved_at = index.resolved_at.and_then(|col| {
        let raw = cell(col);
        let parsed = parse_timestamp(raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            coercion.resolved_at += 1;
        }
        parsed
    });

    let minutes_raw = cell(index.resolution_minutes);
    let resolution_minutes = parse_minutes(minutes_raw);
    if resolution_minutes.is_none() && !minutes_raw.trim().is_empty() {
        coercion.resolution_minutes += 1;
    }

    let resolved_raw = cell(index.resolved);
    let resolved = parse_resolved(resolved_raw);
    if resolved == ResolvedState::Unknown && !resolved_raw.trim().is_empty() {
        coercion.resolved += 1;
    }

    let role = cell(index.role).to_string();
    let priority = cell(index.priority).trim().to_string();
    let sla_minutes = sla.minutes_for(&priority);

    IncidentRecord {
        id: cell(index.id).trim().to_string(),
        opened_at,
        resolved_at,
        is_executive: is_executive_role(&role),
        role,
        device_type: cell(index.device_type).to_string(),
        site: optional(index.site),
        network_path: optional(index.network_path),
        vendor: optional(index.vendor),
        issue_category: cell(index.issue_category).to_string(),
        sla_breached: is_breach(resolution_minutes, sla_minutes),
        priority,
        resolution_minutes,
        resolved,
        sla_minutes,
        extra: index.extras.iter().map(|&c| cell(c).to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL_HEADER: [&str; 8] = [
        "incident_id",
        "opened_at",
        "user_role",
        "device_type",
        "issue_category",
        "priority",
        "resolution_minutes",
        "resolved",
    ];

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_missing_columns_fail_before_rows() {
        let input = table(&["incident_id", "opened_at", "priority"], &[&["x"]]);
        let err = normalize(&input, SchemaVariant::Auto, &SlaThresholds::default()).unwrap_err();
        match err {
            Error::Schema { missing } => assert_eq!(
                missing,
                vec![
                    "user_role",
                    "device_type",
                    "issue_category",
                    "resolution_minutes",
                    "resolved"
                ]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_extended_requires_extended_columns() {
        let input = table(&MINIMAL_HEADER, &[]);
        let err =
            normalize(&input, SchemaVariant::Extended, &SlaThresholds::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Missing required columns: ["resolved_at", "site", "network_path", "vendor"]"#
        );
    }

    #[test]
    fn test_row_coercion_and_derived_flags() {
        let input = table(
            &MINIMAL_HEADER,
            &[
                &["INC1", "2025-01-02 08:00", " Executive ", "Laptop", "VPN Authentication", "P2", "300", "Yes"],
                &["INC2", "not a date", "Staff", "Desktop", "Printer", "P4", "-3", "Maybe"],
                &["INC3", "", "staff", "Desktop", "Printer", "P9", "5000", "no"],
                &["INC4", "2025-01-02 09:00", "Analyst", "Laptop", "Wi-Fi Drop", "P2", "240", ""],
            ],
        );

        let batch = normalize(&input, SchemaVariant::Auto, &SlaThresholds::default()).unwrap();
        assert_eq!(batch.variant, SchemaVariant::Minimal);
        assert_eq!(batch.records.len(), 4);

        let inc1 = &batch.records[0];
        assert!(inc1.is_executive);
        assert_eq!(inc1.sla_minutes, Some(240));
        assert_eq!(inc1.resolution_minutes, Some(300));
        assert!(inc1.sla_breached);
        assert_eq!(inc1.resolved, ResolvedState::Resolved);

        let inc2 = &batch.records[1];
        assert_eq!(inc2.opened_at, None);
        assert_eq!(inc2.resolution_minutes, None);
        assert_eq!(inc2.resolved, ResolvedState::Unknown);
        assert!(!inc2.sla_breached);

        let inc3 = &batch.records[2];
        assert_eq!(inc3.sla_minutes, None);
        assert!(!inc3.sla_breached, "unknown priority never breaches");
        assert_eq!(inc3.resolved, ResolvedState::Unresolved);

        let inc4 = &batch.records[3];
        assert!(!inc4.sla_breached, "equal to threshold is not a breach");

        assert_eq!(
            batch.coercion,
            CoercionStats {
                opened_at: 1,
                resolved_at: 0,
                resolution_minutes: 1,
                resolved: 1,
            }
        );
    }

    #[test]
    fn test_extended_fields_and_pass_through_columns() {
        let mut headers = MINIMAL_HEADER.to_vec();
        headers.extend(["resolved_at", "site", "network_path", "vendor", "assignee"]);
        let input = table(
            &headers,
            &[&[
                "INC9", "2025-01-02 08:00", "Staff", "Laptop", "Teams Audio", "P3", "30", "yes",
                "2025-01-02 08:30", "NYC-HQ", "VPN", "Zoom", "jdoe",
            ]],
        );

        let batch = normalize(&input, SchemaVariant::Auto, &SlaThresholds::default()).unwrap();
        assert_eq!(batch.variant, SchemaVariant::Extended);
        assert_eq!(batch.extra_columns, vec!["assignee".to_string()]);

        let record = &batch.records[0];
        assert_eq!(record.site.as_deref(), Some("NYC-HQ"));
        assert_eq!(record.network_path.as_deref(), Some("VPN"));
        assert_eq!(record.vendor.as_deref(), Some("Zoom"));
        assert!(record.resolved_at.is_some());
        assert_eq!(record.extra, vec!["jdoe".to_string()]);
    }

    #[test]
    fn test_minutes_above_ceiling_are_tallied() {
        let input = table(
            &MINIMAL_HEADER,
            &[&["INC1", "", "Staff", "Laptop", "Printer", "P3", "1e12", "yes"]],
        );
        let batch = normalize(&input, SchemaVariant::Minimal, &SlaThresholds::default()).unwrap();
        assert_eq!(batch.records[0].resolution_minutes, None);
        assert!(!batch.records[0].sla_breached);
        assert_eq!(batch.coercion.resolution_minutes, 1);
    }

    #[test]
    fn test_partial_extended_header_records_present_columns() {
        let mut headers = MINIMAL_HEADER.to_vec();
        headers.extend(["site", "vendor"]);
        let input = table(
            &headers,
            &[&["INC1", "", "Staff", "Laptop", "Printer", "P3", "5", "yes", "NYC-HQ", "Cisco"]],
        );
        let batch = normalize(&input, SchemaVariant::Auto, &SlaThresholds::default()).unwrap();
        assert_eq!(batch.variant, SchemaVariant::Minimal);
        assert_eq!(batch.optional_columns, vec!["site".to_string(), "vendor".to_string()]);
        assert!(batch.extra_columns.is_empty());
        assert_eq!(batch.records[0].site.as_deref(), Some("NYC-HQ"));
    }

    #[test]
    fn test_custom_sla_table_drives_breach() {
        let input = table(
            &MINIMAL_HEADER,
            &[&["INC1", "", "Staff", "Laptop", "Printer", "Urgent", "20", "yes"]],
        );
        let sla = SlaThresholds::from_pairs([("Urgent", 15)]);
        let batch = normalize(&input, SchemaVariant::Minimal, &sla).unwrap();
        assert!(batch.records[0].sla_breached);
    }
}
