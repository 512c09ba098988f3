pub mod errors;

pub use errors::{Error, Result, ResultExt};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Input column names understood by the pipeline.
pub mod columns {
    pub const INCIDENT_ID: &str = "incident_id";
    pub const OPENED_AT: &str = "opened_at";
    pub const RESOLVED_AT: &str = "resolved_at";
    pub const USER_ROLE: &str = "user_role";
    pub const DEVICE_TYPE: &str = "device_type";
    pub const SITE: &str = "site";
    pub const NETWORK_PATH: &str = "network_path";
    pub const VENDOR: &str = "vendor";
    pub const ISSUE_CATEGORY: &str = "issue_category";
    pub const PRIORITY: &str = "priority";
    pub const RESOLUTION_MINUTES: &str = "resolution_minutes";
    pub const RESOLVED: &str = "resolved";

    /// Columns every input must carry
    pub const MINIMAL: [&str; 8] = [
        INCIDENT_ID,
        OPENED_AT,
        USER_ROLE,
        DEVICE_TYPE,
        ISSUE_CATEGORY,
        PRIORITY,
        RESOLUTION_MINUTES,
        RESOLVED,
    ];

    /// Additional columns of the extended export
    pub const EXTENDED_ONLY: [&str; 4] = [RESOLVED_AT, SITE, NETWORK_PATH, VENDOR];

    /// Whether a header name is consumed by the pipeline (as opposed to passed through)
    pub fn is_known(name: &str) -> bool {
        MINIMAL.contains(&name) || EXTENDED_ONLY.contains(&name)
    }
}

/// Which input schema a run is validated against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Extended when every extended column is present, minimal otherwise
    #[default]
    Auto,
    /// Core help-desk export
    Minimal,
    /// Export that also carries resolution timestamps, site, network path and vendor
    Extended,
}

impl SchemaVariant {
    /// Settle `Auto` against a concrete header row.
    pub fn resolve(self, headers: &[String]) -> SchemaVariant {
        match self {
            SchemaVariant::Auto => {
                let has_all = columns::EXTENDED_ONLY
                    .iter()
                    .all(|col| headers.iter().any(|h| h == col));
                if has_all {
                    SchemaVariant::Extended
                } else {
                    SchemaVariant::Minimal
                }
            }
            concrete => concrete,
        }
    }

    pub fn required_columns(self) -> Vec<&'static str> {
        let mut required = columns::MINIMAL.to_vec();
        if self == SchemaVariant::Extended {
            required.extend(columns::EXTENDED_ONLY);
        }
        required
    }

    /// Number of categories that receive a recommendation when not configured
    pub fn default_top_k(self) -> usize {
        match self {
            SchemaVariant::Extended => 5,
            SchemaVariant::Auto | SchemaVariant::Minimal => 3,
        }
    }

    pub fn is_extended(self) -> bool {
        self == SchemaVariant::Extended
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchemaVariant::Auto => "auto",
            SchemaVariant::Minimal => "minimal",
            SchemaVariant::Extended => "extended",
        };
        f.write_str(name)
    }
}

/// Row-oriented input exactly as read: a header plus string cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Required columns absent from the header, in the order they were requested
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|col| self.column_index(col).is_none())
            .map(|col| col.to_string())
            .collect()
    }

    /// Cell text; short rows read as empty cells.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Three-valued resolution status.
///
/// `Unknown` is kept distinct through normalization; each rollup decides how
/// to count it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedState {
    Resolved,
    Unresolved,
    #[default]
    Unknown,
}

impl ResolvedState {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ResolvedState::Resolved => Some(true),
            ResolvedState::Unresolved => Some(false),
            ResolvedState::Unknown => None,
        }
    }

    /// Rollup policy shared by the KPI summary and the daily trend: unknown counts as unresolved.
    pub fn resolved_or_false(self) -> bool {
        self.as_bool().unwrap_or(false)
    }

    pub fn label(self) -> &'static str {
        match self {
            ResolvedState::Resolved => "Yes",
            ResolvedState::Unresolved => "No",
            ResolvedState::Unknown => "",
        }
    }
}

/// One normalized incident. Derived fields are filled once by the normalizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: String,
    pub opened_at: Option<NaiveDateTime>,
    pub resolved_at: Option<NaiveDateTime>,
    pub role: String,
    pub device_type: String,
    pub site: Option<String>,
    pub network_path: Option<String>,
    pub vendor: Option<String>,
    pub issue_category: String,
    pub priority: String,
    pub resolution_minutes: Option<u32>,
    pub resolved: ResolvedState,
    pub is_executive: bool,
    pub sla_minutes: Option<u32>,
    pub sla_breached: bool,
    /// Values of pass-through columns, aligned with `NormalizedBatch::extra_columns`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl IncidentRecord {
    /// Record with only identity, category and priority set.
    pub fn new(
        id: impl Into<String>,
        issue_category: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            opened_at: None,
            resolved_at: None,
            role: String::new(),
            device_type: String::new(),
            site: None,
            network_path: None,
            vendor: None,
            issue_category: issue_category.into(),
            priority: priority.into(),
            resolution_minutes: None,
            resolved: ResolvedState::Unknown,
            is_executive: false,
            sla_minutes: None,
            sla_breached: false,
            extra: Vec::new(),
        }
    }

    pub fn has_resolution_time(&self) -> bool {
        self.resolution_minutes.is_some()
    }

    /// Eligible for SLA statistics: both a measured time and a known threshold.
    pub fn is_sla_measured(&self) -> bool {
        self.resolution_minutes.is_some() && self.sla_minutes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_auto_resolves_to_extended_only_with_all_columns() {
        let mut names = columns::MINIMAL.to_vec();
        assert_eq!(
            SchemaVariant::Auto.resolve(&headers(&names)),
            SchemaVariant::Minimal
        );

        names.extend(["site", "vendor"]);
        assert_eq!(
            SchemaVariant::Auto.resolve(&headers(&names)),
            SchemaVariant::Minimal
        );

        names.extend(["resolved_at", "network_path"]);
        assert_eq!(
            SchemaVariant::Auto.resolve(&headers(&names)),
            SchemaVariant::Extended
        );
    }

    #[test]
    fn test_explicit_variant_is_not_reresolved() {
        let names = headers(&columns::MINIMAL);
        assert_eq!(
            SchemaVariant::Extended.resolve(&names),
            SchemaVariant::Extended
        );
    }

    #[test]
    fn test_required_columns_per_variant() {
        assert_eq!(SchemaVariant::Minimal.required_columns().len(), 8);
        assert_eq!(SchemaVariant::Extended.required_columns().len(), 12);
        assert_eq!(SchemaVariant::Minimal.default_top_k(), 3);
        assert_eq!(SchemaVariant::Extended.default_top_k(), 5);
    }

    #[test]
    fn test_raw_table_missing_columns_and_short_rows() {
        let table = RawTable::new(
            headers(&["incident_id", "priority"]),
            vec![vec!["INC1".into()]],
        );
        assert_eq!(
            table.missing_columns(&["incident_id", "resolved", "priority", "site"]),
            vec!["resolved".to_string(), "site".to_string()]
        );
        assert_eq!(table.cell(0, 0), "INC1");
        assert_eq!(table.cell(0, 1), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_resolved_state_rollup() {
        assert!(ResolvedState::Resolved.resolved_or_false());
        assert!(!ResolvedState::Unresolved.resolved_or_false());
        assert!(!ResolvedState::Unknown.resolved_or_false());
        assert_eq!(ResolvedState::Unknown.as_bool(), None);
    }
}
