use serde::Serialize;

use crate::aggregate::{mean, percent, percentile, round1, CategoryCount};
use crate::core::{IncidentRecord, ResolvedState};

/// Top-line KPIs of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryKpis {
    pub total: usize,
    /// Unknown resolution status counts as unresolved in this rollup
    pub resolved: usize,
    pub unresolved: usize,
    /// Records whose resolved flag was not a recognizable yes/no
    pub unknown_status: usize,
    pub resolution_rate_percent: f64,
    /// Records with a measured resolution time
    pub measured: usize,
    pub mean_resolution_minutes: Option<f64>,
    pub p95_resolution_minutes: Option<f64>,
    pub sla_breaches: usize,
    pub top_category: Option<String>,
}

impl SummaryKpis {
    pub fn compute(records: &[IncidentRecord], frequency: &[CategoryCount]) -> Self {
        let total = records.len();
        let resolved = records
            .iter()
            .filter(|r| r.resolved.resolved_or_false())
            .count();
        let unknown_status = records
            .iter()
            .filter(|r| r.resolved == ResolvedState::Unknown)
            .count();
        let minutes: Vec<f64> = records
            .iter()
            .filter_map(|r| r.resolution_minutes.map(f64::from))
            .collect();

        Self {
            total,
            resolved,
            unresolved: total - resolved,
            unknown_status,
            resolution_rate_percent: round1(percent(resolved, total)),
            measured: minutes.len(),
            mean_resolution_minutes: mean(&minutes).map(round1),
            p95_resolution_minutes: percentile(&minutes, 0.95).map(round1),
            sla_breaches: records.iter().filter(|r| r.sla_breached).count(),
            top_category: frequency.first().map(|row| row.category.clone()),
        }
    }

    /// (metric, value) pairs in display order; absent statistics read "N/A".
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let or_na = |value: Option<f64>| {
            value
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "N/A".to_string())
        };

        vec![
            ("Total incidents", self.total.to_string()),
            ("Resolved incidents", self.resolved.to_string()),
            ("Unresolved incidents", self.unresolved.to_string()),
            ("Unknown resolution status", self.unknown_status.to_string()),
            (
                "Resolution rate (%)",
                format!("{:.1}", self.resolution_rate_percent),
            ),
            ("MTTR (minutes)", or_na(self.mean_resolution_minutes)),
            ("P95 resolution (minutes)", or_na(self.p95_resolution_minutes)),
            ("SLA breaches", self.sla_breaches.to_string()),
            (
                "Top issue category",
                self.top_category.clone().unwrap_or_else(|| "N/A".to_string()),
            ),
        ]
    }
}
