//! SLA compliance per priority tier.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregate::{percent, round1};
use crate::config::SlaThresholds;
use crate::core::IncidentRecord;
use crate::normalize::is_breach;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlaSummaryRow {
    pub priority: String,
    pub threshold_minutes: u32,
    /// Records with both a measured resolution time and a known threshold
    pub eligible: usize,
    pub breaches: usize,
    pub breach_rate_percent: f64,
}

/// Evaluates records against an immutable threshold table.
#[derive(Debug, Clone)]
pub struct SlaEvaluator<'a> {
    thresholds: &'a SlaThresholds,
}

impl<'a> SlaEvaluator<'a> {
    pub fn new(thresholds: &'a SlaThresholds) -> Self {
        Self { thresholds }
    }

    pub fn threshold_for(&self, priority: &str) -> Option<u32> {
        self.thresholds.minutes_for(priority)
    }

    pub fn is_breached(&self, record: &IncidentRecord) -> bool {
        is_breach(record.resolution_minutes, self.threshold_for(&record.priority))
    }

    /// Breach statistics per priority, in priority order.
    ///
    /// Unmeasured records and unknown priorities are left out entirely;
    /// priorities with no eligible record get no row.
    pub fn summarize(&self, records: &[IncidentRecord]) -> Vec<SlaSummaryRow> {
        let mut tiers: BTreeMap<&str, (u32, usize, usize)> = BTreeMap::new();
        for record in records {
            let (Some(_), Some(threshold)) = (
                record.resolution_minutes,
                self.threshold_for(&record.priority),
            ) else {
                continue;
            };
            let entry = tiers
                .entry(record.priority.as_str())
                .or_insert((threshold, 0, 0));
            entry.1 += 1;
            if self.is_breached(record) {
                entry.2 += 1;
            }
        }

        log::debug!("SLA summary covers {} priority tiers", tiers.len());

        tiers
            .into_iter()
            .map(|(priority, (threshold, eligible, breaches))| SlaSummaryRow {
                priority: priority.to_string(),
                threshold_minutes: threshold,
                eligible,
                breaches,
                breach_rate_percent: round1(percent(breaches, eligible)),
            })
            .collect()
    }
}
