use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::IncidentRecord;

/// Calendar day of `opened_at`; records without a timestamp share one bucket.
///
/// Orders every known day before `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateBucket {
    Day(NaiveDate),
    Unknown,
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBucket::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateBucket::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for DateBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyVolume {
    pub date: DateBucket,
    pub total: usize,
    /// Unknown resolution status counts as unresolved here
    pub resolved: usize,
    pub unresolved: usize,
}

/// Incident volume per opening day, ascending, with the unknown-date bucket last.
pub fn daily_trend(records: &[IncidentRecord]) -> Vec<DailyVolume> {
    let mut days: BTreeMap<DateBucket, (usize, usize)> = BTreeMap::new();
    for record in records {
        let bucket = record
            .opened_at
            .map(|ts| DateBucket::Day(ts.date()))
            .unwrap_or(DateBucket::Unknown);
        let entry = days.entry(bucket).or_default();
        entry.0 += 1;
        if record.resolved.resolved_or_false() {
            entry.1 += 1;
        }
    }

    days.into_iter()
        .map(|(date, (total, resolved))| DailyVolume {
            date,
            total,
            resolved,
            unresolved: total - resolved,
        })
        .collect()
}
