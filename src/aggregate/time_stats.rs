use serde::Serialize;
use std::collections::BTreeMap;

use super::{mean, median, round1};
use crate::core::IncidentRecord;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTimeStats {
    pub category: String,
    /// Records in the category with a measured resolution time
    pub count: usize,
    pub mean_minutes: f64,
    pub median_minutes: f64,
    pub max_minutes: u32,
}

/// Resolution-time statistics per category, over measured records only.
///
/// Categories without any measured record are omitted, not zero-filled.
pub fn time_by_category(records: &[IncidentRecord]) -> Vec<CategoryTimeStats> {
    let mut groups: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for record in records {
        if let Some(minutes) = record.resolution_minutes {
            groups
                .entry(record.issue_category.as_str())
                .or_default()
                .push(minutes);
        }
    }

    groups
        .into_iter()
        .filter_map(|(category, minutes)| {
            let values: Vec<f64> = minutes.iter().map(|&m| f64::from(m)).collect();
            Some(CategoryTimeStats {
                category: category.to_string(),
                count: minutes.len(),
                mean_minutes: round1(mean(&values)?),
                median_minutes: round1(median(&values)?),
                max_minutes: minutes.iter().copied().max()?,
            })
        })
        .collect()
}
