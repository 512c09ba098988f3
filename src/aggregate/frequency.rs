use serde::Serialize;
use std::collections::BTreeMap;

use super::{percent, round1};
use crate::core::IncidentRecord;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    pub percent: f64,
}

/// Count and share of all records per issue category.
///
/// Sorted by count descending; equal counts keep lexical category order.
pub fn category_frequency(records: &[IncidentRecord]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.issue_category.as_str()).or_default() += 1;
    }

    let total = records.len();
    let mut rows: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
            percent: round1(percent(count, total)),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}
