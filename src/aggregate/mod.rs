//! Grouped summaries over a normalized record set.
//!
//! Each aggregate is a pure function of `&[IncidentRecord]`; grouping uses
//! ordered maps so repeated runs produce identical tables.

pub mod crosstab;
pub mod daily;
pub mod executive;
pub mod frequency;
pub mod time_stats;

pub use crosstab::{category_priority_crosstab, CategoryPriorityTable, CrossTabRow};
pub use daily::{daily_trend, DailyVolume, DateBucket};
pub use executive::{executive_impact, ExecutiveImpactRow, UserGroup};
pub use frequency::{category_frequency, CategoryCount};
pub use time_stats::{time_by_category, CategoryTimeStats};

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100`, zero when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 0.5)
}

/// Quantile `q` in `[0, 1]` with linear interpolation between closest ranks.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}
