//! Assembly of the fixed set of report tables.

mod summary;

pub use summary::SummaryKpis;

use serde::Serialize;

use crate::aggregate::{
    category_frequency, category_priority_crosstab, daily_trend, executive_impact,
    time_by_category, CategoryCount, CategoryPriorityTable, CategoryTimeStats, DailyVolume,
    ExecutiveImpactRow,
};
use crate::config::TrendConfig;
use crate::core::{IncidentRecord, RawTable, Result, SchemaVariant};
use crate::normalize::{normalize, CoercionStats, NormalizedBatch};
use crate::recommend::{Recommendation, RecommendationEngine};
use crate::sla::{SlaEvaluator, SlaSummaryRow};

/// Every table of one run, in sheet order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub variant: SchemaVariant,
    pub summary: SummaryKpis,
    pub top_issues: Vec<CategoryCount>,
    pub time_by_issue: Vec<CategoryTimeStats>,
    pub daily_trend: Vec<DailyVolume>,
    pub executive_impact: Vec<ExecutiveImpactRow>,
    pub category_priority: CategoryPriorityTable,
    pub sla_risk: Vec<SlaSummaryRow>,
    pub recommendations: Vec<Recommendation>,
    pub coercion: CoercionStats,
    pub extra_columns: Vec<String>,
    /// Extended-only input columns that were present; shown in the raw data
    pub optional_columns: Vec<String>,
    /// Normalized records, ascending by `opened_at`, undated last
    pub records: Vec<IncidentRecord>,
}

impl Report {
    /// Charts are only emitted for the extended export.
    pub fn includes_charts(&self) -> bool {
        self.variant.is_extended()
    }
}

/// Full pipeline: schema check, normalization, aggregation, assembly.
pub fn build_report(
    table: &RawTable,
    config: &TrendConfig,
    schema: Option<SchemaVariant>,
    top_k: Option<usize>,
) -> Result<Report> {
    let requested = schema.unwrap_or(config.report.schema);
    let batch = normalize(table, requested, &config.sla)?;
    let k = top_k.unwrap_or_else(|| config.top_k(batch.variant));
    Ok(assemble(batch, config, k))
}

/// Combine a normalized batch into the report tables.
pub fn assemble(batch: NormalizedBatch, config: &TrendConfig, top_k: usize) -> Report {
    let NormalizedBatch {
        variant,
        mut records,
        extra_columns,
        optional_columns,
        coercion,
    } = batch;

    let top_issues = category_frequency(&records);
    let summary = SummaryKpis::compute(&records, &top_issues);
    let recommendations = RecommendationEngine::new(variant).recommend(&top_issues, top_k);
    let sla_risk = SlaEvaluator::new(&config.sla).summarize(&records);

    let time_by_issue = time_by_category(&records);
    let daily = daily_trend(&records);
    let executive = executive_impact(&records);
    let category_priority = category_priority_crosstab(&records);

    records.sort_by_key(|r| (r.opened_at.is_none(), r.opened_at));

    log::debug!(
        "Assembled report: {} categories, {} days, {} SLA tiers, {} recommendations",
        top_issues.len(),
        daily.len(),
        sla_risk.len(),
        recommendations.len()
    );

    Report {
        variant,
        summary,
        top_issues,
        time_by_issue,
        daily_trend: daily,
        executive_impact: executive,
        category_priority,
        sla_risk,
        recommendations,
        coercion,
        extra_columns,
        optional_columns,
        records,
    }
}
