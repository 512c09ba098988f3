// Export modules for library usage
pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod normalize;
pub mod recommend;
pub mod report;
pub mod sla;

// Re-export commonly used types
pub use crate::core::{
    Error, IncidentRecord, RawTable, ResolvedState, Result, SchemaVariant,
};

pub use crate::aggregate::{
    category_frequency, category_priority_crosstab, daily_trend, executive_impact,
    time_by_category, CategoryCount, CategoryPriorityTable, CategoryTimeStats, DailyVolume,
    ExecutiveImpactRow,
};

pub use crate::config::{load_config, SlaThresholds, TrendConfig};
pub use crate::io::output::{create_writer, render_to_bytes, OutputFormat, OutputWriter};
pub use crate::io::read_incident_csv;
pub use crate::normalize::{normalize, NormalizedBatch};
pub use crate::recommend::{Recommendation, RecommendationEngine};
pub use crate::report::{build_report, Report, SummaryKpis};
pub use crate::sla::{SlaEvaluator, SlaSummaryRow};
