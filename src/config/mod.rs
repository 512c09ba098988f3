//! Run configuration: SLA thresholds, recommendation depth, schema selection
//! and output defaults, loaded from `.incident-trends.toml`.

mod core;
mod loader;
mod sla;

pub use self::core::{OutputConfig, RecommendationConfig, ReportConfig, TrendConfig};
pub use loader::{load_config, load_config_from, parse_and_validate_config, CONFIG_FILE_NAME};
pub use sla::SlaThresholds;
