use serde::{Deserialize, Serialize};

use super::sla::SlaThresholds;
use crate::core::SchemaVariant;

/// Root configuration structure for incident-trends
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TrendConfig {
    /// Priority label -> allowed resolution minutes
    #[serde(default)]
    pub sla: SlaThresholds,

    /// Recommendation settings
    #[serde(default)]
    pub recommendations: RecommendationConfig,

    /// Report assembly settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RecommendationConfig {
    /// Number of top categories to cover; falls back to the schema default
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ReportConfig {
    #[serde(default)]
    pub schema: SchemaVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

fn default_format() -> String {
    "xlsx".to_string()
}

impl TrendConfig {
    /// Recommendation count for a resolved schema variant
    pub fn top_k(&self, variant: SchemaVariant) -> usize {
        self.recommendations
            .top
            .unwrap_or_else(|| variant.default_top_k())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.sla.validate()?;
        if self.recommendations.top == Some(0) {
            return Err("recommendations.top must be at least 1".to_string());
        }
        Ok(())
    }
}
