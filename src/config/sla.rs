use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowed resolution minutes per priority label.
///
/// Built once from configuration and handed to the normalizer and the SLA
/// evaluator; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlaThresholds(BTreeMap<String, u32>);

impl Default for SlaThresholds {
    fn default() -> Self {
        Self::from_pairs([("P1", 60), ("P2", 240), ("P3", 1440), ("P4", 2880)])
    }
}

impl SlaThresholds {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(priority, minutes)| (priority.into(), minutes))
                .collect(),
        )
    }

    /// Threshold for a priority label; unrecognized priorities have none.
    pub fn minutes_for(&self, priority: &str) -> Option<u32> {
        self.0.get(priority.trim()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject thresholds that would make every measured incident a breach.
    pub fn validate(&self) -> Result<(), String> {
        match self.0.iter().find(|(_, minutes)| **minutes == 0) {
            Some((priority, _)) => Err(format!(
                "SLA threshold for {} must be greater than zero",
                priority
            )),
            None => Ok(()),
        }
    }
}
