use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::IncidentRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UserGroup {
    Executive,
    #[serde(rename = "Non-Executive")]
    NonExecutive,
}

impl UserGroup {
    pub fn from_flag(is_executive: bool) -> Self {
        if is_executive {
            UserGroup::Executive
        } else {
            UserGroup::NonExecutive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserGroup::Executive => "Executive",
            UserGroup::NonExecutive => "Non-Executive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExecutiveImpactRow {
    pub user_group: UserGroup,
    pub category: String,
    pub count: usize,
}

/// Record counts per (executive flag, category), executive group first,
/// then by count descending within each group.
pub fn executive_impact(records: &[IncidentRecord]) -> Vec<ExecutiveImpactRow> {
    let mut counts: BTreeMap<(bool, &str), usize> = BTreeMap::new();
    for record in records {
        *counts
            .entry((record.is_executive, record.issue_category.as_str()))
            .or_default() += 1;
    }

    let mut rows: Vec<(bool, &str, usize)> = counts
        .into_iter()
        .map(|((exec, category), count)| (exec, category, count))
        .collect();
    rows.sort_by(|a, b| b.0.cmp(&a.0).then(b.2.cmp(&a.2)));

    rows.into_iter()
        .map(|(exec, category, count)| ExecutiveImpactRow {
            user_group: UserGroup::from_flag(exec),
            category: category.to_string(),
            count,
        })
        .collect()
}
