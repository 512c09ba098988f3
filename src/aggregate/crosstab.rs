use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::IncidentRecord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CrossTabRow {
    pub category: String,
    /// One count per entry of `CategoryPriorityTable::priorities`
    pub counts: Vec<usize>,
}

impl CrossTabRow {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Category × priority pivot. Absent combinations are zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryPriorityTable {
    pub priorities: Vec<String>,
    pub rows: Vec<CrossTabRow>,
}

impl CategoryPriorityTable {
    pub fn count(&self, category: &str, priority: &str) -> usize {
        let Some(col) = self.priorities.iter().position(|p| p == priority) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|row| row.category == category)
            .map(|row| row.counts[col])
            .unwrap_or(0)
    }

    pub fn column_totals(&self) -> Vec<usize> {
        (0..self.priorities.len())
            .map(|col| self.rows.iter().map(|row| row.counts[col]).sum())
            .collect()
    }
}

/// One row per category and one column per observed priority, both in lexical order.
pub fn category_priority_crosstab(records: &[IncidentRecord]) -> CategoryPriorityTable {
    let priorities: Vec<String> = records
        .iter()
        .map(|r| r.priority.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for record in records {
        let col = priorities
            .binary_search(&record.priority)
            .unwrap_or_default();
        rows.entry(record.issue_category.as_str())
            .or_insert_with(|| vec![0; priorities.len()])[col] += 1;
    }

    CategoryPriorityTable {
        rows: rows
            .into_iter()
            .map(|(category, counts)| CrossTabRow {
                category: category.to_string(),
                counts,
            })
            .collect(),
        priorities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::category_frequency;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn rec(category: &str, priority: &str) -> IncidentRecord {
        IncidentRecord::new("INC", category, priority)
    }

    #[test]
    fn test_pivot_fills_missing_with_zero() {
        let table = category_priority_crosstab(&[
            rec("VPN", "P2"),
            rec("VPN", "P3"),
            rec("VPN", "P2"),
            rec("Printer", "P4"),
        ]);

        assert_eq!(table.priorities, vec!["P2", "P3", "P4"]);
        assert_eq!(
            table.rows,
            vec![
                CrossTabRow { category: "Printer".into(), counts: vec![0, 0, 1] },
                CrossTabRow { category: "VPN".into(), counts: vec![2, 1, 0] },
            ]
        );
        assert_eq!(table.count("VPN", "P2"), 2);
        assert_eq!(table.count("Printer", "P2"), 0);
        assert_eq!(table.count("Nope", "P2"), 0);
        assert_eq!(table.column_totals(), vec![2, 1, 1]);
    }

    #[test]
    fn test_unknown_priority_becomes_its_own_column() {
        let table = category_priority_crosstab(&[rec("VPN", "Urgent"), rec("VPN", "")]);
        assert_eq!(table.priorities, vec!["", "Urgent"]);
        assert_eq!(table.rows[0].counts, vec![1, 1]);
    }

    proptest! {
        #[test]
        fn marginals_match_frequency_and_priority_counts(
            picks in proptest::collection::vec((0usize..4, 0usize..5), 0..150)
        ) {
            let cats = ["VPN", "Printer", "Teams Audio", "Disk Full"];
            let pris = ["P1", "P2", "P3", "P4", "P9"];
            let records: Vec<IncidentRecord> = picks
                .iter()
                .map(|&(c, p)| rec(cats[c], pris[p]))
                .collect();
            let table = category_priority_crosstab(&records);

            for freq in category_frequency(&records) {
                let row = table.rows.iter().find(|r| r.category == freq.category).unwrap();
                prop_assert_eq!(row.total(), freq.count);
            }
            for (priority, total) in table.priorities.iter().zip(table.column_totals()) {
                let expected = records.iter().filter(|r| &r.priority == priority).count();
                prop_assert_eq!(total, expected);
            }
        }
    }
}
