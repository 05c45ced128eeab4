use std::cmp::Ordering;

use log::info;
use serde::{Deserialize, Serialize};

use super::column::ColumnRef;
use super::model::{Row, Table};

/// Ranks rows whose `column` contains `priority` ahead of those that don't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: ColumnRef,
    pub priority: String,
}

impl SortKey {
    pub fn new(column: ColumnRef, priority: impl Into<String>) -> Self {
        SortKey {
            column,
            priority: priority.into(),
        }
    }

    /// Case-sensitive containment test on the key column.
    pub fn matches(&self, row: &Row) -> bool {
        row.cell_text(self.column.index()).contains(self.priority.as_str())
    }

    fn rank(&self, a: &Row, b: &Row) -> Ordering {
        // `true` sorts first.
        self.matches(b).cmp(&self.matches(a))
    }
}

/// Order two rows by the primary key, falling back to the secondary key
/// whenever the primary predicates agree.
pub fn compare_rows(a: &Row, b: &Row, primary: &SortKey, secondary: &SortKey) -> Ordering {
    primary.rank(a, b).then_with(|| secondary.rank(a, b))
}

/// Stable priority sort into a new table; rows that compare equal keep their
/// input order.
pub fn apply_sort(table: &Table, primary: &SortKey, secondary: &SortKey) -> Table {
    info!(
        "Sorting {} rows: primary {} contains {:?}, secondary {} contains {:?}",
        table.len(),
        primary.column,
        primary.priority,
        secondary.column,
        secondary.priority
    );
    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| compare_rows(a, b, primary, secondary));
    Table::new(rows)
}
