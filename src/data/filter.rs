use std::fmt;

use log::{info, trace};
use serde::{Deserialize, Serialize};

use super::column::ColumnRef;
use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Filter rules: one column, one predicate kind
// ---------------------------------------------------------------------------

/// A row admission predicate over a single column.
///
/// Cells are compared by their text form (see
/// [`CellValue::as_text`](super::model::CellValue::as_text)); a missing or
/// `Null` cell reads as the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterRule {
    /// Drop the row when the cell contains any of `substrings`.
    /// Comparison ignores case unless `case_sensitive` is set.
    ExcludeSubstring {
        column: ColumnRef,
        substrings: Vec<String>,
        #[serde(default)]
        case_sensitive: bool,
    },
    /// Keep the row only when the cell contains at least one of `substrings`.
    RequireAnySubstring {
        column: ColumnRef,
        substrings: Vec<String>,
    },
    /// Drop the row when the cell equals any of `values` exactly.
    ExcludeExactValue {
        column: ColumnRef,
        values: Vec<String>,
    },
}

impl FilterRule {
    pub fn column(&self) -> &ColumnRef {
        match self {
            FilterRule::ExcludeSubstring { column, .. }
            | FilterRule::RequireAnySubstring { column, .. }
            | FilterRule::ExcludeExactValue { column, .. } => column,
        }
    }

    /// Whether `row` survives this rule.
    pub fn keeps(&self, row: &Row) -> bool {
        let text = row.cell_text(self.column().index());
        match self {
            FilterRule::ExcludeSubstring {
                substrings,
                case_sensitive: true,
                ..
            } => !substrings.iter().any(|s| text.contains(s.as_str())),
            FilterRule::ExcludeSubstring { substrings, .. } => {
                let text = text.to_lowercase();
                !substrings
                    .iter()
                    .any(|s| text.contains(s.to_lowercase().as_str()))
            }
            FilterRule::RequireAnySubstring { substrings, .. } => {
                substrings.iter().any(|s| text.contains(s.as_str()))
            }
            FilterRule::ExcludeExactValue { values, .. } => !values.iter().any(|v| *v == text),
        }
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRule::ExcludeSubstring {
                column,
                substrings,
                case_sensitive,
            } => write!(
                f,
                "exclude {substrings:?} in column {column}{}",
                if *case_sensitive { "" } else { " (ignoring case)" }
            ),
            FilterRule::RequireAnySubstring { column, substrings } => {
                write!(f, "require any of {substrings:?} in column {column}")
            }
            FilterRule::ExcludeExactValue { column, values } => {
                write!(f, "exclude values {values:?} in column {column}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Applying an ordered rule list
// ---------------------------------------------------------------------------

/// Row counts around one rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStep {
    pub rule: String,
    pub before: usize,
    pub after: usize,
}

impl FilterStep {
    pub fn removed(&self) -> usize {
        self.before - self.after
    }
}

/// Apply `rules` in order, each to the survivors of the previous one.
///
/// The result is a subsequence of `table`: rows are cloned unchanged and keep
/// their relative order.
pub fn apply_filters(table: &Table, rules: &[FilterRule]) -> Table {
    apply_filters_with_steps(table, rules).0
}

/// Like [`apply_filters`], also returning the per-rule row counts.
pub fn apply_filters_with_steps(table: &Table, rules: &[FilterRule]) -> (Table, Vec<FilterStep>) {
    let mut survivors: Vec<&Row> = table.rows().iter().collect();
    let mut steps = Vec::with_capacity(rules.len());

    for rule in rules {
        let before = survivors.len();
        survivors.retain(|row| {
            let keep = rule.keeps(row);
            if !keep {
                trace!("dropped by [{rule}]: {:?}", row.cell_text(rule.column().index()));
            }
            keep
        });
        let step = FilterStep {
            rule: rule.to_string(),
            before,
            after: survivors.len(),
        };
        info!(
            "Filter [{}]: {} -> {} (removed: {})",
            step.rule,
            step.before,
            step.after,
            step.removed()
        );
        steps.push(step);
    }

    (survivors.into_iter().cloned().collect(), steps)
}
