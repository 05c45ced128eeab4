use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::config::ProcessConfig;
use crate::data::{apply_filters, apply_sort, Sheet, Table};
use crate::store::TableStore;

// ---------------------------------------------------------------------------
// Pure pipeline: filter, then sort
// ---------------------------------------------------------------------------

/// Run the configured filters and the priority sort over `table`.
pub fn run_pipeline(table: &Table, config: &ProcessConfig) -> Table {
    info!("=== Applying filters ===");
    let filtered = apply_filters(table, &config.filters);
    info!(
        "Rows after filtering: {} (removed: {})",
        filtered.len(),
        table.len() - filtered.len()
    );

    info!("=== Applying sort ===");
    apply_sort(&filtered, &config.primary, &config.secondary)
}

// ---------------------------------------------------------------------------
// Store-backed processing
// ---------------------------------------------------------------------------

/// Row counts of one processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    pub processed_rows: usize,
    pub remaining_rows: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Skip the write-back.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub summary: ProcessSummary,
    pub sheet: Sheet,
}

/// Read the sheet from `store`, filter and sort it, and write it back.
///
/// An empty sheet is not an error: nothing is written and both counts are 0.
pub fn process<S: TableStore + ?Sized>(
    store: &mut S,
    config: &ProcessConfig,
    options: ProcessOptions,
) -> Result<ProcessOutcome> {
    info!("Processing table {} from {}", config.sheet_name, store.describe());

    let sheet = store.read_sheet()?;
    let initial = sheet.table.len();
    info!("Initial rows: {initial}");

    if initial == 0 {
        info!("No data rows to process");
        return Ok(ProcessOutcome {
            summary: ProcessSummary {
                processed_rows: 0,
                remaining_rows: 0,
            },
            sheet,
        });
    }

    let processed = sheet.with_table(run_pipeline(&sheet.table, config));
    let remaining = processed.table.len();

    if options.dry_run {
        info!("Dry run: write-back skipped");
    } else {
        store.write_sheet(&processed)?;
    }

    info!("=== Processing complete ===");
    Ok(ProcessOutcome {
        summary: ProcessSummary {
            processed_rows: initial,
            remaining_rows: remaining,
        },
        sheet: processed,
    })
}

// ---------------------------------------------------------------------------
// Status report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// JSON body reported to the caller after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: Status,
    pub message: String,
    #[serde(flatten)]
    pub summary: Option<ProcessSummary>,
}

impl StatusReport {
    pub fn success(summary: ProcessSummary) -> Self {
        StatusReport {
            status: Status::Success,
            message: "Processing completed successfully".to_string(),
            summary: Some(summary),
        }
    }

    pub fn failure(err: &anyhow::Error) -> Self {
        StatusReport {
            status: Status::Error,
            message: format!("{err:#}"),
            summary: None,
        }
    }

    pub fn from_result(result: &Result<ProcessOutcome>) -> Self {
        match result {
            Ok(outcome) => Self::success(outcome.summary),
            Err(err) => Self::failure(err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
