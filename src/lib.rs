//! Filter and priority-sort event listing tables.
//!
//! A table is read from a store (CSV, JSON or Parquet file), narrowed by an
//! ordered list of column rules, reordered by a stable two-key priority sort,
//! and written back.
//!
//! ```no_run
//! use agenda_sift::prelude::*;
//!
//! let mut store = FileStore::in_place("incoming.csv");
//! let outcome = process(&mut store, &ProcessConfig::default(), ProcessOptions::default())?;
//! println!("{} of {} rows kept", outcome.summary.remaining_rows, outcome.summary.processed_rows);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod store;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::ProcessConfig;
    pub use crate::data::{
        apply_filters, apply_sort, column_letter_to_index, CellValue, ColumnRef, FilterRule, Row,
        Sheet, SortKey, Table,
    };
    pub use crate::error::{ColumnError, ConfigError, StoreError};
    pub use crate::pipeline::{
        process, run_pipeline, ProcessOptions, ProcessOutcome, ProcessSummary, StatusReport,
    };
    pub use crate::store::{FileStore, MemoryStore, TableStore};
}
