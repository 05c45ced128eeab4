//! Data layer: core types, loading, filtering and sorting.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Sheet (header + Table)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  ordered FilterRules → reduced Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   sort    │  primary/secondary SortKey → reordered Table
//!   └──────────┘
//!        │
//!        ▼
//!  .csv / .json  (write-back)
//! ```

pub mod column;
pub mod filter;
pub mod loader;
pub mod model;
pub mod preview;
pub mod sort;

pub use column::{column_letter_to_index, index_to_column_letter, ColumnRef};
pub use filter::{apply_filters, apply_filters_with_steps, FilterRule, FilterStep};
pub use model::{CellValue, Row, Sheet, Table};
pub use sort::{apply_sort, compare_rows, SortKey};
