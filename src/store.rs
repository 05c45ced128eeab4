//! Where sheets come from and go back to.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info};

use crate::data::loader::{load_file, save_file};
use crate::data::Sheet;
use crate::error::StoreError;

/// A source that yields one sheet and accepts the processed sheet back.
pub trait TableStore {
    /// Human readable location, for logs and status messages.
    fn describe(&self) -> String;

    fn read_sheet(&mut self) -> Result<Sheet>;

    /// Replace the stored sheet; rows beyond the new length are cleared.
    fn write_sheet(&mut self, sheet: &Sheet) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Reads one file and writes the result to the same or another file.
#[derive(Debug, Clone)]
pub struct FileStore {
    input: PathBuf,
    output: PathBuf,
}

impl FileStore {
    /// Read and write back the same file.
    pub fn in_place(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        FileStore {
            output: path.clone(),
            input: path,
        }
    }

    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        FileStore {
            input: input.into(),
            output: output.into(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// The input must be a regular file this process can open.
    fn check_readable(&self) -> Result<(), StoreError> {
        let unavailable = |reason: String| {
            error!("Table source {} unavailable: {reason}", self.input.display());
            StoreError::SourceUnavailable(format!("{} ({reason})", self.describe()))
        };
        let meta = fs::metadata(&self.input).map_err(|e| unavailable(e.to_string()))?;
        if !meta.is_file() {
            return Err(unavailable("not a regular file".to_string()));
        }
        File::open(&self.input).map_err(|e| unavailable(e.to_string()))?;
        Ok(())
    }
}

impl TableStore for FileStore {
    fn describe(&self) -> String {
        self.input.display().to_string()
    }

    fn read_sheet(&mut self) -> Result<Sheet> {
        self.check_readable()?;
        let sheet = load_file(&self.input)
            .with_context(|| format!("loading {}", self.input.display()))?;
        info!(
            "Read {} rows x {} columns from {}",
            sheet.table.len(),
            sheet.width(),
            self.input.display()
        );
        Ok(sheet)
    }

    fn write_sheet(&mut self, sheet: &Sheet) -> Result<()> {
        save_file(&self.output, sheet)
            .with_context(|| format!("writing {}", self.output.display()))
            .inspect_err(|e| error!("Write-back failed: {e:#}"))?;
        info!("{} rows written to {}", sheet.table.len(), self.output.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheet: Option<Sheet>,
    writes: usize,
}

impl MemoryStore {
    pub fn new(sheet: Sheet) -> Self {
        MemoryStore {
            sheet: Some(sheet),
            writes: 0,
        }
    }

    /// A store whose source cannot be found.
    pub fn unavailable() -> Self {
        MemoryStore::default()
    }

    pub fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    /// Number of completed write-backs.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TableStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read_sheet(&mut self) -> Result<Sheet> {
        self.sheet
            .clone()
            .ok_or_else(|| StoreError::SourceUnavailable(self.describe()).into())
    }

    fn write_sheet(&mut self, sheet: &Sheet) -> Result<()> {
        self.sheet = Some(sheet.clone());
        self.writes += 1;
        Ok(())
    }
}
