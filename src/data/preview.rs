use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use super::column::index_to_column_letter;
use super::model::Sheet;

/// Render the first `limit` rows of `sheet` as a text table.
///
/// Columns without a header name are labelled by their letter.
pub fn preview(sheet: &Sheet, limit: usize) -> Result<String> {
    let width = sheet.width();
    if width == 0 {
        return Ok(String::new());
    }
    let rows = &sheet.table.rows()[..limit.min(sheet.table.len())];

    let fields: Vec<Field> = (0..width)
        .map(|i| {
            let name = sheet
                .header
                .get(i)
                .filter(|h| !h.is_empty())
                .cloned()
                .unwrap_or_else(|| index_to_column_letter(i));
            Field::new(name, DataType::Utf8, true)
        })
        .collect();

    let columns: Vec<ArrayRef> = (0..width)
        .map(|i| {
            let values: StringArray = rows
                .iter()
                .map(|row| {
                    row.cells()
                        .get(i)
                        .filter(|c| !c.is_null())
                        .map(|c| c.as_text().into_owned())
                })
                .collect();
            Arc::new(values) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .context("building preview batch")?;
    let table = pretty_format_batches(&[batch]).context("formatting preview")?;
    Ok(table.to_string())
}
