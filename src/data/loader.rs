use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Row, Sheet};
use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Load a sheet from a file.  Dispatch by extension.
///
/// The first row is the header; everything below it becomes the table.
///
/// Supported formats:
/// * `.csv`     – header line, then one event per line
/// * `.json`    – `[[header...], [row...], ...]` or `[{ "col": value, ... }, ...]`
/// * `.parquet` – one column per field, read only
pub fn load_file(path: &Path) -> Result<Sheet> {
    match extension(path).as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(StoreError::UnsupportedFormat(other.to_string()).into()),
    }
}

/// Write a sheet to a file, replacing whatever was there.
pub fn save_file(path: &Path, sheet: &Sheet) -> Result<()> {
    match extension(path).as_str() {
        "json" => save_json(path, sheet),
        "csv" => save_csv(path, sheet),
        ext @ ("parquet" | "pq") => Err(StoreError::ReadOnlyFormat(ext.to_string()).into()),
        other => Err(StoreError::UnsupportedFormat(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Two layouts are accepted.  Row arrays, header first:
///
/// ```json
/// [
///   ["ID-EVENTO", "TITULO", "PRECIO", "GRATUITO"],
///   [11452, "Concierto de jazz", "", 0],
///   ...
/// ]
/// ```
///
/// or records, whose keys become the header in first-seen order:
///
/// ```json
/// [ { "ID-EVENTO": 11452, "TITULO": "Concierto de jazz" }, ... ]
/// ```
fn load_json(path: &Path) -> Result<Sheet> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    match records.first() {
        None => Ok(Sheet::default()),
        Some(JsonValue::Array(_)) => json_row_arrays(records),
        Some(JsonValue::Object(_)) => json_records(records),
        Some(other) => bail!("Row 0: expected an array or an object, got {other}"),
    }
}

fn json_row_arrays(records: &[JsonValue]) -> Result<Sheet> {
    let Some((head, body)) = records.split_first() else {
        return Ok(Sheet::default());
    };
    let header = head
        .as_array()
        .context("Header row is not a JSON array")?
        .iter()
        .map(|v| json_to_cell(v).to_string())
        .collect();

    let rows = body
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let cells = rec
                .as_array()
                .with_context(|| format!("Row {}: expected a JSON array", i + 1))?;
            Ok(Row::new(cells.iter().map(json_to_cell).collect()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Sheet::from_parts(header, rows))
}

fn json_records(records: &[JsonValue]) -> Result<Sheet> {
    let mut objects = Vec::with_capacity(records.len());
    let mut header: Vec<String> = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !header.contains(key) {
                header.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .into_iter()
        .map(|obj| {
            header
                .iter()
                .map(|key| obj.get(key).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect::<Vec<_>>()
        })
        .map(Row::new)
        .collect();

    Ok(Sheet::from_parts(header, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(u) = n.as_u64() {
                CellValue::Unsigned(u)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

fn cell_to_json(cell: &CellValue) -> JsonValue {
    match cell {
        CellValue::String(s) | CellValue::Date(s) => JsonValue::String(s.clone()),
        CellValue::Integer(i) => JsonValue::from(*i),
        CellValue::Unsigned(u) => JsonValue::from(*u),
        CellValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        CellValue::Bool(b) => JsonValue::Bool(*b),
        CellValue::Null => JsonValue::Null,
    }
}

/// Always written in the row-array layout.
fn save_json(path: &Path, sheet: &Sheet) -> Result<()> {
    let mut root = Vec::with_capacity(sheet.table.len() + 1);
    root.push(JsonValue::from(sheet.header.clone()));
    for row in sheet.table.rows() {
        root.push(JsonValue::Array(row.cells().iter().map(cell_to_json).collect()));
    }

    let file = File::create(path).context("creating JSON file")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &root).context("writing JSON")?;
    writer.flush().context("flushing JSON file")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Header row, then one record per line.  Cells stay text so write-back
/// reproduces them exactly; empty fields become `Null`.
fn load_csv(path: &Path) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let header: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows: Vec<Row> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(text_cell).collect());
    }

    Ok(Sheet::from_parts(header, rows))
}

fn text_cell(s: &str) -> CellValue {
    if s.is_empty() {
        CellValue::Null
    } else {
        CellValue::String(s.to_string())
    }
}

fn save_csv(path: &Path, sheet: &Sheet) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("creating CSV")?;
    if !sheet.header.is_empty() {
        writer.write_record(&sheet.header).context("writing CSV header")?;
    }
    for (row_no, row) in sheet.table.rows().iter().enumerate() {
        writer
            .write_record(row.cells().iter().map(|c| c.as_text().into_owned()))
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file; field names form the header.
///
/// Strings, integers, floats and booleans keep their type; dates and
/// timestamps are rendered to text, as is anything more exotic.
fn load_parquet(path: &Path) -> Result<Sheet> {
    let file = File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let header: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .enumerate()
                .map(|(col_idx, col)| {
                    extract_cell_value(col, row)
                        .with_context(|| format!("Row {row}, column {col_idx}"))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(Row::new(cells));
        }
    }

    Ok(Sheet::from_parts(header, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &ArrayRef, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt32 => {
            CellValue::Integer(col.as_primitive::<UInt32Type>().value(row) as i64)
        }
        DataType::UInt64 => {
            let value = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(value)
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Unsigned(value))
        }
        DataType::Float32 => {
            CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64)
        }
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            CellValue::Date(array_value_to_string(col.as_ref(), row)?)
        }
        _ => CellValue::String(array_value_to_string(col.as_ref(), row)?),
    };
    Ok(value)
}
