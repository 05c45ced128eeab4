use std::borrow::Cow;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of an event table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as read from a spreadsheet-like source.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    /// Date or timestamp already rendered as text by the source.
    Date(String),
    Null,
}

impl CellValue {
    /// Text form used by every filter and sort predicate.
    ///
    /// Only `Null` becomes the empty string. Zero, `false` and `NaN` keep
    /// their text (`"0"`, `"false"`, `"NaN"`), so an exact-value rule for
    /// `""` does not match them. Numbers use their shortest decimal form, so
    /// `1.0` reads as `"1"`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::String(s) | CellValue::Date(s) => Cow::Borrowed(s),
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Integer(i) => Cow::Owned(i.to_string()),
            CellValue::Unsigned(u) => Cow::Owned(u.to_string()),
            CellValue::Float(v) => Cow::Owned(v.to_string()),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

// ---------------------------------------------------------------------------
// Row – one event record
// ---------------------------------------------------------------------------

/// One record of the table, addressed positionally.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Row { cells }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Text of the cell at `index`; a row shorter than `index` reads as empty.
    pub fn cell_text(&self, index: usize) -> Cow<'_, str> {
        self.cells
            .get(index)
            .map(CellValue::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Pad the row with `Null` cells up to `width`.
    fn pad_to(&mut self, width: usize) {
        if self.cells.len() < width {
            self.cells.resize(width, CellValue::Null);
        }
    }
}

impl<T: Into<CellValue>> FromIterator<T> for Row {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Table – header-free ordered rows
// ---------------------------------------------------------------------------

/// Ordered, header-free sequence of rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Table { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the table.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Table::new(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Sheet – header row plus data rows, as held by a store
// ---------------------------------------------------------------------------

/// A whole sheet: the header row and the data rows beneath it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub header: Vec<String>,
    pub table: Table,
}

impl Sheet {
    /// Build a rectangular sheet, padding short rows with `Null` up to the
    /// widest of the header and the rows.
    pub fn from_parts(header: Vec<String>, rows: Vec<Row>) -> Self {
        let width = rows
            .iter()
            .map(Row::len)
            .max()
            .unwrap_or(0)
            .max(header.len());
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.pad_to(width);
                row
            })
            .collect();
        Sheet {
            header,
            table: Table::new(rows),
        }
    }

    /// Same header, different body.
    pub fn with_table(&self, table: Table) -> Self {
        Sheet {
            header: self.header.clone(),
            table,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len().max(self.table.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_cells_read_as_empty() {
        let row = Row::new(vec![CellValue::Null, CellValue::from("x")]);
        assert_eq!(row.cell_text(0), "");
        assert_eq!(row.cell_text(1), "x");
        assert_eq!(row.cell_text(7), "");
    }

    #[test]
    fn numbers_and_bools_coerce_to_text() {
        assert_eq!(CellValue::Integer(0).as_text(), "0");
        assert_eq!(CellValue::Float(1.0).as_text(), "1");
        assert_eq!(CellValue::Float(2.5).as_text(), "2.5");
        assert_eq!(CellValue::Bool(true).as_text(), "true");
        assert_eq!(CellValue::Date("2024-05-01".into()).as_text(), "2024-05-01");
        assert_eq!(CellValue::Unsigned(u64::MAX).as_text(), "18446744073709551615");
    }

    #[test]
    fn only_null_reads_as_empty() {
        assert_eq!(CellValue::Integer(0).as_text(), "0");
        assert_eq!(CellValue::Bool(false).as_text(), "false");
        assert_eq!(CellValue::Float(f64::NAN).as_text(), "NaN");
        assert_eq!(CellValue::Null.as_text(), "");
    }

    #[test]
    fn sheet_pads_ragged_rows() {
        let sheet = Sheet::from_parts(
            vec!["A".into(), "B".into(), "C".into()],
            vec![Row::from_iter(["1"]), Row::from_iter(["1", "2", "3"])],
        );
        assert_eq!(sheet.width(), 3);
        assert!(sheet.table.rows().iter().all(|r| r.len() == 3));
        assert!(sheet.table.rows()[0].cells()[2].is_null());
    }
}
