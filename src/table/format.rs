//! Record-to-text rendering for table menus
//!
//! A [`Formatter`] turns a slice of records into two header lines plus one
//! aligned line per record. Column widths are computed jointly over the header
//! and every value, so rendering a subset of records can produce different
//! padding than rendering the full set.

use std::fmt;

/// Rendered table: two header lines and one data line per record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedTable {
    /// Column titles and the separator line below them
    pub header: [String; 2],
    /// One line per record, in record order
    pub rows: Vec<String>,
}

impl FormattedTable {
    /// Split pre-rendered table text (e.g. captured tool output).
    ///
    /// The first two lines are taken as header regardless of content;
    /// trailing blank lines are dropped. Returns `None` when fewer than
    /// two lines are present.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines: Vec<&str> = text.split('\n').collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() < 2 {
            return None;
        }
        Some(Self {
            header: [lines[0].to_string(), lines[1].to_string()],
            rows: lines[2..].iter().map(|l| l.to_string()).collect(),
        })
    }

    /// Full text with header, one line per row
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n{}\n", self.header[0], self.header[1]);
        for row in &self.rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }
}

/// Capability to render records as a table
pub trait Formatter<T> {
    /// Render `records`; the result must hold exactly one row per record
    fn format(&self, records: &[T]) -> FormattedTable;
}

impl<T, F> Formatter<T> for F
where
    F: Fn(&[T]) -> FormattedTable,
{
    fn format(&self, records: &[T]) -> FormattedTable {
        self(records)
    }
}

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    /// Numbers (and purely numeric text) are right-aligned
    pub fn is_numeric(&self) -> bool {
        match self {
            Cell::Int(_) | Cell::Float(_) => true,
            Cell::Text(s) => !s.is_empty() && s.chars().all(|c| c.is_numeric()),
            Cell::Bool(_) | Cell::Empty => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(n) => write!(f, "{n}"),
            Cell::Float(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Cell::Text(n.to_string()), Cell::Int)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Float(n)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

/// Records that expose named columns for [`ColumnFormatter`]
pub trait TableRecord {
    /// Ordered `(column, cell)` pairs. A column name ending in `!` marks a
    /// secret whose value is masked in the rendered table. The mask has a
    /// fixed length, so neither the value nor its length shows.
    fn table_data(&self) -> Vec<(String, Cell)>;
}

impl TableRecord for serde_json::Value {
    fn table_data(&self) -> Vec<(String, Cell)> {
        match self {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), json_cell(v)))
                .collect(),
            other => vec![("value".to_string(), json_cell(other))],
        }
    }
}

fn json_cell(value: &serde_json::Value) -> Cell {
    match value {
        serde_json::Value::Null => Cell::Empty,
        serde_json::Value::Bool(b) => Cell::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n.as_f64().map_or_else(|| Cell::Text(n.to_string()), Cell::Float),
        },
        serde_json::Value::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

/// Column-aligned renderer for [`TableRecord`] values.
///
/// Cells are joined with `" | "`, the second header line is a run of `-` as
/// wide as the first, numeric cells are right-aligned and everything else is
/// left-aligned.
#[derive(Debug, Clone, Default)]
pub struct ColumnFormatter {
    columns: Option<Vec<String>>,
}

impl ColumnFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only render the given columns, in the given order
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: Some(columns.into_iter().map(Into::into).collect()),
        }
    }

    fn column_names(&self, data: &[Vec<(String, Cell)>]) -> Vec<String> {
        if let Some(columns) = &self.columns {
            return columns.clone();
        }
        let mut names: Vec<String> = Vec::new();
        for record in data {
            for (name, _) in record {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}

/// Drawn in place of every secret cell
const MASK: &str = "********";

fn display_name(column: &str) -> String {
    column.replace('!', "")
}

fn is_masked(column: &str) -> bool {
    column.contains('!')
}

fn pad(text: &str, width: usize, right: bool) -> String {
    if right {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}

impl<T: TableRecord> Formatter<T> for ColumnFormatter {
    fn format(&self, records: &[T]) -> FormattedTable {
        let data: Vec<Vec<(String, Cell)>> = records.iter().map(TableRecord::table_data).collect();
        let columns = self.column_names(&data);

        let widths: Vec<usize> = columns
            .iter()
            .map(|column| {
                let title = display_name(column).chars().count();
                if is_masked(column) {
                    return title.max(MASK.len());
                }
                let values = data.iter().filter_map(|record| {
                    record
                        .iter()
                        .find(|(name, _)| name == column)
                        .map(|(_, cell)| cell.to_string().chars().count())
                });
                values.fold(title, usize::max)
            })
            .collect();

        let header_line = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| pad(&display_name(column), *width, false))
            .collect::<Vec<_>>()
            .join(" | ");
        let separator = "-".repeat(header_line.chars().count());

        let rows = data
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .zip(&widths)
                    .map(|(column, width)| {
                        let cell = record
                            .iter()
                            .find(|(name, _)| name == column)
                            .map_or(Cell::Empty, |(_, cell)| cell.clone());
                        if is_masked(column) {
                            pad(MASK, *width, false)
                        } else {
                            pad(&cell.to_string(), *width, cell.is_numeric())
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect();

        FormattedTable {
            header: [header_line, separator],
            rows,
        }
    }
}
