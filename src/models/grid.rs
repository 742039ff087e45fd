//! Spreadsheet grid types.
//!
//! A decoded upload is a [`Workbook`] of named [`Sheet`]s, each a list of rows of
//! [`Cell`]s. The grid has no fixed schema; rows may be ragged or empty.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as produced by an external decoder.
///
/// Deserializes from a JSON string, number or `null`.
///
/// # Example
///
/// ```
/// use fingerprint_attendance::models::Cell;
///
/// let cells: Vec<Cell> = serde_json::from_str(r#"["06.01", 7.5, null]"#).unwrap();
/// assert_eq!(cells[0], Cell::Text("06.01".to_string()));
/// assert_eq!(cells[1], Cell::Number(7.5));
/// assert_eq!(cells[2], Cell::Empty);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A text cell.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// An empty cell.
    #[default]
    Empty,
}

impl Cell {
    /// Returns the cell's text if it is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Coerces the cell to a string; empty cells become `""`.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(text) => Cow::Borrowed(text),
            Cell::Number(number) => Cow::Owned(number.to_string()),
            Cell::Empty => Cow::Borrowed(""),
        }
    }

    /// Returns true for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(_) => false,
            Cell::Empty => true,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text)
        }
    }
}

impl From<f64> for Cell {
    fn from(number: f64) -> Self {
        Cell::Number(number)
    }
}

/// One row of cells.
pub type Row = Vec<Cell>;

/// Joins a row's cells with single spaces, the way a reader would scan it.
pub fn row_text(row: &[Cell]) -> String {
    row.iter()
        .map(|cell| cell.to_text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One named sheet of a decoded upload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sheet {
    /// The sheet name, kept as provenance on extracted employees.
    pub name: String,
    /// The sheet's rows, top to bottom.
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Creates a sheet from a name and its rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// A decoded upload: one or more sheets in workbook order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    /// The workbook's sheets.
    pub sheets: Vec<Sheet>,
}
