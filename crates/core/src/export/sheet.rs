//! Plain tabular sheet data.

use serde::Serialize;

/// One cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Text cell.
    Text(String),
    /// Whole-number cell.
    Integer(u32),
}

impl CellValue {
    /// Text content, if a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Integer(_) => None,
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Integer(value)
    }
}

/// A worksheet: header row, data rows and column widths in characters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    /// Worksheet name.
    pub name: &'static str,
    /// Header row.
    pub headers: Vec<String>,
    /// Data rows, each as wide as `headers`.
    pub rows: Vec<Vec<CellValue>>,
    /// Column widths.
    pub column_widths: Vec<f64>,
}

impl Sheet {
    /// Values of one column, header excluded.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}
