use serde::{Deserialize, Serialize};

use super::CellValue;

/// An in-memory table: ordered column headers plus row-major cells.
/// Rows are identified by position only; sorting renumbers them implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Index of the column with this exact header name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (row, column). Ragged rows read as empty past their end.
    pub fn cell(&self, row: usize, column: usize) -> CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .cloned()
            .unwrap_or_default()
    }

    /// Stable ascending sort by the given column's key ordering.
    pub fn sorted_by_column(mut self, column: usize) -> Self {
        self.rows.sort_by(|a, b| {
            let left = a.get(column).cloned().unwrap_or_default();
            let right = b.get(column).cloned().unwrap_or_default();
            left.key_cmp(&right)
        });
        self
    }
}
