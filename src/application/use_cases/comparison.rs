//! Spreadsheet comparison use case
//!
//! Aligns two tables by their shared key column and merges them:
//! - Validating that both tables carry the key column (exact name)
//! - Sorting each table ascending by the key's natural ordering
//! - Performing a full outer join, Cartesian-expanding duplicate keys
//! - Disambiguating column names present in both tables with suffixes

use std::cmp::Ordering;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Table};

/// Column both inputs must carry, by exact name
pub const KEY_COLUMN: &str = "SKU";

/// Suffixes applied to non-key columns whose names occur in both inputs
const LEFT_SUFFIX: &str = "_input_file1";
const RIGHT_SUFFIX: &str = "_input_file2";

pub const MISSING_KEY_MESSAGE: &str = "Both files must contain an \"SKU\" column";

/// Comparison use case: sort both tables by the key column and outer-join them
pub struct ComparisonUseCase;

impl ComparisonUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Merge the two tables into a single comparison table.
    ///
    /// Output rows are ordered by key ascending. Per key, left rows appear in
    /// their post-sort order, each expanded against right rows in theirs.
    pub fn execute(&self, left: Table, right: Table) -> Result<Table> {
        let (left_key, right_key) = match (
            left.column_index(KEY_COLUMN),
            right.column_index(KEY_COLUMN),
        ) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(AppError::ValidationError(MISSING_KEY_MESSAGE.to_string())),
        };

        let left = left.sorted_by_column(left_key);
        let right = right.sorted_by_column(right_key);

        Ok(outer_join(&left, left_key, &right, right_key))
    }
}

impl Default for ComparisonUseCase {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-key column indexes of a table, in header order.
fn value_columns(table: &Table, key: usize) -> Vec<usize> {
    (0..table.column_count()).filter(|&c| c != key).collect()
}

/// Headers for the joined table: the key first, then each side's remaining
/// columns. Names occurring on both sides get the side suffix.
fn joined_headers(
    left: &Table,
    left_cols: &[usize],
    right: &Table,
    right_cols: &[usize],
) -> Vec<String> {
    let right_names: Vec<&String> = right_cols.iter().map(|&c| &right.headers()[c]).collect();

    let mut headers = Vec::with_capacity(1 + left_cols.len() + right_cols.len());
    headers.push(KEY_COLUMN.to_string());

    for &c in left_cols {
        let name = &left.headers()[c];
        if right_names.contains(&name) {
            headers.push(format!("{}{}", name, LEFT_SUFFIX));
        } else {
            headers.push(name.clone());
        }
    }
    for &c in right_cols {
        let name = &right.headers()[c];
        if left_cols.iter().any(|&lc| &left.headers()[lc] == name) {
            headers.push(format!("{}{}", name, RIGHT_SUFFIX));
        } else {
            headers.push(name.clone());
        }
    }

    headers
}

/// One output row: key, then left-side cells (or empties), then right-side.
fn joined_row(
    key: CellValue,
    left: Option<(&Table, usize, &[usize])>,
    right: Option<(&Table, usize, &[usize])>,
    left_width: usize,
    right_width: usize,
) -> Vec<CellValue> {
    let mut row = Vec::with_capacity(1 + left_width + right_width);
    row.push(key);

    match left {
        Some((table, r, cols)) => row.extend(cols.iter().map(|&c| table.cell(r, c))),
        None => row.extend(std::iter::repeat(CellValue::Empty).take(left_width)),
    }
    match right {
        Some((table, r, cols)) => row.extend(cols.iter().map(|&c| table.cell(r, c))),
        None => row.extend(std::iter::repeat(CellValue::Empty).take(right_width)),
    }

    row
}

/// Length of the run of rows starting at `from` whose key equals the key at
/// `from`. Both inputs are sorted, so equal keys are adjacent.
fn key_run(table: &Table, key_col: usize, from: usize) -> usize {
    let key = table.cell(from, key_col);
    let mut end = from + 1;
    while end < table.row_count() && table.cell(end, key_col).key_eq(&key) {
        end += 1;
    }
    end - from
}

/// Full outer join of two key-sorted tables.
fn outer_join(left: &Table, left_key: usize, right: &Table, right_key: usize) -> Table {
    let left_cols = value_columns(left, left_key);
    let right_cols = value_columns(right, right_key);
    let headers = joined_headers(left, &left_cols, right, &right_cols);

    let mut rows = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < left.row_count() || j < right.row_count() {
        let order = if i >= left.row_count() {
            Ordering::Greater
        } else if j >= right.row_count() {
            Ordering::Less
        } else {
            left.cell(i, left_key).key_cmp(&right.cell(j, right_key))
        };

        match order {
            Ordering::Less => {
                rows.push(joined_row(
                    left.cell(i, left_key),
                    Some((left, i, &left_cols)),
                    None,
                    left_cols.len(),
                    right_cols.len(),
                ));
                i += 1;
            }
            Ordering::Greater => {
                rows.push(joined_row(
                    right.cell(j, right_key),
                    None,
                    Some((right, j, &right_cols)),
                    left_cols.len(),
                    right_cols.len(),
                ));
                j += 1;
            }
            Ordering::Equal => {
                // Cartesian expansion of the matching key runs
                let left_run = key_run(left, left_key, i);
                let right_run = key_run(right, right_key, j);
                for li in i..i + left_run {
                    for rj in j..j + right_run {
                        rows.push(joined_row(
                            left.cell(li, left_key),
                            Some((left, li, &left_cols)),
                            Some((right, rj, &right_cols)),
                            left_cols.len(),
                            right_cols.len(),
                        ));
                    }
                }
                i += left_run;
                j += right_run;
            }
        }
    }

    Table::new(headers, rows)
}
