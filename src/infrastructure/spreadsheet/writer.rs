use std::path::Path;
use umya_spreadsheet::{new_file, writer, Spreadsheet};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Table};

const SHEET_NAME: &str = "Sheet1";

/// Serialize a table into a new workbook at the given path:
/// header row first, then data rows.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let book = build_workbook(table)?;
    writer::xlsx::write(&book, path)
        .map_err(|e| AppError::IoError(format!("Failed to write workbook: {}", e)))
}

fn build_workbook(table: &Table) -> Result<Spreadsheet> {
    let mut book = new_file();

    if book.get_sheet_by_name(SHEET_NAME).is_none() {
        let _ = book.new_sheet(SHEET_NAME);
    }
    let sheet = book
        .get_sheet_by_name_mut(SHEET_NAME)
        .ok_or_else(|| AppError::Internal("Worksheet missing after creation".to_string()))?;

    for (col_idx, header) in table.headers().iter().enumerate() {
        sheet
            .get_cell_mut(((col_idx + 1) as u32, 1))
            .set_value(header);
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = (row_idx + 2) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let cell_ref = sheet.get_cell_mut(((col_idx + 1) as u32, row_num));
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    cell_ref.set_value(s);
                }
                CellValue::Number(n) => {
                    cell_ref.set_value_number(*n);
                }
                CellValue::Bool(b) => {
                    cell_ref.set_value_bool(*b);
                }
                CellValue::DateTime(s) => {
                    cell_ref.set_value(s);
                }
            }
        }
    }

    Ok(book)
}

/// Workbook bytes for a table, for building uploads in tests.
#[cfg(test)]
pub(crate) fn workbook_bytes(table: &Table) -> Result<Vec<u8>> {
    let book = build_workbook(table)?;
    let mut cursor = std::io::Cursor::new(Vec::new());
    writer::xlsx::write_writer(&book, &mut cursor)
        .map_err(|e| AppError::IoError(format!("Failed to write workbook: {}", e)))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::spreadsheet::read_workbook;

    fn sample_table() -> Table {
        Table::new(
            vec!["SKU".to_string(), "Name".to_string(), "Price".to_string()],
            vec![
                vec![
                    CellValue::Number(1.0),
                    CellValue::Text("x".to_string()),
                    CellValue::Number(10.0),
                ],
                vec![
                    CellValue::Number(2.0),
                    CellValue::Empty,
                    CellValue::Number(20.0),
                ],
            ],
        )
    }

    #[test]
    fn test_written_file_round_trips() {
        let dir = std::env::temp_dir().join(format!("sheetjoin_writer_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("round_trip.xlsx");

        let table = sample_table();
        write_table(&table, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let parsed = read_workbook(&bytes).unwrap();
        assert_eq!(parsed, table);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_workbook_bytes_match_file_content() {
        let table = sample_table();
        let bytes = workbook_bytes(&table).unwrap();
        let parsed = read_workbook(&bytes).unwrap();
        assert_eq!(parsed, table);
    }
}
