use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use std::io::Cursor;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Table};

/// Decode uploaded workbook bytes into a table.
///
/// Takes the first worksheet; its first row is the header row. Any decode
/// failure surfaces as a parse error carrying the decoder's message.
pub fn read_workbook(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AppError::ParseError(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read worksheet range: {}", e)))?;

    let mut rows = range.rows();

    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(header_name).collect(),
        None => Vec::new(),
    };

    let cells = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(Table::new(headers, cells))
}

fn header_name(cell: &Data) -> String {
    cell.as_string()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}", cell))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Excel serial datetimes stay numeric; ISO-formatted ones stay text
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        Data::DurationIso(s) => CellValue::DateTime(s.clone()),
        Data::Error(_) => CellValue::Text(format!("{}", cell)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::spreadsheet::workbook_bytes;

    #[test]
    fn test_rejects_non_workbook_bytes() {
        let err = read_workbook(b"definitely not a spreadsheet").unwrap_err();
        match err {
            AppError::ParseError(msg) => assert!(msg.contains("Failed to open workbook")),
            other => panic!("expected parse error, got {}", other),
        }
    }

    #[test]
    fn test_reads_headers_and_typed_cells() {
        let table = Table::new(
            vec!["SKU".to_string(), "Name".to_string()],
            vec![
                vec![CellValue::Number(1.0), CellValue::Text("x".to_string())],
                vec![CellValue::Number(2.0), CellValue::Empty],
            ],
        );
        let bytes = workbook_bytes(&table).unwrap();

        let parsed = read_workbook(&bytes).unwrap();
        assert_eq!(parsed.headers(), &["SKU", "Name"]);
        assert_eq!(parsed.row_count(), 2);
        assert_eq!(parsed.cell(0, 0), CellValue::Number(1.0));
        assert_eq!(parsed.cell(0, 1), CellValue::Text("x".to_string()));
        assert_eq!(parsed.cell(1, 1), CellValue::Empty);
    }

    #[test]
    fn test_headerless_workbook_parses_to_empty_table() {
        let table = Table::new(vec![], vec![]);
        let bytes = workbook_bytes(&table).unwrap();

        let parsed = read_workbook(&bytes).unwrap();
        assert_eq!(parsed.column_count(), 0);
        assert_eq!(parsed.row_count(), 0);
    }
}
