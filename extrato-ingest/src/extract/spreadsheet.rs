//! Spreadsheet decoding: CSV via the csv crate, xlsx/xls via calamine.
//! The first row (or CSV header record) becomes the column names.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{ExtractError, ExtractResult};
use crate::types::TableContent;

/// Decode CSV bytes into ordered rows with named columns.
pub fn csv_to_table(bytes: &[u8]) -> ExtractResult<TableContent> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| ExtractError::Spreadsheet(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExtractError::Spreadsheet(e.to_string()))?;
        rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }

    Ok(TableContent { headers, rows })
}

/// Decode the first sheet of an xlsx/xls workbook.
pub fn workbook_to_table(bytes: &[u8]) -> ExtractResult<TableContent> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| ExtractError::Spreadsheet(e.to_string()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ExtractError::Spreadsheet("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| ExtractError::Spreadsheet(e.to_string()))?;

    let mut rows_iter = range.rows();
    let headers = rows_iter
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let rows = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(TableContent { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_headers_and_rows() {
        let table = csv_to_table(b"Data,Valor,Historico\n10/01/2025,\"100,50\",Deposito\n").unwrap();
        assert_eq!(table.headers, vec!["Data", "Valor", "Historico"]);
        assert_eq!(table.rows, vec![vec!["10/01/2025", "100,50", "Deposito"]]);
    }

    #[test]
    fn test_csv_tolerates_ragged_rows() {
        let table = csv_to_table(b"a,b,c\n1,2\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn test_csv_trims_cells() {
        let table = csv_to_table(b"Data , Valor\n 2025-01-10 , -45.00 \n").unwrap();
        assert_eq!(table.headers, vec!["Data", "Valor"]);
        assert_eq!(table.rows[0], vec!["2025-01-10", "-45.00"]);
    }

    #[test]
    fn test_workbook_garbage_is_spreadsheet_error() {
        let err = workbook_to_table(b"not a workbook").unwrap_err();
        assert!(matches!(err, ExtractError::Spreadsheet(_)));
    }
}
