// Excel file import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: first sheet only, first row is the header. Extracts are flat
// rectangular tables; formulas arrive as their cached values.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Format, Workbook};

use ordia_core::{Table, Value};

/// Import the first sheet of an Excel file as a table.
pub fn import(path: &Path) -> Result<Table, String> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| format!("Failed to open Excel file: {e}"))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| "Excel file contains no sheets".to_string())?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{sheet_name}': {e}"))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| format!("sheet '{sheet_name}' has no header row"))?;

    let columns: Vec<String> = header
        .iter()
        .map(|cell| match cell {
            Data::String(s) => s.trim().to_string(),
            other => import_cell(other).to_string(),
        })
        .collect();
    check_headers(&sheet_name, &columns)?;

    let mut table = Table::new(columns);
    for row in rows {
        // Calamine pads the range to a rectangle, so width never exceeds
        // the header.
        table.push_row(row.iter().map(import_cell).collect());
    }

    Ok(table)
}

fn check_headers(sheet_name: &str, columns: &[String]) -> Result<(), String> {
    for (i, name) in columns.iter().enumerate() {
        if name.is_empty() {
            return Err(format!("sheet '{sheet_name}': header cell {} is empty", i + 1));
        }
        if columns[..i].contains(name) {
            return Err(format!("sheet '{sheet_name}': duplicate column name '{name}'"));
        }
    }
    Ok(())
}

fn import_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Missing,
        Data::String(s) => {
            if s.is_empty() {
                Value::Missing
            } else {
                Value::Text(s.clone())
            }
        }
        Data::Float(n) => Value::Number(*n),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::Bool(*b),
        // Serial date number; the extracts under comparison carry no date
        // columns that matter, so the raw serial is good enough.
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(_) => Value::Missing,
    }
}

/// Export a table as a single-sheet XLSX: bold header row, `#,##0.00` on
/// numeric cells, blanks for missing values.
pub fn export(table: &Table, path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    let number_format = Format::new().set_num_format("#,##0.00");

    for (col, name) in table.columns().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &header_format)
            .map_err(|e| format!("Failed to write header '{name}': {e}"))?;
    }

    for (row, cells) in table.rows().iter().enumerate() {
        let row_idx = (row + 1) as u32;
        for (col, value) in cells.iter().enumerate() {
            let col_idx = col as u16;
            match value {
                Value::Number(n) => worksheet
                    .write_number_with_format(row_idx, col_idx, *n, &number_format)
                    .map(|_| ()),
                Value::Bool(b) => worksheet.write_boolean(row_idx, col_idx, *b).map(|_| ()),
                Value::Text(s) => worksheet.write_string(row_idx, col_idx, s).map(|_| ()),
                Value::Missing => Ok(()),
            }
            .map_err(|e| format!("Failed to write cell ({row_idx}, {col_idx}): {e}"))?;
        }
    }

    worksheet.autofit();

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {e}"))
}
