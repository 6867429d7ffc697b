// File I/O for Ordia tables - CSV/TSV and Excel

pub mod csv;
pub mod xlsx;

use std::path::Path;

use ordia_core::Table;

/// Load a table, dispatching on the file extension: `csv`/`txt` and `tsv`
/// go through the CSV reader, everything else through calamine (xlsx, xls,
/// xlsb, ods).
pub fn load_table(path: &Path) -> Result<Table, String> {
    match extension(path).as_deref() {
        Some("csv") | Some("txt") => csv::import(path),
        Some("tsv") => csv::import_tsv(path),
        _ => xlsx::import(path),
    }
}

/// Write a table, dispatching on the file extension: `csv`/`tsv` through
/// the CSV writer, everything else as XLSX.
pub fn save_table(table: &Table, path: &Path) -> Result<(), String> {
    match extension(path).as_deref() {
        Some("csv") => csv::export(table, path),
        Some("tsv") => csv::export_tsv(table, path),
        _ => xlsx::export(table, path),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
