// CSV/TSV import/export

use std::io::Read;
use std::path::Path;

use ordia_core::{Table, Value};

pub fn import(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t')
}

/// Detect the most likely field delimiter by checking consistency across the
/// first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line.
/// The delimiter that produces the most consistent field count (>1 field)
/// wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        // Higher field count breaks ties
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1,
/// etc.), common for Excel-exported CSVs.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(content: &str, delimiter: u8) -> Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(|e| e.to_string())?,
        None => return Err("file contains no header row".to_string()),
    };

    let columns: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
    check_headers(&columns)?;

    let mut table = Table::new(columns);
    for (line, record) in records.enumerate() {
        let record = record.map_err(|e| e.to_string())?;
        if record.len() > table.columns().len() {
            return Err(format!(
                "row {} has {} fields, header has {}",
                line + 2,
                record.len(),
                table.columns().len()
            ));
        }
        table.push_row(record.iter().map(parse_cell).collect());
    }

    Ok(table)
}

fn check_headers(columns: &[String]) -> Result<(), String> {
    for (i, name) in columns.iter().enumerate() {
        if name.is_empty() {
            return Err(format!("header cell {} is empty", i + 1));
        }
        if columns[..i].contains(name) {
            return Err(format!("duplicate column name '{name}'"));
        }
    }
    Ok(())
}

/// Type a raw field: empty → missing, numeric → number, true/false → bool,
/// anything else text.
fn parse_cell(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return Value::Number(n);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::Text(field.to_string())
}

pub fn export(table: &Table, path: &Path) -> Result<(), String> {
    export_with_delimiter(table, path, b',')
}

pub fn export_tsv(table: &Table, path: &Path) -> Result<(), String> {
    export_with_delimiter(table, path, b'\t')
}

fn export_with_delimiter(table: &Table, path: &Path, delimiter: u8) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    writer
        .write_record(table.columns())
        .map_err(|e| e.to_string())?;

    for row in table.rows() {
        let record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "OS;Fat Total;Client\n4501;1500.00;Acme\n4502;980.50;Borealis\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "OS,Fat Total,Client\n4501,1500.00,Acme\n4502,980.50,Borealis\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        // Semicolon delimiter but commas appear inside quoted fields
        let content = "OS;Client\n4501;\"Acme, Ltd\"\n4502;\"Borealis, SA\"\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn typed_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bi.csv");
        fs::write(&path, "OS,Fat Total,Billed\n4501,1500.50,true\n4502,,false\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.columns(), &["OS", "Fat Total", "Billed"]);
        assert_eq!(table.value(0, 0), &Value::Number(4501.0));
        assert_eq!(table.value(0, 1), &Value::Number(1500.5));
        assert_eq!(table.value(0, 2), &Value::Bool(true));
        assert_eq!(table.value(1, 1), &Value::Missing);
    }

    #[test]
    fn short_rows_pad_with_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "OS,Fat Total,Client\n4501,10.0\n").unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.value(0, 2), &Value::Missing);
    }

    #[test]
    fn overlong_rows_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.csv");
        fs::write(&path, "OS,Fat Total\n4501,10.0,stray\n").unwrap();
        assert!(import(&path).is_err());
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dup.csv");
        fs::write(&path, "OS,OS\n1,2\n").unwrap();
        assert!(import(&path).unwrap_err().contains("duplicate column"));
    }

    #[test]
    fn windows_1252_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        // "Serviço" with 0xE7 (ç in Windows-1252), invalid as UTF-8
        let mut bytes = b"OS,Cliente\n4501,Servi".to_vec();
        bytes.push(0xE7);
        bytes.extend_from_slice(b"o\n");
        fs::write(&path, bytes).unwrap();

        let table = import(&path).unwrap();
        assert_eq!(table.value(0, 1), &Value::Text("Servi\u{e7}o".into()));
    }

    #[test]
    fn export_then_import_keeps_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = Table::new(vec!["OS".into(), "Fat Total".into()]);
        table.push_row(vec![Value::Text("4501".into()), Value::Number(1500.5)]);
        table.push_row(vec![Value::Text("4502".into()), Value::Missing]);
        export(&table, &path).unwrap();

        let back = import(&path).unwrap();
        assert_eq!(back.value(0, 1), &Value::Number(1500.5));
        assert_eq!(back.value(1, 1), &Value::Missing);
    }
}
