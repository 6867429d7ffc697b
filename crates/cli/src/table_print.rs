//! Plain-text table rendering for terminal output.

use ordia_core::{Table, Value};
use ordia_report::format;

/// Space-aligned rendering of a table, header first, numbers formatted the
/// same way the HTML report formats them.
pub fn render(table: &Table) -> String {
    let header: Vec<String> = table.columns().to_vec();
    let body: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|c| c.chars().count()).collect();
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Number(n) => format::number(*n),
        other => other.to_string(),
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let pad = widths[i].saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
