//! Self-contained HTML documents for the two pipelines.
//!
//! Everything is inlined (CSS, legend, the chart as a data URI) so a
//! report travels as a single file.

use std::fmt::Write as _;

use ordia_core::{Table, Value};
use ordia_recon::{Comparison, MatchState, RunMeta};

use crate::format;

/// Selection report: summary box with the sample total, embedded bar chart,
/// detail table.
pub fn selection_document(
    meta: &RunMeta,
    table: &Table,
    total: f64,
    chart_uri: &str,
) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<h2>Summary</h2>
<div class="summary-box">
<p>Sum of the selected service orders: <strong>{}</strong></p>
</div>
"#,
        escape(&format::currency(total))
    );

    let _ = write!(
        body,
        r#"<h2>Billing by service order</h2>
<div class="chart-container">
<img src="{chart_uri}" alt="Bar chart of the selected service orders">
</div>
"#
    );

    body.push_str("<h2>Selected service orders</h2>\n");
    body.push_str(&plain_table(table));

    page(&meta.job_name, "Selected service orders", &body, meta)
}

/// Comparison report: styled table with one color per match state plus the
/// legend explaining the three colors.
pub fn comparison_document(meta: &RunMeta, comparison: &Comparison) -> String {
    let mut body = String::new();

    let summary = &comparison.summary;
    let _ = write!(
        body,
        r#"<div class="summary-box">
<p>{} service orders compared — <strong>{}</strong> equal, <strong>{}</strong> differing, <strong>{}</strong> not found</p>
</div>
"#,
        summary.total_rows, summary.equal, summary.differing, summary.not_found
    );

    body.push_str("<table>\n<thead><tr>");
    for column in comparison.table.columns() {
        let _ = write!(body, "<th>{}</th>", escape(column));
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    let layout = comparison.layout;
    for (cells, row) in comparison.table.rows().iter().zip(&comparison.rows) {
        let state = MatchState::of(row);
        body.push_str("<tr>");
        for (col, value) in cells.iter().enumerate() {
            // Only the candidate value and the difference carry the row's
            // color.
            let styled = col == layout.right_value || col == layout.difference;
            let content = if col == layout.difference && row.difference.is_none() && !row.found {
                format::NOT_FOUND_LABEL.to_string()
            } else {
                render_value(value)
            };
            if styled {
                let _ = write!(body, r#"<td class="cell-{}">{content}</td>"#, state.css_class());
            } else {
                let _ = write!(body, "<td>{content}</td>");
            }
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");

    body.push_str(
        r#"<div class="legend">
<h3>Color legend (candidate value / difference)</h3>
<div class="legend-item"><span class="cell-equal"></span> Values equal</div>
<div class="legend-item"><span class="cell-different"></span> Values differ</div>
<div class="legend-item"><span class="cell-not-found"></span> Service order not found / value absent</div>
</div>
"#,
    );

    page(&meta.job_name, "BI vs production comparison", &body, meta)
}

/// A table with no conditional styling, numbers formatted for reading.
fn plain_table(table: &Table) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for column in table.columns() {
        let _ = write!(out, "<th>{}</th>", escape(column));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in table.rows() {
        out.push_str("<tr>");
        for value in row {
            let _ = write!(out, "<td>{}</td>", render_value(value));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Number(n) => format::number(*n),
        Value::Bool(b) => b.to_string(),
        Value::Text(s) => escape(s),
        Value::Missing => String::new(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared document shell. The palette and layout carry over from the
/// original report styling this tool replaces.
fn page(job_name: &str, heading: &str, body: &str, meta: &RunMeta) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
@import url('https://fonts.googleapis.com/css2?family=Open+Sans:wght@400;600&display=swap');
body {{ font-family: 'Open Sans', sans-serif; margin: 0; padding: 20px; background-color: #f4f7f6; color: #333; line-height: 1.6; }}
.container {{ max-width: 95%; margin: 20px auto; padding: 25px; background-color: #fff; box-shadow: 0 4px 12px rgba(0,0,0,0.1); border-radius: 8px; }}
h1 {{ color: #2c3e50; text-align: center; margin-bottom: 30px; border-bottom: 2px solid #1abc9c; padding-bottom: 15px; font-size: 1.8em; }}
h2 {{ color: #34495e; margin-top: 30px; margin-bottom: 15px; font-size: 1.4em; border-bottom: 1px solid #eee; padding-bottom: 5px; }}
table {{ border-collapse: collapse; width: 100%; margin-bottom: 25px; font-size: 0.9em; }}
th {{ background-color: #2c3e50; color: white; font-weight: bold; padding: 10px 8px; text-align: left; border-bottom: 2px solid #1abc9c; }}
td {{ padding: 8px; text-align: left; border: 1px solid #ddd; }}
tr:nth-child(even) {{ background-color: #f8f9fa; }}
.summary-box {{ background-color: #e9ecef; padding: 15px; border-radius: 5px; margin-bottom: 25px; text-align: center; border: 1px solid #ced4da; }}
.summary-box p {{ margin: 5px 0; font-size: 1.1em; }}
.summary-box strong {{ color: #1abc9c; font-size: 1.2em; }}
.chart-container {{ text-align: center; margin-bottom: 25px; padding: 15px; border: 1px solid #eee; border-radius: 5px; background-color: #fdfdfd; }}
.chart-container img {{ max-width: 100%; height: auto; border-radius: 4px; }}
.cell-equal {{ background-color: #c8e6c9; color: #2e7d32; }}
.cell-different {{ background-color: #ffcdd2; color: #c62828; }}
.cell-not-found {{ background-color: #ffe0b2; color: #8d6e63; }}
.legend {{ margin-top: 20px; padding: 15px; background-color: #f9f9f9; border-radius: 5px; border: 1px solid #eee; }}
.legend h3 {{ margin-top: 0; color: #34495e; }}
.legend span {{ display: inline-block; width: 20px; height: 20px; margin-right: 8px; vertical-align: middle; border: 1px solid #ccc; }}
.legend-item {{ margin-bottom: 8px; }}
.footer {{ text-align: center; margin-top: 40px; font-size: 0.9em; color: #7f8c8d; }}
</style>
</head>
<body>
<div class="container">
<h1>{heading} — {title}</h1>
{body}
</div>
<div class="footer">Generated by ordia {version} at {run_at}</div>
</body>
</html>
"#,
        title = escape(job_name),
        heading = escape(heading),
        body = body,
        version = escape(&meta.engine_version),
        run_at = escape(&meta.run_at),
    )
}
