//! `ordia select` — draw the audit sample from the BI extract.

use std::path::Path;

use serde::Serialize;

use ordia_recon::{sampler, ReconError, RunMeta};
use ordia_report::{chart, format, html};

use crate::table_print;
use crate::CliError;

#[derive(Debug, Serialize)]
struct SelectSummary<'a> {
    meta: &'a RunMeta,
    rows: usize,
    total: f64,
    warnings: &'a [String],
    table_path: Option<String>,
    report_path: String,
}

pub fn cmd_select(config_path: &Path, json: bool, quiet: bool) -> Result<(), CliError> {
    let (job, base_dir) = crate::load_job(config_path)?;
    let cfg = job
        .select
        .clone()
        .ok_or_else(|| CliError::config("job file has no [select] section"))?;

    let source_path = base_dir.join(&cfg.source);
    let source = ordia_io::load_table(&source_path)
        .map_err(|e| CliError::parse(format!("cannot load {}: {e}", source_path.display())))?;

    let selection = sampler::select(
        &source,
        &job.columns.value,
        cfg.top_n,
        cfg.bottom_n,
        cfg.random_n,
        cfg.seed,
    )
    .map_err(CliError::from_engine)?;

    if !quiet {
        for warning in &selection.warnings {
            eprintln!("warning: {warning}");
        }
    }

    let meta = RunMeta::now(&job.name);

    // The tabular artifact is written before the report so a rendering
    // failure cannot take it down.
    let mut table_path = None;
    if let Some(ref name) = cfg.output.table {
        let path = base_dir.join(name);
        ordia_io::save_table(&selection.table, &path)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
        table_path = Some(path.display().to_string());
    }

    // Chart series: key column as categories, value column as heights, same
    // order as the table.
    let key_col = selection
        .table
        .column_index(&job.columns.key)
        .ok_or_else(|| {
            CliError::from_engine(ReconError::MissingColumn {
                table: "source".into(),
                column: job.columns.key.clone(),
            })
        })?;
    let value_col = selection
        .table
        .column_index(&job.columns.value)
        .ok_or_else(|| {
            CliError::from_engine(ReconError::MissingColumn {
                table: "source".into(),
                column: job.columns.value.clone(),
            })
        })?;

    let categories: Vec<String> = selection
        .table
        .rows()
        .iter()
        .map(|row| row[key_col].canonical_key())
        .collect();
    let values: Vec<f64> = selection
        .table
        .rows()
        .iter()
        .map(|row| row[value_col].as_number().unwrap_or(0.0))
        .collect();

    let png = chart::render_bar_chart(
        "Total billing per selected service order",
        &job.columns.key,
        &format!("{} ({})", job.columns.value, format::CURRENCY_SYMBOL),
        &categories,
        &values,
    )
    .map_err(CliError::render)?;

    let document = html::selection_document(&meta, &selection.table, selection.total, &chart::to_data_uri(&png));
    let report_path = base_dir.join(&cfg.output.report);
    std::fs::write(&report_path, document)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", report_path.display())))?;
    if !quiet {
        eprintln!("wrote {}", report_path.display());
    }

    if json {
        let summary = SelectSummary {
            meta: &meta,
            rows: selection.table.len(),
            total: selection.total,
            warnings: &selection.warnings,
            table_path,
            report_path: report_path.display().to_string(),
        };
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::render(format!("JSON serialization error: {e}")))?;
        println!("{rendered}");
    } else if !quiet {
        print!("{}", table_print::render(&selection.table));
        println!(
            "\nsum of '{}' over the selection: {}",
            job.columns.value,
            format::currency(selection.total)
        );
    }

    Ok(())
}
