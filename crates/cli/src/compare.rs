//! `ordia compare` — reconcile the reference extract against production.

use std::path::Path;

use serde::Serialize;

use ordia_recon::{reconcile, CompareSummary, RunMeta};
use ordia_report::html;

use crate::exit_codes::EXIT_DIFFERENCES;
use crate::CliError;

#[derive(Debug, Serialize)]
struct CompareRunSummary<'a> {
    meta: &'a RunMeta,
    summary: &'a CompareSummary,
    warnings: &'a [String],
    table_path: Option<String>,
    report_path: String,
}

pub fn cmd_compare(config_path: &Path, json: bool, quiet: bool) -> Result<(), CliError> {
    let (job, base_dir) = crate::load_job(config_path)?;
    let cfg = job
        .compare
        .clone()
        .ok_or_else(|| CliError::config("job file has no [compare] section"))?;

    let reference_path = base_dir.join(&cfg.reference);
    let reference = ordia_io::load_table(&reference_path)
        .map_err(|e| CliError::parse(format!("cannot load {}: {e}", reference_path.display())))?;

    let candidate_path = base_dir.join(&cfg.candidate);
    let candidate = ordia_io::load_table(&candidate_path)
        .map_err(|e| CliError::parse(format!("cannot load {}: {e}", candidate_path.display())))?;

    let comparison = reconcile(
        &reference,
        &candidate,
        &job.columns.key,
        &job.columns.value,
        &cfg.reference_label,
        &cfg.candidate_label,
    )
    .map_err(CliError::from_engine)?;

    if !quiet {
        for warning in &comparison.warnings {
            eprintln!("warning: {warning}");
        }
    }

    let meta = RunMeta::now(&job.name);

    // Optional debug artifact, written before the report.
    let mut table_path = None;
    if let Some(ref name) = cfg.output.table {
        let path = base_dir.join(name);
        ordia_io::save_table(&comparison.table, &path)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
        table_path = Some(path.display().to_string());
    }

    let document = html::comparison_document(&meta, &comparison);
    let report_path = base_dir.join(&cfg.output.report);
    std::fs::write(&report_path, document)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", report_path.display())))?;
    if !quiet {
        eprintln!("wrote {}", report_path.display());
    }

    let summary = &comparison.summary;
    if !quiet {
        eprintln!(
            "{} service orders compared — {} equal, {} differing, {} not found",
            summary.total_rows, summary.equal, summary.differing, summary.not_found,
        );
    }

    if json {
        let run_summary = CompareRunSummary {
            meta: &meta,
            summary,
            warnings: &comparison.warnings,
            table_path,
            report_path: report_path.display().to_string(),
        };
        let rendered = serde_json::to_string_pretty(&run_summary)
            .map_err(|e| CliError::render(format!("JSON serialization error: {e}")))?;
        println!("{rendered}");
    }

    // Artifacts are already on disk; the exit code is the verdict.
    if summary.differing + summary.not_found > 0 {
        return Err(CliError {
            code: EXIT_DIFFERENCES,
            message: format!(
                "differences found ({} differing, {} not found)",
                summary.differing, summary.not_found
            ),
            hint: Some(format!("see {}", report_path.display())),
        });
    }

    Ok(())
}
