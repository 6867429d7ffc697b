use ordia_core::{Table, Value};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Run metadata
// ---------------------------------------------------------------------------

/// Provenance attached to every run artifact.
#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub job_name: String,
    pub engine_version: String,
    pub run_at: String,
}

impl RunMeta {
    pub fn now(job_name: &str) -> Self {
        Self {
            job_name: job_name.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Output of the sampling pass: the chosen rows, ordered by the value column
/// descending, plus the value sum over exactly those rows.
#[derive(Debug)]
pub struct Selection {
    pub table: Table,
    pub total: f64,
    /// Non-fatal conditions (an empty source extract). The run continues;
    /// the caller decides how loudly to surface these.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// One reference row joined against the candidate extract.
///
/// `difference` is `None`, never zero, when the key was not found or when
/// either side's value is missing; subtraction over an absent value has no
/// result.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub key: String,
    pub left_value: Value,
    pub right_value: Value,
    pub found: bool,
    pub equal: bool,
    pub difference: Option<f64>,
}

/// Column positions of the fixed fields inside `Comparison::table`.
/// Renderers use these instead of re-deriving column names.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutputLayout {
    pub key: usize,
    pub left_value: usize,
    pub right_value: usize,
    pub equal: usize,
    pub difference: usize,
    pub found: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompareSummary {
    pub total_rows: usize,
    pub equal: usize,
    pub differing: usize,
    pub not_found: usize,
}

#[derive(Debug)]
pub struct Comparison {
    /// One entry per reference row, reference order.
    pub rows: Vec<ComparisonRow>,
    /// The rendered output table: key, both values, derived fields, then the
    /// untouched extra reference columns.
    pub table: Table,
    pub layout: OutputLayout,
    pub summary: CompareSummary,
    pub warnings: Vec<String>,
}
