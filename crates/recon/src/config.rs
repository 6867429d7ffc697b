use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A job file describes one reconciliation run: which extracts to read,
/// which columns matter, where the artifacts go. File paths stay in the job
/// file so the same binary serves every engagement.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub columns: ColumnConfig,
    #[serde(default)]
    pub select: Option<SelectConfig>,
    #[serde(default)]
    pub compare: Option<CompareConfig>,
}

/// The two columns every pipeline needs: the service-order key and the
/// monetary value under comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Select pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SelectConfig {
    /// Source extract, relative to the job file.
    pub source: String,
    #[serde(default)]
    pub top_n: usize,
    #[serde(default)]
    pub bottom_n: usize,
    #[serde(default)]
    pub random_n: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    pub output: OutputConfig,
}

fn default_seed() -> u64 {
    42
}

// ---------------------------------------------------------------------------
// Compare pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CompareConfig {
    /// Reference (left) extract, usually the curated BI selection.
    pub reference: String,
    /// Candidate (right) extract, the production dump being audited.
    pub candidate: String,
    #[serde(default = "default_reference_label")]
    pub reference_label: String,
    #[serde(default = "default_candidate_label")]
    pub candidate_label: String,
    pub output: OutputConfig,
}

fn default_reference_label() -> String {
    "bi".to_string()
}

fn default_candidate_label() -> String {
    "production".to_string()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Optional tabular artifact (xlsx or csv by extension).
    #[serde(default)]
    pub table: Option<String>,
    /// HTML report path.
    pub report: String,
}

// ---------------------------------------------------------------------------
// Parsing + validation
// ---------------------------------------------------------------------------

impl JobConfig {
    pub fn from_toml(s: &str) -> Result<Self, ReconError> {
        let config: JobConfig =
            toml::from_str(s).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ReconError> {
        if self.columns.key.trim().is_empty() {
            return Err(ReconError::ConfigValidation("columns.key is empty".into()));
        }
        if self.columns.value.trim().is_empty() {
            return Err(ReconError::ConfigValidation("columns.value is empty".into()));
        }
        if self.select.is_none() && self.compare.is_none() {
            return Err(ReconError::ConfigValidation(
                "job file needs a [select] or [compare] section".into(),
            ));
        }
        if let Some(ref select) = self.select {
            if select.top_n + select.bottom_n + select.random_n == 0 {
                return Err(ReconError::ConfigValidation(
                    "[select]: top_n + bottom_n + random_n must be at least 1".into(),
                ));
            }
        }
        if let Some(ref compare) = self.compare {
            if compare.reference_label == compare.candidate_label {
                return Err(ReconError::ConfigValidation(format!(
                    "[compare]: reference_label and candidate_label are both \"{}\"",
                    compare.reference_label
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
name = "BI vs production"

[columns]
key = "OS"
value = "Fat Total"

[select]
source = "bi.xlsx"
top_n = 3
bottom_n = 3
random_n = 4
seed = 42

[select.output]
table = "selected.xlsx"
report = "selection.html"

[compare]
reference = "selected.xlsx"
candidate = "production.xlsx"

[compare.output]
report = "comparison.html"
"#;

    #[test]
    fn full_job_parses() {
        let job = JobConfig::from_toml(FULL).unwrap();
        assert_eq!(job.name, "BI vs production");
        let select = job.select.unwrap();
        assert_eq!(select.top_n, 3);
        assert_eq!(select.seed, 42);
        assert_eq!(select.output.table.as_deref(), Some("selected.xlsx"));
        let compare = job.compare.unwrap();
        assert_eq!(compare.reference_label, "bi");
        assert_eq!(compare.candidate_label, "production");
        assert!(compare.output.table.is_none());
    }

    #[test]
    fn seed_defaults_when_omitted() {
        let toml = r#"
name = "t"
[columns]
key = "OS"
value = "Fat Total"
[select]
source = "bi.csv"
top_n = 1
[select.output]
report = "out.html"
"#;
        let job = JobConfig::from_toml(toml).unwrap();
        assert_eq!(job.select.unwrap().seed, 42);
    }

    #[test]
    fn zero_size_sample_is_rejected() {
        let toml = r#"
name = "t"
[columns]
key = "OS"
value = "Fat Total"
[select]
source = "bi.csv"
[select.output]
report = "out.html"
"#;
        let err = JobConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ReconError::ConfigValidation(_)));
    }

    #[test]
    fn missing_pipeline_sections_are_rejected() {
        let toml = r#"
name = "t"
[columns]
key = "OS"
value = "Fat Total"
"#;
        assert!(JobConfig::from_toml(toml).is_err());
    }

    #[test]
    fn colliding_labels_are_rejected() {
        let toml = r#"
name = "t"
[columns]
key = "OS"
value = "Fat Total"
[compare]
reference = "a.csv"
candidate = "b.csv"
reference_label = "x"
candidate_label = "x"
[compare.output]
report = "out.html"
"#;
        assert!(JobConfig::from_toml(toml).is_err());
    }
}
