// Ordia CLI - batch selection and comparison of service-order billing extracts

mod compare;
mod exit_codes;
mod select;
mod table_print;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{
    EXIT_INVALID_CONFIG, EXIT_IO, EXIT_PARSE, EXIT_RENDER, EXIT_SCHEMA, EXIT_SUCCESS,
};
use ordia_recon::{JobConfig, ReconError};

/// One error shape for every command: exit code, message, optional hint.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_CONFIG, message: message.into(), hint: None }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: message.into(), hint: None }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self { code: EXIT_RENDER, message: message.into(), hint: None }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: message.into(), hint: None }
    }

    pub fn from_engine(err: ReconError) -> Self {
        let code = match err {
            ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
            ReconError::MissingColumn { .. } | ReconError::NonNumericValue { .. } => EXIT_SCHEMA,
        };
        Self { code, message: err.to_string(), hint: None }
    }
}

#[derive(Parser)]
#[command(name = "ordia")]
#[command(about = "Reconcile service-order billing extracts (BI vs production)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the audit sample (largest, smallest, random) from the BI extract
    #[command(after_help = "\
Examples:
  ordia select job.toml
  ordia select job.toml --json
  ordia select job.toml --quiet")]
    Select {
        /// Path to the job file
        config: PathBuf,

        /// Output the run summary as JSON to stdout instead of the table
        #[arg(long)]
        json: bool,

        /// Suppress stderr notes and the terminal table
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Compare the reference extract against the production extract
    #[command(after_help = "\
Examples:
  ordia compare job.toml
  ordia compare job.toml --json
Exit code 1 means the extracts differ.")]
    Compare {
        /// Path to the job file
        config: PathBuf,

        /// Output the run summary as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a job file without running it
    #[command(after_help = "\
Examples:
  ordia validate job.toml")]
    Validate {
        /// Path to the job file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Select { config, json, quiet } => select::cmd_select(&config, json, quiet),
        Commands::Compare { config, json, quiet } => compare::cmd_compare(&config, json, quiet),
        Commands::Validate { config } => cmd_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(ref hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

/// Read and parse a job file. Artifact and extract paths resolve relative
/// to the job file's directory.
pub fn load_job(config_path: &Path) -> Result<(JobConfig, PathBuf), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", config_path.display())))?;
    let job = JobConfig::from_toml(&config_str).map_err(CliError::from_engine)?;
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    Ok((job, base_dir))
}

fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    let (job, _) = load_job(config_path)?;

    let mut pipelines = Vec::new();
    if job.select.is_some() {
        pipelines.push("select");
    }
    if job.compare.is_some() {
        pipelines.push("compare");
    }
    eprintln!(
        "valid: job '{}' with {} (key '{}', value '{}')",
        job.name,
        pipelines.join(" + "),
        job.columns.key,
        job.columns.value,
    );
    Ok(())
}
