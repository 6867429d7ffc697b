use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (missing section, zero-size sample, etc.).
    ConfigValidation(String),
    /// Required column absent from an input table. Fatal: nothing is
    /// written once the schema is known to be wrong.
    MissingColumn { table: String, column: String },
    /// Non-numeric cell where the value column requires a number.
    NonNumericValue { table: String, column: String, row: usize },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { table, column } => {
                write!(f, "{table} table: missing column '{column}'")
            }
            Self::NonNumericValue { table, column, row } => {
                write!(f, "{table} table: column '{column}' has a non-numeric value at row {row}")
            }
        }
    }
}

impl std::error::Error for ReconError {}
