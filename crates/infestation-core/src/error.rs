use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InfestationError {
    #[error("row {row}: expected {expected} cells after repair, found {found}: {text}")]
    StructuralMismatch {
        row: String,
        expected: usize,
        found: usize,
        text: String,
    },

    #[error("cannot normalize '{raw}' into a number: {reason}")]
    NumericNormalization { raw: String, reason: String },

    #[error("report period {start} - {end} does not span a positive number of days")]
    InvalidPeriod {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("invalid report date '{raw}': {reason}")]
    DateParse { raw: String, reason: String },

    #[error("malformed document: {0}")]
    DocumentStructure(String),

    #[error("table extraction failed: {0}")]
    Extraction(String),

    #[error("java not found. tabula-java needs a Java runtime: apt install default-jre (Linux) or brew install openjdk (macOS)")]
    TabulaNotFound,

    #[error("tabula failed with exit code {code}: {stderr}")]
    TabulaFailed { code: i32, stderr: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl InfestationError {
    /// Shorthand for a row whose cell count is wrong after repair.
    pub(crate) fn mismatch(row: impl Into<String>, expected: usize, cells: &[String]) -> Self {
        InfestationError::StructuralMismatch {
            row: row.into(),
            expected,
            found: cells.len(),
            text: format!("{cells:?}"),
        }
    }
}
