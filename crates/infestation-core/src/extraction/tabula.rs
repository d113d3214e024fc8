use crate::error::InfestationError;
use crate::extraction::{read_table_csv, TableExtractor};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Table extraction backend using tabula-java.
///
/// Runs `java -jar tabula.jar --pages all --format CSV` and reads the CSV it
/// writes to stdout.
pub struct TabulaExtractor {
    jar: PathBuf,
}

impl TabulaExtractor {
    pub fn new(jar: impl Into<PathBuf>) -> Self {
        TabulaExtractor { jar: jar.into() }
    }

    /// Check if a Java runtime is available on the system.
    pub fn is_available() -> bool {
        Command::new("java")
            .arg("-version")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn command(&self, pdf_path: &std::path::Path) -> Command {
        let mut cmd = Command::new("java");
        cmd.arg("-jar")
            .arg(&self.jar)
            .args(["--pages", "all", "--silent", "--format", "CSV"])
            .arg(pdf_path);
        cmd
    }
}

impl TableExtractor for TabulaExtractor {
    fn extract_rows(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<String>>, InfestationError> {
        // Write PDF bytes to a temp file
        let mut tmpfile = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| InfestationError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| InfestationError::Extraction(e.to_string()))?;

        let output = self.command(tmpfile.path()).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InfestationError::TabulaNotFound
            } else {
                InfestationError::Extraction(format!("tabula failed: {e}"))
            }
        })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(InfestationError::TabulaFailed { code, stderr });
        }

        read_table_csv(output.stdout.as_slice())
    }

    fn backend_name(&self) -> &str {
        "tabula"
    }
}
