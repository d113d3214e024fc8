use infestation_core::config::ExtractionConfig;
use infestation_core::error::InfestationError;
use infestation_core::extraction::read_table_csv;
use infestation_core::extraction::tabula::TabulaExtractor;
use infestation_core::period::ReportPeriod;
use infestation_core::table::TableDocument;
use infestation_core::StatisticSource;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::commands::report_failures;
use crate::output;

pub fn run(
    input_file: &Path,
    tabula_jar: Option<PathBuf>,
    period: Option<&str>,
    output_format: &str,
    output_file: Option<PathBuf>,
    config: &ExtractionConfig,
) -> Result<(), InfestationError> {
    let source = input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_file.display().to_string());
    let document = load(input_file, tabula_jar, &source, config)?;

    let mut out: Box<dyn std::io::Write> = match &output_file {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    // With a period the rows become dated records, otherwise print them as repaired
    let failures = match period {
        Some(raw) => {
            let period: ReportPeriod = raw.parse()?;
            let extraction = document.extract_statistics(&period, config)?;
            match output_format {
                "json" => output::json::to_writer(&extraction, &mut out)?,
                "table" => output::table::write_records(&extraction.records, &mut out)?,
                _ => output::csv::write_records(&extraction.records, &mut out)?,
            }
            extraction.failures
        }
        None => {
            let parsed = document.parse(config);
            match output_format {
                "json" => output::json::to_writer(&parsed.rows, &mut out)?,
                "table" => output::table::write_rows(&parsed.rows, &mut out)?,
                _ => output::csv::write_rows(
                    &parsed.rows,
                    &document.this_year,
                    &document.last_year,
                    &mut out,
                )?,
            }
            parsed.failures
        }
    };

    if let Some(path) = &output_file {
        info!(path = %path.display(), "table output written");
        eprintln!("Written to {}", path.display());
    }
    report_failures(&failures);
    Ok(())
}

fn load(
    input_file: &Path,
    tabula_jar: Option<PathBuf>,
    source: &str,
    config: &ExtractionConfig,
) -> Result<TableDocument, InfestationError> {
    let is_csv = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        debug!(input = %input_file.display(), "reading table dump from CSV");
        let rows = read_table_csv(File::open(input_file)?)?;
        return TableDocument::from_rows(source, rows, config);
    }

    let jar = tabula_jar.ok_or_else(|| {
        InfestationError::Extraction("--tabula-jar is required to read PDF input".into())
    })?;
    if !TabulaExtractor::is_available() {
        return Err(InfestationError::TabulaNotFound);
    }
    debug!(input = %input_file.display(), jar = %jar.display(), "running tabula");
    let pdf_bytes = std::fs::read(input_file)?;
    infestation_core::extract_table(&pdf_bytes, &TabulaExtractor::new(jar), source, config)
}
