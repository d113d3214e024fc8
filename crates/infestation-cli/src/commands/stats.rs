use infestation_core::config::ExtractionConfig;
use infestation_core::error::InfestationError;
use infestation_core::ocr::Document;
use infestation_core::StatisticSource;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::commands::{report_failures, resolve_period};
use crate::output;

pub fn run(
    input_file: &Path,
    period: Option<&str>,
    output_format: &str,
    output_file: Option<PathBuf>,
    config: &ExtractionConfig,
) -> Result<(), InfestationError> {
    let period = resolve_period(period, input_file)?;
    let document = Document::load(input_file)?;
    let extraction = document.extract_statistics(&period, config)?;
    info!(
        input = %input_file.display(),
        period = %period,
        records = extraction.records.len(),
        failures = extraction.failures.len(),
        "extracted statistics"
    );

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            output::json::write(&extraction, &path)?;
            eprintln!(
                "Extracted {} record(s), written to {}",
                extraction.records.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&extraction)?,
            "csv" => output::csv::write_records(&extraction.records, std::io::stdout())?,
            _ => output::table::write_records(&extraction.records, std::io::stdout())?,
        },
    }

    report_failures(&extraction.failures);
    Ok(())
}
