pub mod lines;
pub mod stats;
pub mod table;

use infestation_core::error::InfestationError;
use infestation_core::model::RowFailure;
use infestation_core::period::ReportPeriod;
use std::path::Path;

/// Period from the `--period` flag, else from the input's file name.
pub fn resolve_period(flag: Option<&str>, input: &Path) -> Result<ReportPeriod, InfestationError> {
    match flag {
        Some(raw) => raw.parse(),
        None => ReportPeriod::from_file_name(input),
    }
}

pub fn report_failures(failures: &[RowFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("{} row(s) skipped during parsing", failures.len());
    for failure in failures {
        eprintln!("  warning: {failure}");
    }
}
