pub mod config;
pub mod error;
pub mod extraction;
pub mod geometry;
pub mod model;
pub mod ocr;
pub mod parsing;
pub mod period;
pub mod table;

use config::ExtractionConfig;
use error::InfestationError;
use extraction::TableExtractor;
use model::{Extraction, RowFailure};
use ocr::Document;
use period::ReportPeriod;
use table::TableDocument;
use tracing::{debug, warn};

/// Anything that can be turned into a list of statistic records for a period.
///
/// Both the OCR geometry path and the table-text path implement this, so
/// callers can treat a report the same way whichever form it arrived in.
pub trait StatisticSource {
    /// Where the data came from (file name), carried into every record.
    fn source_name(&self) -> &str;

    /// Extract records for the given reporting period.
    ///
    /// Rows that fail are collected in [`Extraction::failures`]; an error is
    /// only returned when nothing sensible can be extracted at all.
    fn extract_statistics(
        &self,
        period: &ReportPeriod,
        config: &ExtractionConfig,
    ) -> Result<Extraction, InfestationError>;
}

impl StatisticSource for Document {
    fn source_name(&self) -> &str {
        &self.source
    }

    fn extract_statistics(
        &self,
        period: &ReportPeriod,
        config: &ExtractionConfig,
    ) -> Result<Extraction, InfestationError> {
        Ok(parsing::parse_document(self, period, config))
    }
}

impl StatisticSource for TableDocument {
    fn source_name(&self) -> &str {
        &self.source
    }

    fn extract_statistics(
        &self,
        period: &ReportPeriod,
        config: &ExtractionConfig,
    ) -> Result<Extraction, InfestationError> {
        let parsed = self.parse(config);
        let mut extraction = Extraction {
            records: Vec::with_capacity(parsed.rows.len()),
            failures: parsed.failures,
        };

        for row in &parsed.rows {
            match row.to_statistic(period, &self.source) {
                Ok(record) => extraction.records.push(record),
                Err(e) => {
                    warn!(row = row.position, error = %e, "skipping table row");
                    extraction.failures.push(RowFailure {
                        page: None,
                        row: row.position,
                        text: row.label().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(extraction)
    }
}

/// Main API entry point for the table-text path: dump the PDF's tables with
/// the given backend and read the result as a table document.
pub fn extract_table(
    pdf_bytes: &[u8],
    extractor: &dyn TableExtractor,
    source: &str,
    config: &ExtractionConfig,
) -> Result<TableDocument, InfestationError> {
    let rows = extractor.extract_rows(pdf_bytes)?;
    debug!(
        backend = extractor.backend_name(),
        rows = rows.len(),
        "extracted table text"
    );
    TableDocument::from_rows(source, rows, config)
}
