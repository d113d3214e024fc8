pub mod classify;
pub mod record;
pub mod values;

use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::model::{Extraction, RowFailure};
use crate::ocr::{Document, Page};
use crate::period::ReportPeriod;
use classify::is_stat_line;
use record::build_record;

/// Turn every stat line of a page into a record.
///
/// A line that fails to parse is recorded as a failure and does not stop the
/// rest of the page. A page without stat lines yields nothing.
pub fn parse_page(
    page: &Page,
    period: &ReportPeriod,
    config: &ExtractionConfig,
    extraction: &mut Extraction,
) {
    for (i, line) in page.lines(config).iter().enumerate() {
        if !is_stat_line(line, config) {
            continue;
        }

        match build_record(line, period, &page.source, Some(page.number)) {
            Ok(record) => {
                debug!(page = page.number, line = i, name = %record.name, "parsed stat line");
                extraction.records.push(record);
            }
            Err(e) => {
                warn!(page = page.number, line = i, error = %e, "skipping stat line");
                extraction.failures.push(RowFailure {
                    page: Some(page.number),
                    row: i,
                    text: line.text(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Parse every page of an OCR'd document into statistic records.
pub fn parse_document(
    document: &Document,
    period: &ReportPeriod,
    config: &ExtractionConfig,
) -> Extraction {
    let mut extraction = Extraction::default();
    for page in &document.pages {
        parse_page(page, period, config, &mut extraction);
    }

    info!(
        source = %document.source,
        pages = document.pages.len(),
        records = extraction.records.len(),
        failures = extraction.failures.len(),
        "parsed document"
    );
    extraction
}
