use crate::error::InfestationError;
use crate::model::{StatisticRecord, VALUE_COLUMNS};
use crate::ocr::lines::Line;
use crate::parsing::values::parse_value;
use crate::period::ReportPeriod;

/// Build a record from a stat line: every word but the last four is the
/// name, the last four are the value columns.
pub fn build_record(
    line: &Line<'_>,
    period: &ReportPeriod,
    source: &str,
    page: Option<u32>,
) -> Result<StatisticRecord, InfestationError> {
    let texts = line.word_texts();
    if texts.len() <= VALUE_COLUMNS {
        return Err(InfestationError::mismatch(
            line.text(),
            VALUE_COLUMNS + 1,
            &texts,
        ));
    }

    let (name, raw_values) = texts.split_at(texts.len() - VALUE_COLUMNS);
    let mut values = [0.0; VALUE_COLUMNS];
    for (slot, raw) in values.iter_mut().zip(raw_values) {
        *slot = parse_value(raw)?;
    }

    Ok(StatisticRecord {
        name: name.join(" "),
        per_30_days_rate: period.per_30_days(values[0])?,
        period_end: period.end,
        period_start: period.start,
        values,
        source: source.to_string(),
        page,
    })
}
