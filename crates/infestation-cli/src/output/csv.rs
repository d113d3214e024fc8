use infestation_core::error::InfestationError;
use infestation_core::model::{DiseaseRow, StatisticRecord};
use std::io::Write;

/// Repaired table rows; the period labels double as value column headers.
pub fn write_rows<W: Write>(
    rows: &[DiseaseRow],
    this_year: &str,
    last_year: &str,
    writer: W,
) -> Result<(), InfestationError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "id",
        "Sickness",
        "Subcategory",
        this_year,
        this_year,
        last_year,
        last_year,
    ])?;

    for row in rows {
        let mut record = vec![
            row.index.to_string(),
            row.name.clone().unwrap_or_default(),
            row.subcategory.clone(),
        ];
        record.extend(row.values.iter().map(f64::to_string));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_records<W: Write>(records: &[StatisticRecord], writer: W) -> Result<(), InfestationError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "name",
        "measured",
        "period_start",
        "per_30_days_rate",
        "value_1",
        "value_2",
        "value_3",
        "value_4",
        "source",
        "page",
    ])?;

    for r in records {
        let mut record = vec![
            r.name.clone(),
            r.period_end.to_string(),
            r.period_start.to_string(),
            format!("{:.4}", r.per_30_days_rate),
        ];
        record.extend(r.values.iter().map(f64::to_string));
        record.push(r.source.clone());
        record.push(r.page.map(|p| p.to_string()).unwrap_or_default());
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
