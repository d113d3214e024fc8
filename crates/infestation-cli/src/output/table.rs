use infestation_core::model::{DiseaseRow, StatisticRecord};
use std::io::{self, Write};

pub fn write_records<W: Write>(records: &[StatisticRecord], mut out: W) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "  No records found.")?;
        return Ok(());
    }

    let max_name = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(10);
    let first = &records[0];
    writeln!(out, "  Period: {}\n", first.period())?;

    for r in records {
        let page = r.page.map(|p| format!("  (p. {p})")).unwrap_or_default();
        writeln!(
            out,
            "  {:<width$}  {:>8}  {:>10.2} / 30 days{}",
            r.name,
            r.value_for_period(),
            r.per_30_days_rate,
            page,
            width = max_name
        )?;
    }
    Ok(())
}

pub fn write_rows<W: Write>(rows: &[DiseaseRow], mut out: W) -> io::Result<()> {
    if rows.is_empty() {
        writeln!(out, "  No rows found.")?;
        return Ok(());
    }

    let first = &rows[0];
    writeln!(out, "  {} vs {}\n", first.this_year, first.last_year)?;

    for row in rows {
        let label = match &row.name {
            Some(name) => format!("{:>3}. {name}", row.index),
            None => format!("       {}", row.subcategory),
        };
        let review = if row.needs_review { " (?)" } else { "" };
        writeln!(
            out,
            "  {:<40}  {:>8} {:>7}  {:>8} {:>7}{}",
            label, row.values[0], row.values[1], row.values[2], row.values[3], review
        )?;
    }
    Ok(())
}
