use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InfestationError;
use crate::period::ReportPeriod;

/// Number of numeric columns in every table row.
pub const VALUE_COLUMNS: usize = 4;

/// One row of incidence counts, normalized to a 30-day rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticRecord {
    pub name: String,
    pub per_30_days_rate: f64,
    /// Report end date, the record's temporal key.
    #[serde(rename = "measured")]
    pub period_end: NaiveDate,
    pub period_start: NaiveDate,
    /// All four numeric columns; the first is the current-period count.
    pub values: [f64; VALUE_COLUMNS],
    /// Source document the row was read from.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl StatisticRecord {
    /// Current-period count the rate is computed from.
    pub fn value_for_period(&self) -> f64 {
        self.values[0]
    }

    pub fn period(&self) -> ReportPeriod {
        ReportPeriod::new(self.period_start, self.period_end)
    }
}

/// A repaired row of the table-text dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRow {
    /// Position of the row in the table dump.
    #[serde(default)]
    pub position: usize,
    pub index: u32,
    /// Set for top-level categories, `None` for sub-entries.
    pub name: Option<String>,
    /// The total marker for top-level rows, the entry's own name otherwise.
    pub subcategory: String,
    /// Count and incidence for this year, then for last year.
    pub values: [f64; VALUE_COLUMNS],
    pub this_year: String,
    pub last_year: String,
    /// The value columns were split by the last-resort heuristic.
    #[serde(default)]
    pub needs_review: bool,
}

impl DiseaseRow {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.subcategory)
    }

    pub fn to_statistic(
        &self,
        period: &ReportPeriod,
        source: &str,
    ) -> Result<StatisticRecord, InfestationError> {
        Ok(StatisticRecord {
            name: self.label().to_string(),
            per_30_days_rate: period.per_30_days(self.values[0])?,
            period_end: period.end,
            period_start: period.start,
            values: self.values,
            source: source.to_string(),
            page: None,
        })
    }
}

/// A row or line that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Line or row position within its page or table.
    pub row: usize,
    pub text: String,
    pub reason: String,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "page {page}, row {}: {} ({})", self.row, self.reason, self.text),
            None => write!(f, "row {}: {} ({})", self.row, self.reason, self.text),
        }
    }
}

/// Records from one source plus the rows that failed along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub records: Vec<StatisticRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RowFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: Option<&str>, subcategory: &str) -> DiseaseRow {
        DiseaseRow {
            position: 7,
            index: 4,
            name: name.map(str::to_string),
            subcategory: subcategory.into(),
            values: [12.0, 3.4, 5.0, 6.7],
            this_year: "2018".into(),
            last_year: "2017".into(),
            needs_review: false,
        }
    }

    #[test]
    fn test_label_prefers_name() {
        assert_eq!(row(Some("Cholera"), "razem").label(), "Cholera");
        assert_eq!(row(None, "u dzieci").label(), "u dzieci");
    }

    #[test]
    fn test_to_statistic_rate_round_trips() {
        let period: ReportPeriod = "01.10.2018-15.10.2018".parse().unwrap();
        let record = row(Some("Cholera"), "razem")
            .to_statistic(&period, "report.csv")
            .unwrap();

        assert_eq!(record.value_for_period(), 12.0);
        let recomputed = record.period().per_30_days(record.value_for_period()).unwrap();
        assert!((recomputed - record.per_30_days_rate).abs() < 1e-9);
        assert!((record.per_30_days_rate - 25.714285714285715).abs() < 1e-9);
    }

    #[test]
    fn test_record_serializes_measured_date() {
        let period: ReportPeriod = "01.01.2018-31.01.2018".parse().unwrap();
        let record = row(Some("Odra"), "razem").to_statistic(&period, "x").unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["measured"], "2018-01-31");
        assert!(json.get("page").is_none());
    }
}
