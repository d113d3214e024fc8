use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::InfestationError;

/// Date format of report periods, e.g. `31.01.2018`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Days every rate is rescaled to.
pub const RATE_WINDOW_DAYS: f64 = 30.0;

pub fn parse_date(raw: &str) -> Result<NaiveDate, InfestationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| InfestationError::DateParse {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

/// The dates a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Period taken from a report file name such as `01.01.2018-31.01.2018.pdf`.
    pub fn from_file_name(path: &Path) -> Result<ReportPeriod, InfestationError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| InfestationError::DateParse {
                raw: path.display().to_string(),
                reason: "file name is not valid UTF-8".into(),
            })?;
        stem.parse()
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Rescale a count for this period to a 30-day window.
    pub fn per_30_days(&self, value: f64) -> Result<f64, InfestationError> {
        let days = self.days();
        if days <= 0 {
            return Err(InfestationError::InvalidPeriod {
                start: self.start,
                end: self.end,
            });
        }
        Ok(value * (RATE_WINDOW_DAYS / days as f64))
    }
}

impl FromStr for ReportPeriod {
    type Err = InfestationError;

    /// Parses `START-END`, both halves in [`DATE_FORMAT`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or_else(|| InfestationError::DateParse {
            raw: s.to_string(),
            reason: "expected START-END".into(),
        })?;
        Ok(ReportPeriod::new(parse_date(start)?, parse_date(end)?))
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_period() {
        let p: ReportPeriod = "01.01.2018-31.01.2018".parse().unwrap();
        assert_eq!(p.start, date(2018, 1, 1));
        assert_eq!(p.end, date(2018, 1, 31));
        assert_eq!(p.days(), 30);
        assert_eq!(p.to_string(), "01.01.2018-31.01.2018");
    }

    #[test]
    fn test_from_file_name() {
        let p = ReportPeriod::from_file_name(Path::new("downloads/16.10.2018-22.10.2018.pdf"))
            .unwrap();
        assert_eq!(p.start, date(2018, 10, 16));
        assert_eq!(p.days(), 6);
    }

    #[test]
    fn test_bad_file_name() {
        assert!(ReportPeriod::from_file_name(Path::new("INF_18_10B.pdf")).is_err());
        assert!("01.13.2018-31.01.2018".parse::<ReportPeriod>().is_err());
    }

    #[test]
    fn test_thirty_day_period_keeps_value() {
        let p = ReportPeriod::new(date(2018, 1, 1), date(2018, 1, 31));
        assert!((p.per_30_days(30.0).unwrap() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_period_scales_up() {
        let p = ReportPeriod::new(date(2018, 10, 16), date(2018, 10, 22));
        assert!((p.per_30_days(6.0).unwrap() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_day_period_is_rejected() {
        let p = ReportPeriod::new(date(2018, 1, 1), date(2018, 1, 1));
        assert!(matches!(
            p.per_30_days(5.0),
            Err(InfestationError::InvalidPeriod { .. })
        ));

        let reversed = ReportPeriod::new(date(2018, 2, 1), date(2018, 1, 1));
        assert!(reversed.per_30_days(5.0).is_err());
    }
}
