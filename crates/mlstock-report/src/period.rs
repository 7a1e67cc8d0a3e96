//! Calendar month a report covers, and where its workbook lives.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Month, NaiveDate};

use crate::error::ReportError;

/// A `(year, month)` pair that is known to be a real calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    year: i32,
    month: Month,
    days: u32,
}

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl ReportPeriod {
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidPeriod`] if `month` is not in `1..=12`
    /// or the year is outside chrono's supported range.
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::from_date)
            .ok_or(ReportError::InvalidPeriod { year, month })
    }

    /// The period containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // Day 28 exists in every month; probe downward from 31.
        let days = (28..=31)
            .rev()
            .find(|&day| date.with_day(day).is_some())
            .unwrap_or(28);
        Self {
            year: date.year(),
            month: MONTHS[date.month0() as usize],
            days,
        }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month.number_from_month()
    }

    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        self.days
    }

    /// Full English month name, used as the worksheet name.
    #[must_use]
    pub fn sheet_name(&self) -> &'static str {
        self.month.name()
    }

    /// `<reports_dir>/<year>/inventory_<year>-<MM>.xlsx`
    #[must_use]
    pub fn workbook_path(&self, reports_dir: &Path) -> PathBuf {
        reports_dir
            .join(self.year.to_string())
            .join(format!("inventory_{}-{:02}.xlsx", self.year, self.month()))
    }
}
