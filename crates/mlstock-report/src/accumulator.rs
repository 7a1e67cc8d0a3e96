use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use mlstock_core::InventoryRecord;

use crate::error::ReportError;
use crate::period::ReportPeriod;
use crate::table::MonthlyTable;
use crate::workbook::{read_table, write_table};

/// Folds each run's records into the workbook for the run's month.
#[derive(Debug, Clone)]
pub struct ReportAccumulator {
    reports_dir: PathBuf,
}

impl ReportAccumulator {
    #[must_use]
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    #[must_use]
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Workbook that holds `date`'s column.
    #[must_use]
    pub fn workbook_path(&self, date: NaiveDate) -> PathBuf {
        ReportPeriod::from_date(date).workbook_path(&self.reports_dir)
    }

    /// Reads the stored table for `date`'s month and merges `records` into
    /// the column for `date`'s day, without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if a stored workbook exists but cannot be read.
    pub fn merged_table(
        &self,
        date: NaiveDate,
        records: &[InventoryRecord],
    ) -> Result<MonthlyTable, ReportError> {
        let period = ReportPeriod::from_date(date);
        let path = period.workbook_path(&self.reports_dir);
        let mut table = read_table(&path, period)?;
        table.merge_day(date.day(), records)?;
        Ok(table)
    }

    /// Read-merge-write for one run. Returns the workbook path.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the stored workbook cannot be read or the
    /// updated one cannot be written.
    pub fn record_day(
        &self,
        date: NaiveDate,
        records: &[InventoryRecord],
    ) -> Result<PathBuf, ReportError> {
        let path = self.workbook_path(date);
        let table = self.merged_table(date, records)?;
        write_table(&path, &table)?;

        tracing::info!(
            path = %path.display(),
            day = date.day(),
            rows = table.rows().len(),
            "monthly report written"
        );
        Ok(path)
    }
}
