//! In-memory monthly table and the daily outer merge.

use std::collections::{HashMap, HashSet};

use mlstock_core::InventoryRecord;

use crate::error::ReportError;
use crate::period::ReportPeriod;

pub const SKU_HEADER: &str = "SKU";
pub const PRODUCT_HEADER: &str = "Producto";
pub const BRAND_HEADER: &str = "Marca";
/// Number of identity columns preceding the day columns.
pub const IDENTITY_COLUMNS: usize = 3;

/// The triple a row is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowIdentity {
    pub sku: String,
    pub product: String,
    pub brand: String,
}

impl From<&InventoryRecord> for RowIdentity {
    /// Identity text is trimmed; the workbook keeps it verbatim, so
    /// padding would otherwise split one listing over several rows.
    fn from(record: &InventoryRecord) -> Self {
        Self {
            sku: record.key.trim().to_string(),
            product: record.product.trim().to_string(),
            brand: record.brand.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRow {
    pub identity: RowIdentity,
    /// One cell per day of the month; index 0 is day 1. Blank is `""`.
    pub days: Vec<String>,
}

impl MonthlyRow {
    fn blank(identity: RowIdentity, days_in_month: u32) -> Self {
        Self {
            identity,
            days: vec![String::new(); days_in_month as usize],
        }
    }

    #[must_use]
    pub fn day(&self, day: u32) -> Option<&str> {
        let index = usize::try_from(day).ok()?.checked_sub(1)?;
        self.days.get(index).map(String::as_str)
    }
}

/// One month of stock history: identity columns plus a column for every
/// day of the month, whether or not it holds data yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTable {
    period: ReportPeriod,
    rows: Vec<MonthlyRow>,
}

impl MonthlyTable {
    #[must_use]
    pub fn new(period: ReportPeriod) -> Self {
        Self {
            period,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn period(&self) -> ReportPeriod {
        self.period
    }

    #[must_use]
    pub fn rows(&self) -> &[MonthlyRow] {
        &self.rows
    }

    /// `SKU, Producto, Marca, 1, 2, …, N`.
    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        [SKU_HEADER, PRODUCT_HEADER, BRAND_HEADER]
            .into_iter()
            .map(str::to_string)
            .chain((1..=self.period.days_in_month()).map(|d| d.to_string()))
            .collect()
    }

    #[must_use]
    pub fn row(&self, identity: &RowIdentity) -> Option<&MonthlyRow> {
        self.rows.iter().find(|row| &row.identity == identity)
    }

    /// Adds a stored row, folding it into an existing row with the same
    /// identity. For every day the first non-blank value wins.
    ///
    /// `cells` maps day number to value; days outside the month are ignored.
    pub fn insert_stored(&mut self, identity: RowIdentity, cells: &[(u32, String)]) {
        let days_in_month = self.period.days_in_month();
        let index = match self.rows.iter().position(|row| row.identity == identity) {
            Some(index) => {
                tracing::warn!(
                    sku = %identity.sku,
                    product = %identity.product,
                    "duplicate row in stored sheet; merging"
                );
                index
            }
            None => {
                self.rows.push(MonthlyRow::blank(identity, days_in_month));
                self.rows.len() - 1
            }
        };

        let row = &mut self.rows[index];
        for (day, value) in cells {
            let Some(slot) = usize::try_from(*day)
                .ok()
                .and_then(|d| d.checked_sub(1))
                .and_then(|i| row.days.get_mut(i))
            else {
                continue;
            };
            if slot.is_empty() && !value.is_empty() {
                slot.clone_from(value);
            }
        }
    }

    /// Outer-merges today's records into the table.
    ///
    /// `day`'s column is rebuilt from `records` alone: it is cleared on
    /// every stored row first, then each record writes its cell into the
    /// row with the same identity, or into a new row appended after the
    /// existing ones. Other days are never touched. A row with no record
    /// today and no value left on any day (written only by an earlier run
    /// of the same day under an identity that no longer appears) is
    /// dropped. Row order is otherwise preserved, so merging the same
    /// records twice leaves the table unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDay`] if `day` is not a day of the
    /// table's month.
    pub fn merge_day(&mut self, day: u32, records: &[InventoryRecord]) -> Result<(), ReportError> {
        let days_in_month = self.period.days_in_month();
        if day == 0 || day > days_in_month {
            return Err(ReportError::InvalidDay {
                day,
                days_in_month,
            });
        }
        let column = (day - 1) as usize;

        for row in &mut self.rows {
            row.days[column].clear();
        }

        let mut index: HashMap<RowIdentity, usize> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.identity.clone(), i))
            .collect();
        let mut touched: HashSet<usize> = HashSet::with_capacity(records.len());

        for record in records {
            let identity = RowIdentity::from(record);
            let position = match index.get(&identity) {
                Some(&position) => position,
                None => {
                    self.rows
                        .push(MonthlyRow::blank(identity.clone(), days_in_month));
                    index.insert(identity, self.rows.len() - 1);
                    self.rows.len() - 1
                }
            };
            self.rows[position].days[column] = record.status_cell();
            touched.insert(position);
        }

        let mut position = 0;
        self.rows.retain(|row| {
            let keep = touched.contains(&position) || row.days.iter().any(|v| !v.is_empty());
            position += 1;
            keep
        });

        Ok(())
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
