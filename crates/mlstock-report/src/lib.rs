//! Monthly stock report: one workbook per month, one column per day.
//!
//! [`ReportAccumulator::record_day`] reads the stored month, outer-merges
//! the day's [`InventoryRecord`](mlstock_core::InventoryRecord)s into it and
//! rewrites the workbook with the [`StatusFormatter`] colour rules.

pub mod accumulator;
pub mod error;
pub mod format;
pub mod period;
pub mod table;
pub mod workbook;

pub use accumulator::ReportAccumulator;
pub use error::ReportError;
pub use format::{CellTone, StatusFormatter};
pub use period::ReportPeriod;
pub use table::{MonthlyRow, MonthlyTable, RowIdentity};
pub use workbook::{read_table, write_table};
