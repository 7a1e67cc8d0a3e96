//! Reading and writing the monthly `.xlsx` workbook.

use std::fs;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::ReportError;
use crate::format::StatusFormatter;
use crate::period::ReportPeriod;
use crate::table::{MonthlyTable, RowIdentity, BRAND_HEADER, PRODUCT_HEADER, SKU_HEADER};

/// Day 1 sits right after the identity columns.
const FIRST_DAY_COLUMN: u16 = 3;
const PRODUCT_COLUMN_WIDTH: f64 = 48.0;

/// Where each known header sits in a stored sheet.
struct ColumnMap {
    sku: usize,
    product: usize,
    brand: usize,
    days: Vec<(usize, u32)>,
}

/// Loads the month's table from `path`.
///
/// A missing file, or a workbook without the month's sheet, yields an
/// empty table.
///
/// # Errors
///
/// - [`ReportError::Read`] if the file exists but is not a readable workbook.
/// - [`ReportError::MalformedSheet`] if the sheet lacks an identity column.
pub fn read_table(path: &Path, period: ReportPeriod) -> Result<MonthlyTable, ReportError> {
    let mut table = MonthlyTable::new(period);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no workbook yet; starting empty table");
        return Ok(table);
    }

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| ReportError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let sheet = period.sheet_name();
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        tracing::debug!(path = %path.display(), sheet, "month sheet missing; starting empty table");
        return Ok(table);
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ReportError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(table);
    };
    let columns = map_columns(header, period).map_err(|reason| ReportError::MalformedSheet {
        path: path.display().to_string(),
        sheet: sheet.to_string(),
        reason,
    })?;

    for row in rows {
        let text = |index: usize| row.get(index).map(cell_text).unwrap_or_default();
        let identity = RowIdentity {
            sku: text(columns.sku),
            product: text(columns.product),
            brand: text(columns.brand),
        };
        let cells: Vec<(u32, String)> = columns
            .days
            .iter()
            .map(|&(index, day)| (day, text(index)))
            .collect();

        let blank_identity =
            identity.sku.is_empty() && identity.product.is_empty() && identity.brand.is_empty();
        if blank_identity && cells.iter().all(|(_, v)| v.is_empty()) {
            continue;
        }
        table.insert_stored(identity, &cells);
    }

    tracing::debug!(
        path = %path.display(),
        rows = table.rows().len(),
        "loaded stored month table"
    );
    Ok(table)
}

fn map_columns(header: &[Data], period: ReportPeriod) -> Result<ColumnMap, String> {
    let mut sku = None;
    let mut product = None;
    let mut brand = None;
    let mut days = Vec::new();

    for (index, cell) in header.iter().enumerate() {
        let name = cell_text(cell);
        match name.trim() {
            "" => {}
            SKU_HEADER => sku = Some(index),
            PRODUCT_HEADER => product = Some(index),
            BRAND_HEADER => brand = Some(index),
            other => match other.parse::<u32>() {
                Ok(day) if (1..=period.days_in_month()).contains(&day) => days.push((index, day)),
                _ => tracing::warn!(column = other, "ignoring unknown column in stored sheet"),
            },
        }
    }

    let missing = |label: &str| format!("missing {label} column");
    Ok(ColumnMap {
        sku: sku.ok_or_else(|| missing(SKU_HEADER))?,
        product: product.ok_or_else(|| missing(PRODUCT_HEADER))?,
        brand: brand.ok_or_else(|| missing(BRAND_HEADER))?,
        days,
    })
}

/// Cell contents as written. Strings are returned verbatim so identity
/// text read back compares equal to what was stored.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Writes `table` to `path`, replacing any existing file.
///
/// Parent directories are created as needed. Day columns get the
/// [`StatusFormatter`] rules over the data rows.
///
/// # Errors
///
/// - [`ReportError::Io`] if the parent directory cannot be created.
/// - [`ReportError::Write`] if the workbook cannot be built or saved.
pub fn write_table(path: &Path, table: &MonthlyTable) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let period = table.period();
    let header_format = Format::new().set_bold();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(period.sheet_name())?;

    for (col, name) in (0u16..).zip([SKU_HEADER, PRODUCT_HEADER, BRAND_HEADER]) {
        worksheet.write_string_with_format(0, col, name, &header_format)?;
    }
    for (col, day) in (FIRST_DAY_COLUMN..).zip(1..=period.days_in_month()) {
        worksheet.write_number_with_format(0, col, f64::from(day), &header_format)?;
    }
    worksheet.set_column_width(1, PRODUCT_COLUMN_WIDTH)?;

    let mut last_row = 0u32;
    for (row_num, row) in (1u32..).zip(table.rows()) {
        let identity = [&row.identity.sku, &row.identity.product, &row.identity.brand];
        for (col, value) in (0u16..).zip(identity) {
            worksheet.write_string(row_num, col, value.as_str())?;
        }
        for (col, value) in (FIRST_DAY_COLUMN..).zip(&row.days) {
            if !value.is_empty() {
                worksheet.write_string(row_num, col, value.as_str())?;
            }
        }
        last_row = row_num;
    }

    if last_row > 0 {
        for (col, _) in (FIRST_DAY_COLUMN..).zip(1..=period.days_in_month()) {
            StatusFormatter::apply_to_column(worksheet, col, 1, last_row)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
#[path = "workbook_test.rs"]
mod tests;
