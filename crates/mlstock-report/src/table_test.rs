use mlstock_core::StockStatus;

use super::*;

fn period(year: i32, month: u32) -> ReportPeriod {
    ReportPeriod::new(year, month).unwrap()
}

fn record(key: &str, status: StockStatus, badge: Option<&str>) -> InventoryRecord {
    InventoryRecord {
        key: key.to_string(),
        product: format!("Producto {key}"),
        brand: "Acme".to_string(),
        status,
        badge: badge.map(str::to_string),
    }
}

fn identity(key: &str) -> RowIdentity {
    RowIdentity {
        sku: key.to_string(),
        product: format!("Producto {key}"),
        brand: "Acme".to_string(),
    }
}

#[test]
fn headers_cover_every_day_of_leap_february() {
    let table = MonthlyTable::new(period(2024, 2));
    let headers = table.headers();
    assert_eq!(headers.len(), IDENTITY_COLUMNS + 29);
    assert_eq!(&headers[..4], ["SKU", "Producto", "Marca", "1"]);
    assert_eq!(headers.last().map(String::as_str), Some("29"));
}

#[test]
fn headers_cover_every_day_of_common_february() {
    let table = MonthlyTable::new(period(2023, 2));
    assert_eq!(table.headers().len(), IDENTITY_COLUMNS + 28);
}

#[test]
fn merge_into_empty_table_creates_rows_with_blank_days() {
    let mut table = MonthlyTable::new(period(2024, 3));
    table
        .merge_day(
            5,
            &[
                record("SKU-1", StockStatus::InStock, Some("api:available_quantity")),
                record("SKU-2", StockStatus::OutOfStock, Some("sin stock")),
                record("SKU-3", StockStatus::Unknown, Some("HTTP404")),
            ],
        )
        .unwrap();

    assert_eq!(table.rows().len(), 3);
    let first = &table.rows()[0];
    assert_eq!(first.days.len(), 31);
    assert_eq!(first.day(5), Some("sí"));
    assert_eq!(first.day(4), Some(""));
    assert_eq!(table.rows()[1].day(5), Some("no"));
    assert_eq!(table.rows()[2].day(5), Some("HTTP404"));
}

#[test]
fn merge_is_idempotent() {
    let records = [
        record("SKU-1", StockStatus::InStock, Some("jsonld:instock")),
        record("SKU-2", StockStatus::Unknown, None),
    ];
    let mut once = MonthlyTable::new(period(2024, 3));
    once.merge_day(9, &records).unwrap();

    let mut twice = once.clone();
    twice.merge_day(9, &records).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn rerun_overwrites_only_todays_column() {
    let mut table = MonthlyTable::new(period(2024, 3));
    table.insert_stored(
        identity("SKU-1"),
        &[(1, "sí".to_string()), (2, "no".to_string()), (3, "HTTP500".to_string())],
    );

    table
        .merge_day(3, &[record("SKU-1", StockStatus::InStock, Some("api:status"))])
        .unwrap();

    let row = table.row(&identity("SKU-1")).unwrap();
    assert_eq!(row.day(1), Some("sí"));
    assert_eq!(row.day(2), Some("no"));
    assert_eq!(row.day(3), Some("sí"));
}

#[test]
fn outer_merge_keeps_history_and_appends_new_rows() {
    let mut table = MonthlyTable::new(period(2024, 3));
    table.insert_stored(identity("OLD"), &[(1, "no".to_string())]);
    table.insert_stored(identity("BOTH"), &[(1, "sí".to_string())]);

    table
        .merge_day(
            2,
            &[
                record("NEW", StockStatus::OutOfStock, Some("agotado")),
                record("BOTH", StockStatus::OutOfStock, Some("agotado")),
            ],
        )
        .unwrap();

    let keys: Vec<&str> = table.rows().iter().map(|r| r.identity.sku.as_str()).collect();
    assert_eq!(keys, ["OLD", "BOTH", "NEW"]);

    let old = table.row(&identity("OLD")).unwrap();
    assert_eq!(old.day(1), Some("no"));
    assert_eq!(old.day(2), Some(""));

    let both = table.row(&identity("BOTH")).unwrap();
    assert_eq!(both.day(1), Some("sí"));
    assert_eq!(both.day(2), Some("no"));

    let new = table.row(&identity("NEW")).unwrap();
    assert_eq!(new.day(1), Some(""));
    assert_eq!(new.day(2), Some("no"));
}

#[test]
fn changed_title_is_a_new_identity() {
    let mut table = MonthlyTable::new(period(2024, 3));
    table.insert_stored(identity("SKU-1"), &[(1, "sí".to_string())]);

    let mut renamed = record("SKU-1", StockStatus::InStock, Some("api:available_quantity"));
    renamed.product = "Producto renombrado".to_string();
    table.merge_day(2, &[renamed]).unwrap();

    assert_eq!(table.rows().len(), 2);
}

#[test]
fn duplicate_stored_rows_collapse_first_value_wins() {
    let mut table = MonthlyTable::new(period(2024, 3));
    table.insert_stored(identity("SKU-1"), &[(1, "sí".to_string()), (2, String::new())]);
    table.insert_stored(identity("SKU-1"), &[(1, "no".to_string()), (2, "no".to_string())]);

    assert_eq!(table.rows().len(), 1);
    let row = &table.rows()[0];
    assert_eq!(row.day(1), Some("sí"));
    assert_eq!(row.day(2), Some("no"));
}

#[test]
fn stored_days_outside_month_are_ignored() {
    let mut table = MonthlyTable::new(period(2023, 2));
    table.insert_stored(identity("SKU-1"), &[(0, "x".to_string()), (30, "sí".to_string())]);
    assert!(table.rows()[0].days.iter().all(String::is_empty));
}

#[test]
fn merge_rejects_day_outside_month() {
    let mut table = MonthlyTable::new(period(2023, 2));
    let records = [record("SKU-1", StockStatus::InStock, Some("x"))];
    assert!(matches!(
        table.merge_day(29, &records),
        Err(ReportError::InvalidDay { day: 29, days_in_month: 28 })
    ));
    assert!(table.merge_day(0, &records).is_err());
    assert!(table.rows().is_empty());
}

#[test]
fn stored_row_absent_today_has_run_day_cleared() {
    let mut table = MonthlyTable::new(period(2024, 2));
    table.insert_stored(
        identity("OLD"),
        &[(9, "sí".to_string()), (10, "no".to_string())],
    );

    table
        .merge_day(10, &[record("NEW", StockStatus::InStock, Some("x"))])
        .unwrap();

    let old = table.row(&identity("OLD")).unwrap();
    assert_eq!(old.day(9), Some("sí"));
    assert_eq!(old.day(10), Some(""));
    assert_eq!(table.row(&identity("NEW")).unwrap().day(10), Some("sí"));
}

#[test]
fn same_day_rerun_under_new_title_replaces_stale_row() {
    let mut fallback = record("MLM123456789", StockStatus::OutOfStock, Some("sin stock"));
    fallback.product = "MLM123456789".to_string();
    let mut titled = record("MLM123456789", StockStatus::InStock, Some("api:available_quantity"));
    titled.product = "Cafetera Acme".to_string();

    let mut table = MonthlyTable::new(period(2024, 2));
    table.merge_day(10, &[fallback]).unwrap();
    table.merge_day(10, &[titled]).unwrap();

    assert_eq!(table.rows().len(), 1);
    let row = &table.rows()[0];
    assert_eq!(row.identity.product, "Cafetera Acme");
    assert_eq!(row.day(10), Some("sí"));
}

#[test]
fn stale_row_with_earlier_history_is_kept_blank_for_today() {
    let mut table = MonthlyTable::new(period(2024, 2));
    table.insert_stored(
        identity("SKU-1"),
        &[(9, "no".to_string()), (10, "no".to_string())],
    );

    let mut renamed = record("SKU-1", StockStatus::InStock, Some("x"));
    renamed.product = "Producto nuevo".to_string();
    table.merge_day(10, &[renamed]).unwrap();

    assert_eq!(table.rows().len(), 2);
    let stored = table.row(&identity("SKU-1")).unwrap();
    assert_eq!(stored.day(9), Some("no"));
    assert_eq!(stored.day(10), Some(""));
}

#[test]
fn record_identity_is_trimmed() {
    let mut padded = record("SKU-1", StockStatus::InStock, Some("x"));
    padded.product = "Producto SKU-1 ".to_string();
    padded.brand = " Acme".to_string();

    let mut table = MonthlyTable::new(period(2024, 2));
    table.insert_stored(identity("SKU-1"), &[(1, "no".to_string())]);
    table.merge_day(2, &[padded]).unwrap();

    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].day(2), Some("sí"));
}

#[test]
fn blank_cell_from_today_keeps_its_row() {
    let mut table = MonthlyTable::new(period(2024, 2));
    table
        .merge_day(3, &[record("SKU-1", StockStatus::Unknown, None)])
        .unwrap();
    table
        .merge_day(3, &[record("SKU-1", StockStatus::Unknown, None)])
        .unwrap();

    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].day(3), Some(""));
}

#[test]
fn rerun_keeps_row_order_when_first_row_was_only_today() {
    let records = [
        record("TODAY", StockStatus::InStock, Some("x")),
        record("HIST", StockStatus::OutOfStock, Some("y")),
    ];
    let mut table = MonthlyTable::new(period(2024, 2));
    table.insert_stored(identity("TODAY"), &[(5, "sí".to_string())]);
    table.insert_stored(identity("HIST"), &[(1, "no".to_string()), (5, "no".to_string())]);

    let before = table.clone();
    table.merge_day(5, &records).unwrap();

    assert_eq!(table, before);
}
