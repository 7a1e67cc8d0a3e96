use serde::{Deserialize, Serialize};

/// Cell text written for a listing that has stock.
pub const IN_STOCK_CELL: &str = "sí";
/// Cell text written for a listing that is out of stock.
pub const OUT_OF_STOCK_CELL: &str = "no";

/// One row of the listings input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingReference {
    pub url: String,
    #[serde(default)]
    pub brand: String,
    /// Operator-assigned SKU; empty when the input row has none.
    #[serde(default)]
    pub sku: String,
}

/// Tri-state stock availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    Unknown,
}

impl StockStatus {
    #[must_use]
    pub fn from_in_stock(in_stock: bool) -> Self {
        if in_stock {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "in_stock"),
            StockStatus::OutOfStock => write!(f, "out_of_stock"),
            StockStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// The resolved stock signal for one listing.
///
/// `badge` names the rule or failure that produced `status`, e.g.
/// `"jsonld:instock"`, `"api:available_quantity"` or `"HTTP404"`. It is
/// always set for decisive statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockSignal {
    pub title: Option<String>,
    pub status: StockStatus,
    pub badge: Option<String>,
}

/// A listing's resolved result for today, ready to merge into the monthly
/// table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    /// SKU when the input row has one, otherwise the marketplace item id or
    /// the canonical URL.
    pub key: String,
    /// Resolved product title, falling back to `key`.
    pub product: String,
    pub brand: String,
    pub status: StockStatus,
    pub badge: Option<String>,
}

impl InventoryRecord {
    /// Flattens the tri-state status into the text stored in a day cell:
    /// `"sí"`, `"no"`, or the diagnostic badge (empty when there is none).
    #[must_use]
    pub fn status_cell(&self) -> String {
        match self.status {
            StockStatus::InStock => IN_STOCK_CELL.to_string(),
            StockStatus::OutOfStock => OUT_OF_STOCK_CELL.to_string(),
            StockStatus::Unknown => self.badge.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: StockStatus, badge: Option<&str>) -> InventoryRecord {
        InventoryRecord {
            key: "MLM123456789".to_string(),
            product: "Cafetera".to_string(),
            brand: "Acme".to_string(),
            status,
            badge: badge.map(str::to_string),
        }
    }

    #[test]
    fn status_cell_in_stock_is_si() {
        let r = record(StockStatus::InStock, Some("api:available_quantity"));
        assert_eq!(r.status_cell(), "sí");
    }

    #[test]
    fn status_cell_out_of_stock_is_no() {
        let r = record(StockStatus::OutOfStock, Some("sin stock"));
        assert_eq!(r.status_cell(), "no");
    }

    #[test]
    fn status_cell_unknown_surfaces_badge() {
        let r = record(StockStatus::Unknown, Some("HTTP403"));
        assert_eq!(r.status_cell(), "HTTP403");
    }

    #[test]
    fn status_cell_unknown_without_badge_is_blank() {
        let r = record(StockStatus::Unknown, None);
        assert_eq!(r.status_cell(), "");
    }

    #[test]
    fn from_in_stock_maps_both_answers() {
        assert_eq!(StockStatus::from_in_stock(true), StockStatus::InStock);
        assert_eq!(StockStatus::from_in_stock(false), StockStatus::OutOfStock);
    }
}
