use std::io::Read;
use std::path::Path;

use crate::inventory::ListingReference;
use crate::ConfigError;

/// Load the listings to audit from a CSV file with a `url` column and
/// optional `brand` and `sku` columns.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be opened or is not valid CSV
/// with a `url` column.
pub fn load_listings(path: &Path) -> Result<Vec<ListingReference>, ConfigError> {
    let file = std::fs::File::open(path).map_err(|e| ConfigError::ListingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_listings(file)
}

/// Parse listings from any CSV reader.
///
/// Values are trimmed and rows with a blank `url` are skipped with a warning.
///
/// # Errors
///
/// Returns [`ConfigError::ListingsFileParse`] on malformed CSV or a missing
/// `url` column.
pub fn parse_listings<R: Read>(reader: R) -> Result<Vec<ListingReference>, ConfigError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut listings = Vec::new();
    for (index, row) in csv_reader.deserialize::<ListingReference>().enumerate() {
        let listing = row?;
        if listing.url.is_empty() {
            // +2: one for the header row, one for 1-based line numbers.
            tracing::warn!(line = index + 2, "skipping listing row with blank url");
            continue;
        }
        listings.push(listing);
    }

    Ok(listings)
}
