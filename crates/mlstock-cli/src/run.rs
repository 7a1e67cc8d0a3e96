//! The `run` command: load listings, resolve each one, record the day.
//!
//! Listings are resolved one after another. A listing that no source can
//! decide still yields a row carrying its diagnostic badge, so only
//! configuration and workbook errors abort the run.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Args;
use mlstock_core::{load_listings, AppConfig, InventoryRecord};
use mlstock_report::ReportAccumulator;
use mlstock_scraper::Cascade;

#[derive(Debug, Default, Clone, Args)]
pub struct RunArgs {
    /// Listing CSV to read (overrides `MLSTOCK_LISTINGS_PATH`)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Root directory for monthly workbooks (overrides `MLSTOCK_REPORTS_DIR`)
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,

    /// Day to record, as YYYY-MM-DD (defaults to today's local date)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Resolve and print records without touching the workbook
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs one audit. Returns the workbook path, or `None` on a dry run.
///
/// # Errors
///
/// Fails if the listing file cannot be loaded (before any network call),
/// if an HTTP client cannot be built, or if the workbook cannot be read or
/// written.
pub(crate) async fn run_audit(
    mut config: AppConfig,
    args: &RunArgs,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(input) = &args.input {
        config.listings_path.clone_from(input);
    }
    if let Some(dir) = &args.reports_dir {
        config.reports_dir.clone_from(dir);
    }
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let listings = load_listings(&config.listings_path).with_context(|| {
        format!(
            "failed to load listings from {}",
            config.listings_path.display()
        )
    })?;
    if listings.is_empty() {
        tracing::warn!(path = %config.listings_path.display(), "listing file has no rows");
    }

    let cascade = Cascade::from_config(&config)?;
    tracing::info!(
        listings = listings.len(),
        sources = ?cascade.source_names(),
        %date,
        "starting stock audit"
    );

    let mut records: Vec<InventoryRecord> = Vec::with_capacity(listings.len());
    for listing in &listings {
        records.push(cascade.resolve(listing).await);
    }

    let accumulator = ReportAccumulator::new(&config.reports_dir);

    if args.dry_run {
        for record in &records {
            println!(
                "{}\t{}\t{}\t{}",
                record.key,
                record.product,
                record.brand,
                record.status_cell()
            );
        }
        println!(
            "dry-run: would update {}",
            accumulator.workbook_path(date).display()
        );
        return Ok(None);
    }

    let path = accumulator
        .record_day(date, &records)
        .with_context(|| format!("failed to update report for {date}"))?;
    Ok(Some(path))
}
