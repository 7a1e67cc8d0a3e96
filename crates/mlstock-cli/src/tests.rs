use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use mlstock_core::AppConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["mlstock-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_bare_run_with_defaults() {
    let cli = Cli::try_parse_from(["mlstock-cli", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run(RunArgs {
            input: None,
            reports_dir: None,
            date: None,
            dry_run: false,
        }))
    ));
}

#[test]
fn parses_run_overrides() {
    let cli = Cli::try_parse_from([
        "mlstock-cli",
        "run",
        "--input",
        "data/listings.csv",
        "--reports-dir",
        "/tmp/reports",
        "--date",
        "2024-02-29",
        "--dry-run",
    ])
    .unwrap();

    let Some(Commands::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.input, Some(PathBuf::from("data/listings.csv")));
    assert_eq!(args.reports_dir, Some(PathBuf::from("/tmp/reports")));
    assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 2, 29));
    assert!(args.dry_run);
}

#[test]
fn rejects_malformed_date() {
    let result = Cli::try_parse_from(["mlstock-cli", "run", "--date", "29/02/2024"]);
    assert!(result.is_err());
}

#[test]
fn rejects_impossible_date() {
    let result = Cli::try_parse_from(["mlstock-cli", "run", "--date", "2023-02-29"]);
    assert!(result.is_err());
}

fn test_config(api_base_url: String, dir: &std::path::Path) -> AppConfig {
    AppConfig {
        listings_path: dir.join("urls.csv"),
        reports_dir: dir.join("reports"),
        log_level: "info".to_string(),
        api_base_url,
        api_timeout_secs: 5,
        page_timeout_secs: 5,
        user_agent: "mlstock-test/0.1".to_string(),
        credentials: None,
    }
}

#[tokio::test]
async fn missing_listing_file_fails_before_any_request() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(server.uri(), dir.path());

    let result = run::run_audit(config, &RunArgs::default()).await;

    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
    assert!(!dir.path().join("reports").exists());
}

#[tokio::test]
async fn run_writes_workbook_for_requested_day() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/MLM123456789"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/MLM-123456789-cafetera"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><h1>Cafetera</h1><p>Sin stock</p></body></html>",
            "text/html",
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("urls.csv"),
        format!("url,brand,sku\n{}/MLM-123456789-cafetera,Acme,\n", server.uri()),
    )
    .unwrap();
    let config = test_config(server.uri(), dir.path());
    let args = RunArgs {
        date: NaiveDate::from_ymd_opt(2024, 2, 29),
        ..RunArgs::default()
    };

    let written = run::run_audit(config, &args).await.unwrap();

    let expected = dir
        .path()
        .join("reports")
        .join("2024")
        .join("inventory_2024-02.xlsx");
    assert_eq!(written, Some(expected.clone()));
    assert!(expected.exists());
}

#[tokio::test]
async fn dry_run_leaves_reports_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("urls.csv"),
        format!("url\n{}/MLM-123456789-x\n", server.uri()),
    )
    .unwrap();
    let config = test_config(server.uri(), dir.path());
    let args = RunArgs {
        dry_run: true,
        ..RunArgs::default()
    };

    let written = run::run_audit(config, &args).await.unwrap();

    assert_eq!(written, None);
    assert!(!dir.path().join("reports").exists());
}
