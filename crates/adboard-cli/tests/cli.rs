use assert_cmd::Command;
use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{Value, json};
use std::collections::HashMap;
use tempfile::TempDir;

#[allow(deprecated)]
fn adboard(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("adboard").unwrap();
    cmd.env_remove("ADBOARD_BASE_URL")
        .env_remove("ADBOARD_PATH")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

async fn report(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let rows = if params.get("startDate").map(String::as_str) == Some("2021-06-01") {
        json!([
            { "date": "2021-06-01T00:00:00Z", "app_id": "654321", "clicks": 12, "impression": 400 },
            { "date": "2021-06-02T00:00:00Z", "app_id": 123456, "clicks": 2900, "impression": 980000 }
        ])
    } else {
        json!([])
    };
    Json(json!({ "data": rows }))
}

async fn apps() -> Json<Value> {
    Json(json!({
        "data": [
            { "app_id": "123456", "app_name": "Panda Draw" },
            { "app_id": "654321", "app_name": "Number Ninja" }
        ]
    }))
}

/// Serve the two endpoints on a background thread; returns the base URL
fn spawn_server() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let router = Router::new()
                .route("/v3/report", get(report))
                .route("/v3/apps", get(apps));
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    format!("http://{}/v3", addr)
}

/// A local address nothing listens on
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    adboard(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_report_prints_sorted_table() {
    let dir = TempDir::new().unwrap();
    let output = adboard(&dir)
        .args(["--base-url", spawn_server().as_str()])
        .args(["report", "--start", "2021-06-01", "--end", "2021-06-07"])
        .args(["--sort", "clicks:desc", "--columns", "clicks"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    insta::assert_snapshot!(String::from_utf8(output.stdout).unwrap(), @r"
    2021-06-01 → 2021-06-07 · 2 rows · sorted by Clicks (Descending)

    Date        App           Clicks
    2 Jun 2021  Panda Draw     2.90K
    1 Jun 2021  Number Ninja      12
    ");
}

#[test]
fn test_report_csv_with_filter() {
    let dir = TempDir::new().unwrap();
    adboard(&dir)
        .args(["--base-url", spawn_server().as_str(), "--format", "csv"])
        .args(["report", "--start", "2021-06-01", "--end", "2021-06-07"])
        .args(["--filter", "ninja", "--columns", "ctr"])
        .assert()
        .success()
        .stdout("Date,App,CTR\n1 Jun 2021,Number Ninja,3.00%\n");
}

#[test]
fn test_report_empty_range_prints_empty_state() {
    let dir = TempDir::new().unwrap();
    adboard(&dir)
        .args(["--base-url", spawn_server().as_str()])
        .args(["report", "--start", "2022-01-01", "--end", "2022-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("No data found\n"));
}

#[test]
fn test_report_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();
    // nothing listens there, so reaching the network would give a
    // different error
    adboard(&dir)
        .args(["--base-url", dead_url().as_str()])
        .args(["report", "--start", "2021-06-07", "--end", "2021-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn test_report_rejects_malformed_date() {
    let dir = TempDir::new().unwrap();
    adboard(&dir)
        .args(["--base-url", dead_url().as_str()])
        .args(["report", "--start", "June 1st"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn test_report_fetch_failure_is_an_error() {
    let dir = TempDir::new().unwrap();
    adboard(&dir)
        .args(["--base-url", dead_url().as_str()])
        .args(["report", "--start", "2021-06-01", "--end", "2021-06-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch report"));
}

#[test]
fn test_unknown_column_is_rejected() {
    let dir = TempDir::new().unwrap();
    adboard(&dir)
        .args(["report", "--columns", "date,ecpm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown column 'ecpm'"));
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();

    adboard(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(dir.path().join("config.toml").exists());

    adboard(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    adboard(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    adboard(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url = \"http://go-dev.greedygame.com/v3/dummy\""))
        .stdout(predicate::str::contains("stale_results = \"discard\""));
}

#[test]
fn test_config_show_json_applies_base_url_flag() {
    let dir = TempDir::new().unwrap();
    let output = adboard(&dir)
        .args(["--format", "json", "--base-url", "https://reports.example.com/v3"])
        .args(["config", "show"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["exists"], false);
    assert_eq!(value["config"]["api"]["base_url"], "https://reports.example.com/v3");
    assert_eq!(value["config"]["dashboard"]["default_start"], "2021-06-01");
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[dashboard]\nstale_results = \"sometimes\"\n",
    )
    .unwrap();

    adboard(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}
