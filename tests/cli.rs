//! Command line behavior of the `badge-dl` binary
//!
//! The binary is run as a child process; badge downloads go to a wiremock
//! server passed through `--base-url`.

#![allow(deprecated)]

mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use common::{TEST_SVG, base_url_for, unreachable_base_url};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn badge_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin("badge-dl"));
    cmd.env_remove("BADGE_DL_CONFIG")
        .env_remove("BADGE_DL_BASE_URL")
        .env_remove("BADGE_DL_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap()
}

fn output_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn missing_positional_arguments_is_a_usage_error() {
    badge_cmd()
        .args(["build", "passing"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("<PATH>"));
}

#[test]
fn empty_label_is_reported_by_name() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("b.svg");

    badge_cmd()
        .args(["", "passing", output_arg(&output)])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Missing required input: label"));

    assert!(!output.exists());
}

#[test]
fn missing_label_wins_over_invalid_style() {
    badge_cmd()
        .args(["", "passing", "b.svg", "--style", "rounded"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Missing required input: label"))
        .stderr(predicate::str::contains("style").not());
}

#[test]
fn all_missing_lists_every_empty_input() {
    badge_cmd()
        .args(["", "", "", "--all-missing"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains(
            "Missing required inputs: label, status, path",
        ));
}

#[test]
fn unknown_style_is_rejected_before_download() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("b.svg");

    badge_cmd()
        .args(["build", "passing", output_arg(&output)])
        .args(["--style", "rounded"])
        .args(["--base-url", &unreachable_base_url()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid --style"));
}

#[test]
fn non_numeric_cache_seconds_is_rejected() {
    badge_cmd()
        .args(["build", "passing", "b.svg", "--cache-seconds", "hourly"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid --cache-seconds"));
}

#[test]
fn version_flag_prints_version() {
    badge_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test(flavor = "multi_thread")]
async fn generates_badge_and_reports_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/badge/build-passing-green"))
        .and(query_param("style", "flat-square"))
        .and(query_param("labelColor", "555"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TEST_SVG))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("badges").join("build.svg");

    let mut cmd = badge_cmd();
    cmd.args(["build", "passing", output_arg(&output)])
        .args(["-c", "green", "-s", "flat-square"])
        .env("BADGE_DL_BASE_URL", base_url_for(&server));

    run(cmd).await.success().stdout(predicate::str::contains(format!(
        "Badge generated successfully at: {}",
        output.display()
    )));

    assert_eq!(std::fs::read_to_string(&output).unwrap(), TEST_SVG);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_exits_with_status_code_4() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("b.svg");

    let mut cmd = badge_cmd();
    cmd.args(["build", "passing", output_arg(&output)])
        .args(["--base-url", &base_url_for(&server)]);

    run(cmd)
        .await
        .failure()
        .code(4)
        .stderr(predicate::str::contains("HTTP 404"));

    assert!(!output.exists());
}

#[test]
fn unreachable_service_exits_with_code_3() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("b.svg");

    badge_cmd()
        .args(["build", "passing", output_arg(&output)])
        .args(["--base-url", &unreachable_base_url(), "--timeout", "5"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Could not reach the badge service"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unusable_output_directory_exits_with_code_5() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TEST_SVG))
        .mount(&server)
        .await;

    // A regular file where the output directory should be
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("badges");
    std::fs::write(&blocker, "not a directory").unwrap();
    let output = blocker.join("b.svg");

    let mut cmd = badge_cmd();
    cmd.args(["build", "passing", output_arg(&output)])
        .args(["--base-url", &base_url_for(&server)]);

    run(cmd)
        .await
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Failed to save badge"));
}

#[test]
fn malformed_config_file_exits_with_code_1() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("badge-dl.json");
    std::fs::write(&config, "{ not json").unwrap();

    badge_cmd()
        .args(["build", "passing", "b.svg"])
        .args(["--config", output_arg(&config)])
        .assert()
        .failure()
        .code(1);
}
