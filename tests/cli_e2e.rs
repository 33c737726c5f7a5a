//! End-to-end CLI tests for the sds-ingest binary.

// `Command::cargo_bin` is deprecated in assert_cmd >=2.0.17 in favor of
// `cargo::cargo_bin_cmd!` macro. Suppressed until migration to the new API.
#![allow(deprecated)]

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::build_single_page_pdf;

#[test]
fn test_help_lists_config_overrides() {
    Command::cargo_bin("sds-ingest")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--catalog-url"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--cache-file"));
}

#[test]
fn test_version_prints_crate_version() {
    Command::cargo_bin("sds-ingest")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_fails() {
    Command::cargo_bin("sds-ingest")
        .unwrap()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_e2e_run_ingests_catalog() {
    let server = MockServer::start().await;
    let workspace = TempDir::new().unwrap();

    let listing = format!(
        r#"<html><body>
            <a class="sds_download_btn" href="{uri}/docs/Sheet1.PDF">Sheet 1</a>
            <a class="sds_download_btn" href="{uri}/docs/broken.pdf">Broken</a>
        </body></html>"#,
        uri = server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/data-sheets/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/Sheet1.PDF"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(build_single_page_pdf()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/broken.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a pdf at all"))
        .mount(&server)
        .await;

    let catalog_url = format!("{}/data-sheets/", server.uri());
    let cache_file = workspace.path().join("listing.html");
    let output_dir = workspace.path().join("PDFs");

    // The binary blocks its thread; keep the mock server responsive on the
    // other worker by running the command via spawn_blocking.
    let assert = tokio::task::spawn_blocking({
        let cache_file = cache_file.clone();
        let output_dir = output_dir.clone();
        move || {
            Command::cargo_bin("sds-ingest")
                .unwrap()
                .arg("--catalog-url")
                .arg(&catalog_url)
                .arg("--cache-file")
                .arg(&cache_file)
                .arg("--output-dir")
                .arg(&output_dir)
                .arg("--no-progress")
                .arg("--quiet")
                .assert()
        }
    })
    .await
    .unwrap();

    assert.success();

    assert!(cache_file.exists(), "listing cache must be written");
    assert!(
        output_dir.join("sheet1.pdf").exists(),
        "valid sheet must be downloaded and lowercased"
    );
    assert!(
        !output_dir.join("Sheet1.PDF").exists(),
        "original mixed-case name must be gone after normalization"
    );
    assert!(
        !output_dir.join("broken.pdf").exists(),
        "unreadable sheet must be removed"
    );
}
