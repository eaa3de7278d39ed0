//! End-to-end install behavior against a local HTTP server.

mod common;

use std::fs;

use common::{quickstart_archive, snapshot_tree};
use tessera_cli::catalog::Catalog;
use tessera_cli::core::CliError;
use tessera_cli::installer::Installer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_archive(server: &MockServer, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path("/archive/quickstart.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

fn test_installer(server: &MockServer, staging_root: &std::path::Path) -> Installer {
    let catalog = Catalog::new([(
        "quickstart",
        format!("{}/archive/quickstart.tar.gz", server.uri()),
    )]);
    Installer::new()
        .unwrap()
        .with_catalog(catalog)
        .with_staging_root(staging_root)
}

#[tokio::test]
async fn installs_project_without_wrapper_directory() {
    let server = MockServer::start().await;
    serve_archive(&server, quickstart_archive()).await;

    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("staging");
    let target = scratch.path().join("demo");

    let installer = test_installer(&server, &staging);
    let installed = installer.install("quickstart", &target).await.unwrap();

    assert!(installed.ends_with("demo/quickstart"));
    assert!(installed.join("README.md").is_file());
    assert!(installed.join("src/main.rs").is_file());

    // The synthetic wrapper name must not appear anywhere in the output.
    for (rel, _) in snapshot_tree(&target) {
        assert!(
            !rel.contains("tessera-labs-quickstart"),
            "wrapper leaked into {rel}"
        );
    }
}

#[tokio::test]
async fn two_installs_produce_identical_trees() {
    let server = MockServer::start().await;
    serve_archive(&server, quickstart_archive()).await;

    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("staging");
    let installer = test_installer(&server, &staging);

    let first = scratch.path().join("one");
    let second = scratch.path().join("two");
    installer.install("quickstart", &first).await.unwrap();
    installer.install("quickstart", &second).await.unwrap();

    assert_eq!(snapshot_tree(&first), snapshot_tree(&second));
}

#[tokio::test]
async fn unknown_project_never_touches_target() {
    let server = MockServer::start().await;
    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("staging");
    let target = scratch.path().join("untouched");

    let installer = test_installer(&server, &staging);
    let err = installer.install("nonexistent", &target).await.unwrap_err();

    match err {
        CliError::UnknownProject { name, available } => {
            assert_eq!(name, "nonexistent");
            assert_eq!(available, vec!["quickstart".to_string()]);
        }
        other => panic!("expected UnknownProject, got {other:?}"),
    }
    assert!(!target.exists());
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn non_empty_target_is_rejected_unchanged() {
    let server = MockServer::start().await;
    serve_archive(&server, quickstart_archive()).await;

    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("staging");
    let target = scratch.path().join("occupied");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("precious.txt"), "do not touch").unwrap();
    let before = snapshot_tree(&target);

    let installer = test_installer(&server, &staging);
    let err = installer.install("quickstart", &target).await.unwrap_err();

    assert!(matches!(err, CliError::TargetNotEmpty { .. }));
    assert_eq!(snapshot_tree(&target), before);
}

#[tokio::test]
async fn http_error_status_fails_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive/quickstart.tar.gz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("staging");
    let installer = test_installer(&server, &staging);

    let err = installer
        .install("quickstart", &scratch.path().join("demo"))
        .await
        .unwrap_err();

    match err {
        CliError::DownloadStatus { status, .. } => assert_eq!(status, 404),
        other => panic!("expected DownloadStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn staging_is_cleaned_up_after_extraction_failure() {
    let server = MockServer::start().await;
    let archive = quickstart_archive();
    // Truncate mid-stream so extraction fails partway.
    serve_archive(&server, archive[..archive.len() / 2].to_vec()).await;

    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("staging");
    let target = scratch.path().join("demo");
    let installer = test_installer(&server, &staging);

    let err = installer.install("quickstart", &target).await.unwrap_err();
    assert!(matches!(err, CliError::ExtractFailed { .. }));

    let leftovers: Vec<_> = fs::read_dir(&staging).unwrap().collect();
    assert!(leftovers.is_empty(), "staging not cleaned: {leftovers:?}");
    assert!(!target.exists());
}

#[tokio::test]
async fn staging_is_cleaned_up_after_success() {
    let server = MockServer::start().await;
    serve_archive(&server, quickstart_archive()).await;

    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("staging");
    let installer = test_installer(&server, &staging);

    installer
        .install("quickstart", &scratch.path().join("demo"))
        .await
        .unwrap();

    let leftovers: Vec<_> = fs::read_dir(&staging).unwrap().collect();
    assert!(leftovers.is_empty(), "staging not cleaned: {leftovers:?}");
}
