//! Tests for documentation publishing.
//!
//! Tests for:
//! - Package upload followed by asset uploads
//! - Version conflict handling with and without the skip flag
//! - Fatal host errors carrying status and body
use std::io::Cursor;
use tempfile::TempDir;
use zip::ZipArchive;

use super::*;
use crate::{
    docs::host::{HostResponse, MockBlobStore, MockDocsHost},
    test_helpers::{TEST_VERSION, test_docs_request, write_artifact},
};

fn response(status: u16, body: &str) -> HostResponse {
    HostResponse {
        status,
        body: body.to_string(),
    }
}

fn docs_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_artifact(tmp.path(), "index.html", "<html>docs</html>");
    tmp
}

#[tokio::test]
async fn uploads_package_then_assets_in_order() {
    let docs = docs_dir();
    let assets = TempDir::new().unwrap();
    let first = write_artifact(assets.path(), "first.exe", "1");
    let second = write_artifact(assets.path(), "second.exe", "2");

    let mut host = MockDocsHost::new();
    host.expect_upload_project()
        .times(1)
        .withf(|req| {
            let archive = ZipArchive::new(Cursor::new(req.package.clone()));
            req.version == TEST_VERSION
                && req.markdown_changelog.as_deref() == Some("## 1.2.3")
                && archive.is_ok_and(|a| a.len() == 1)
        })
        .returning(|_| Ok(response(200, "")));
    // first asset gets a signed link, the second is refused one
    host.expect_request_upload_link()
        .withf(|req| req.file_name == "first.exe")
        .times(1)
        .returning(|_| {
            Ok(response(200, r#"{"uploadLink":"https://blob/first"}"#))
        });
    host.expect_request_upload_link()
        .withf(|req| req.file_name == "second.exe")
        .times(1)
        .returning(|_| Ok(response(404, "")));
    host.expect_upload_asset()
        .withf(|req| req.file_name == "second.exe")
        .times(1)
        .returning(|_| Ok(response(200, "")));

    let mut store = MockBlobStore::new();
    store
        .expect_put_blob()
        .withf(|link, _| link == "https://blob/first")
        .times(1)
        .returning(|_, _| Ok(201));

    let request = test_docs_request(docs.path())
        .markdown_changelog("## 1.2.3")
        .asset_file_paths(vec![first, second])
        .build()
        .unwrap();

    let outcome = publish_docs_with(&host, &store, &request).await.unwrap();

    assert_eq!(
        outcome,
        DocsOutcome::Published {
            assets: vec![
                AssetUploadOutcome::UploadedViaDirectTransfer,
                AssetUploadOutcome::UploadedViaProxy,
            ]
        }
    );
}

#[tokio::test]
async fn version_conflict_is_skipped_when_configured() {
    let docs = docs_dir();
    let asset = write_artifact(docs.path(), "setup.exe", "binary");

    let mut host = MockDocsHost::new();
    host.expect_upload_project()
        .times(1)
        .returning(|_| Ok(response(409, "version exists")));
    host.expect_request_upload_link().times(0);
    host.expect_upload_asset().times(0);
    let mut store = MockBlobStore::new();
    store.expect_put_blob().times(0);

    let request = test_docs_request(docs.path())
        .asset_file_paths(vec![asset])
        .skip_on_version_conflict(true)
        .build()
        .unwrap();

    let outcome = publish_docs_with(&host, &store, &request).await.unwrap();
    assert_eq!(outcome, DocsOutcome::SkippedVersionConflict);
}

#[tokio::test]
async fn version_conflict_is_fatal_without_skip_flag() {
    let docs = docs_dir();
    let asset = write_artifact(docs.path(), "setup.exe", "binary");

    let mut host = MockDocsHost::new();
    host.expect_upload_project()
        .returning(|_| Ok(response(409, "version exists")));
    host.expect_request_upload_link().times(0);
    host.expect_upload_asset().times(0);
    let store = MockBlobStore::new();

    let request = test_docs_request(docs.path())
        .asset_file_paths(vec![asset])
        .build()
        .unwrap();

    let err = publish_docs_with(&host, &store, &request)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn host_errors_include_status_and_body() {
    let docs = docs_dir();

    let mut host = MockDocsHost::new();
    host.expect_upload_project()
        .returning(|_| Ok(response(500, "database unavailable")));
    let store = MockBlobStore::new();

    let request = test_docs_request(docs.path())
        .skip_on_version_conflict(true)
        .build()
        .unwrap();

    let err = publish_docs_with(&host, &store, &request)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("database unavailable"));
}

#[tokio::test]
async fn blank_changelog_is_not_sent() {
    let docs = docs_dir();

    let mut host = MockDocsHost::new();
    host.expect_upload_project()
        .times(1)
        .withf(|req| req.markdown_changelog.is_none())
        .returning(|_| Ok(response(201, "")));
    let store = MockBlobStore::new();

    let request = test_docs_request(docs.path())
        .markdown_changelog("   ")
        .build()
        .unwrap();

    let outcome = publish_docs_with(&host, &store, &request).await.unwrap();
    assert_eq!(outcome, DocsOutcome::Published { assets: vec![] });
}

#[tokio::test]
async fn missing_source_directory_fails_before_upload() {
    let docs = docs_dir();

    let mut host = MockDocsHost::new();
    host.expect_upload_project().times(0);
    let store = MockBlobStore::new();

    let request = test_docs_request(&docs.path().join("missing"))
        .build()
        .unwrap();

    let err = publish_docs_with(&host, &store, &request)
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Validation(_)));
}

#[tokio::test]
async fn uploads_assets_without_package() {
    let assets = TempDir::new().unwrap();
    let asset = write_artifact(assets.path(), "setup.exe", "binary");

    let mut host = MockDocsHost::new();
    host.expect_upload_project().times(0);
    host.expect_request_upload_link()
        .returning(|_| Ok(response(503, "")));
    host.expect_upload_asset()
        .times(1)
        .returning(|_| Ok(response(200, "")));
    let store = MockBlobStore::new();

    let request = test_docs_request(std::path::Path::new(""))
        .asset_file_paths(vec![asset])
        .build()
        .unwrap();

    let outcomes = upload_assets_with(&host, &store, &request).await.unwrap();
    assert_eq!(outcomes, vec![AssetUploadOutcome::UploadedViaProxy]);
}
