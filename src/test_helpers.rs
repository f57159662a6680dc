//! Common test helper functions shared across test modules.
//!
//! Provides reusable request fixtures and artifact files so each test suite
//! only has to set up the expectations it cares about.
use secrecy::SecretString;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    docs::config::{DocPublishRequest, DocPublishRequestBuilder},
    forge::request::{ForgeRelease, ReleaseRequest, ReleaseRequestBuilder},
};

pub const TEST_TAG: &str = "v1.2.3";
pub const TEST_SHA: &str = "abc123";
pub const TEST_DOCS_URL: &str = "https://docs.example.com";
pub const TEST_API_KEY: &str = "docs-api-key";
pub const TEST_VERSION: &str = "1.2.3";

/// Creates a release request builder with all required fields set.
///
/// # Example
/// ```ignore
/// let request = test_release_request().prerelease(true).build().unwrap();
/// ```
pub fn test_release_request() -> ReleaseRequestBuilder {
    let mut builder = ReleaseRequest::builder();
    builder
        .owner("test")
        .repo("repo")
        .tag(TEST_TAG)
        .commit_sha(TEST_SHA)
        .release_notes("## Changes\n- fixed things\n")
        .token(SecretString::from("test-token".to_string()));
    builder
}

/// Creates a docs publish request builder pointing at [`TEST_DOCS_URL`].
pub fn test_docs_request(source_directory: &Path) -> DocPublishRequestBuilder {
    let mut builder = DocPublishRequest::builder();
    builder
        .source_directory(source_directory.to_path_buf())
        .api_key(SecretString::from(TEST_API_KEY.to_string()))
        .base_url(format!("{TEST_DOCS_URL}/"))
        .version(TEST_VERSION);
    builder
}

/// Creates a remote release in the given draft state.
pub fn test_release(id: u64, tag: &str, draft: bool) -> ForgeRelease {
    ForgeRelease {
        id,
        tag: tag.to_string(),
        name: Some(tag.to_string()),
        draft,
        prerelease: false,
        assets: vec![],
    }
}

/// Writes a file with the given content into `dir` and returns its path.
pub fn write_artifact(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
