use derive_builder::Builder;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::path::PathBuf;

use crate::{
    error::{PublishError, Result},
    forge::config::RemoteConfig,
};

/// Settings for publishing a release with its artifacts.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ReleaseRequest {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Tag the release is created for
    pub tag: String,
    /// Display name of the release, defaults to the tag
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,
    /// Commit the tag is created from when it does not exist yet
    pub commit_sha: String,
    /// Markdown body of the release
    #[builder(default)]
    pub release_notes: String,
    #[builder(default)]
    pub prerelease: bool,
    /// Files attached to the release, uploaded in this order
    #[builder(default)]
    pub artifact_paths: Vec<PathBuf>,
    pub token: SecretString,
    /// Custom API base URL for enterprise deployments
    #[builder(default, setter(into, strip_option))]
    pub api_base_url: Option<String>,
}

impl ReleaseRequest {
    pub fn builder() -> ReleaseRequestBuilder {
        ReleaseRequestBuilder::default()
    }

    /// Reject requests with empty required fields before touching the
    /// network.
    pub fn validate(&self) -> Result<()> {
        require("owner", &self.owner)?;
        require("repo", &self.repo)?;
        require("tag", &self.tag)?;
        require("commit_sha", &self.commit_sha)?;
        require("token", self.token.expose_secret())
    }

    /// Release name, falling back to the tag when not set.
    pub fn release_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.tag)
            .to_string()
    }

    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig::new(
            &self.owner,
            &self.repo,
            self.token.clone(),
            self.api_base_url.clone(),
        )
    }
}

/// Settings for opening a pull request.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct PullRequestRequest {
    pub owner: String,
    pub repo: String,
    /// Branch containing the changes
    pub head: String,
    /// Branch the changes are merged into
    pub base: String,
    pub title: String,
    #[builder(default, setter(into, strip_option))]
    pub body: Option<String>,
    pub token: SecretString,
    #[builder(default, setter(into, strip_option))]
    pub api_base_url: Option<String>,
}

impl PullRequestRequest {
    pub fn builder() -> PullRequestRequestBuilder {
        PullRequestRequestBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        require("owner", &self.owner)?;
        require("repo", &self.repo)?;
        require("head", &self.head)?;
        require("base", &self.base)?;
        require("title", &self.title)?;
        require("token", self.token.expose_secret())
    }

    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig::new(
            &self.owner,
            &self.repo,
            self.token.clone(),
            self.api_base_url.clone(),
        )
    }
}

/// Settings for listing the releases of a repository.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ReleaseListRequest {
    pub owner: String,
    pub repo: String,
    pub token: SecretString,
    #[builder(default, setter(into, strip_option))]
    pub api_base_url: Option<String>,
    /// Stop after this many releases, newest first
    #[builder(default, setter(into, strip_option))]
    pub max_releases: Option<usize>,
}

impl ReleaseListRequest {
    pub fn builder() -> ReleaseListRequestBuilder {
        ReleaseListRequestBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        require("owner", &self.owner)?;
        require("repo", &self.repo)?;
        require("token", self.token.expose_secret())
    }

    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig::new(
            &self.owner,
            &self.repo,
            self.token.clone(),
            self.api_base_url.clone(),
        )
    }
}

pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PublishError::missing(field));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Release as reported by the forge.
pub struct ForgeRelease {
    pub id: u64,
    pub tag: String,
    pub name: Option<String>,
    pub draft: bool,
    pub prerelease: bool,
    /// Names of the assets attached to the release
    pub assets: Vec<String>,
}

#[derive(Debug, Clone)]
/// Request to create a new release.
pub struct CreateReleaseRequest {
    pub tag: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

#[derive(Debug, Clone)]
/// Request to attach a binary asset to a release.
pub struct UploadAssetRequest {
    pub release_id: u64,
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
/// Request to get open pull requests by branch names.
pub struct GetPrRequest {
    pub head_branch: String,
    pub base_branch: String,
}

#[derive(Debug, Clone)]
/// Request to create a new pull request.
pub struct CreatePrRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Pull request information.
pub struct PullRequest {
    pub number: u64,
    pub head_branch: String,
    pub base_branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Repository information.
pub struct RepositoryInfo {
    pub id: u64,
    pub owner: Option<String>,
    pub name: String,
    pub full_name: Option<String>,
    pub default_branch: Option<String>,
}
