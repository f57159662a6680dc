//! Connection settings for the GitHub-compatible release API.
use git_url_parse::GitUrl;
use secrecy::SecretString;

use crate::{
    error::{PublishError, Result},
    forge::{github::Github, traits::Forge},
};

/// Public GitHub API endpoint used when no enterprise base URL is given.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
/// Host name of public GitHub repositories.
pub const GITHUB_HOST: &str = "github.com";
/// Page size used when listing releases and pull requests.
pub const DEFAULT_PAGE_SIZE: u8 = 100;
/// Content type used for every uploaded release asset.
pub const ASSET_CONTENT_TYPE: &str = "application/octet-stream";

/// Remote repository connection configuration for authenticating and
/// interacting with the release API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Custom API base URL for enterprise deployments.
    pub api_base_url: Option<String>,
}

impl RemoteConfig {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: SecretString,
        api_base_url: Option<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token,
            api_base_url,
        }
    }

    /// API base URL with any trailing slash removed.
    pub fn base_uri(&self) -> String {
        self.api_base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Create the token-authenticated forge client for this remote.
    pub fn get_forge(&self) -> Result<Box<dyn Forge>> {
        Ok(Box::new(Github::new(self.clone())?))
    }
}

/// Owner, name and optional embedded token parsed from a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCoordinates {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
}

/// Parse an http(s) or ssh repository URL into its coordinates.
pub fn parse_repository_url(url: &str) -> Result<RepositoryCoordinates> {
    let parsed = GitUrl::parse(url.trim())?;

    let host = parsed.host.ok_or_else(|| {
        PublishError::InvalidRemoteUrl(format!("no host found in {url}"))
    })?;

    let owner = parsed.owner.ok_or_else(|| {
        PublishError::InvalidRemoteUrl(format!("no owner found in {url}"))
    })?;

    if parsed.name.is_empty() {
        return Err(PublishError::InvalidRemoteUrl(format!(
            "no repository name found in {url}"
        )));
    }

    Ok(RepositoryCoordinates {
        host,
        owner,
        repo: parsed.name,
        token: parsed.token,
    })
}

/// Split a GitHub repository URL into `(owner, repository name)`.
///
/// Fails when the URL does not point at github.com.
pub fn github_repository_info(url: &str) -> Result<(String, String)> {
    let coordinates = parse_repository_url(url)?;

    if !coordinates.host.eq_ignore_ascii_case(GITHUB_HOST) {
        return Err(PublishError::InvalidRemoteUrl(format!(
            "{url} must reference a GitHub repository"
        )));
    }

    Ok((coordinates.owner, coordinates.repo))
}
