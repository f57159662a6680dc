//! Client interface for the GitHub-compatible release API.
//!
//! Provides token-based authentication, release management, release asset
//! uploads, pull request operations and repository information through a
//! common trait.
use crate::{
    error::Result,
    forge::{config::RemoteConfig, request::RepositoryInfo},
};

/// Configuration and authentication for the release API.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common trait for release API abstraction.
pub mod traits;

/// Look up the repository described by the remote configuration.
pub async fn get_repository(config: &RemoteConfig) -> Result<RepositoryInfo> {
    let forge = config.get_forge()?;
    forge.get_repository().await
}
