//! Traits related to the remote release API
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{
            CreatePrRequest, CreateReleaseRequest, ForgeRelease, GetPrRequest,
            PullRequest, RepositoryInfo, UploadAssetRequest,
        },
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;
    async fn get_repository(&self) -> Result<RepositoryInfo>;
    async fn list_releases(
        &self,
        max_releases: Option<usize>,
    ) -> Result<Vec<ForgeRelease>>;
    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ForgeRelease>;
    async fn get_release(&self, release_id: u64) -> Result<ForgeRelease>;
    async fn upload_release_asset(
        &self,
        req: UploadAssetRequest,
    ) -> Result<()>;
    async fn update_release_draft(
        &self,
        release_id: u64,
        draft: bool,
    ) -> Result<ForgeRelease>;
    async fn list_open_prs(
        &self,
        req: GetPrRequest,
    ) -> Result<Vec<PullRequest>>;
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;
}
