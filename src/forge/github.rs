//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, models, params};
use url::form_urlencoded;

use crate::{
    error::Result,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{
            CreatePrRequest, CreateReleaseRequest, ForgeRelease, GetPrRequest,
            PullRequest, RepositoryInfo, UploadAssetRequest,
        },
        traits::Forge,
    },
};

/// GitHub forge implementation using Octocrab for API interactions with
/// releases, release assets, pull requests and repositories.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.base_uri();
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri)?
            .build()?;

        Ok(Self { config, instance })
    }

    /// GitHub expects the head filter in `owner:branch` form.
    fn qualified_head(&self, head_branch: &str) -> String {
        if head_branch.contains(':') {
            head_branch.to_string()
        } else {
            format!("{}:{head_branch}", self.config.owner)
        }
    }
}

/// Percent-encode an asset name for the `name` query parameter. octocrab
/// appends the name to the upload URL as is.
fn encode_asset_name(file_name: &str) -> String {
    form_urlencoded::byte_serialize(file_name.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

impl From<models::repos::Release> for ForgeRelease {
    fn from(release: models::repos::Release) -> Self {
        Self {
            id: release.id.into_inner(),
            tag: release.tag_name,
            name: release.name,
            draft: release.draft,
            prerelease: release.prerelease,
            assets: release.assets.into_iter().map(|a| a.name).collect(),
        }
    }
}

impl From<models::pulls::PullRequest> for PullRequest {
    fn from(pr: models::pulls::PullRequest) -> Self {
        Self {
            number: pr.number,
            head_branch: pr.head.ref_field,
            base_branch: pr.base.ref_field,
        }
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn get_repository(&self) -> Result<RepositoryInfo> {
        let repo = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get()
            .await?;

        Ok(RepositoryInfo {
            id: repo.id.into_inner(),
            owner: repo.owner.map(|o| o.login),
            name: repo.name,
            full_name: repo.full_name,
            default_branch: repo.default_branch,
        })
    }

    async fn list_releases(
        &self,
        max_releases: Option<usize>,
    ) -> Result<Vec<ForgeRelease>> {
        let page = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .list()
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        let mut releases = self
            .instance
            .all_pages(page)
            .await?
            .into_iter()
            .map(ForgeRelease::from)
            .collect::<Vec<ForgeRelease>>();

        if let Some(max) = max_releases {
            releases.truncate(max);
        }

        debug!(
            "found {} releases for {}/{}",
            releases.len(),
            self.config.owner,
            self.config.repo
        );

        Ok(releases)
    }

    async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<ForgeRelease> {
        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag)
            .target_commitish(&req.target_commitish)
            .name(&req.name)
            .body(&req.body)
            .draft(req.draft)
            .prerelease(req.prerelease)
            .send()
            .await?;

        Ok(release.into())
    }

    async fn get_release(&self, release_id: u64) -> Result<ForgeRelease> {
        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .get(release_id)
            .await?;

        Ok(release.into())
    }

    async fn upload_release_asset(
        &self,
        req: UploadAssetRequest,
    ) -> Result<()> {
        debug!(
            "uploading {} ({} bytes, {}) to release {}",
            req.file_name,
            req.content.len(),
            req.content_type,
            req.release_id
        );

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .upload_asset(
                req.release_id,
                &encode_asset_name(&req.file_name),
                req.content.into(),
            )
            .send()
            .await?;

        Ok(())
    }

    async fn update_release_draft(
        &self,
        release_id: u64,
        draft: bool,
    ) -> Result<ForgeRelease> {
        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .update(release_id)
            .draft(draft)
            .send()
            .await?;

        Ok(release.into())
    }

    async fn list_open_prs(
        &self,
        req: GetPrRequest,
    ) -> Result<Vec<PullRequest>> {
        let page = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Open)
            .head(self.qualified_head(&req.head_branch))
            .base(&req.base_branch)
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        let prs = self.instance.all_pages(page).await?;

        Ok(prs.into_iter().map(PullRequest::from).collect())
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let pulls = self.instance.pulls(&self.config.owner, &self.config.repo);

        let mut builder =
            pulls.create(req.title, req.head_branch, req.base_branch);

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let pr = builder.send().await?;

        info!("created pull request #{}", pr.number);

        Ok(pr.into())
    }
}
