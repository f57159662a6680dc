//! Idempotent GitHub release publishing.
//!
//! A release is created as a draft, its artifacts are attached one by one and
//! only then is it flipped to published. The stages are modelled as separate
//! types ([`DraftRelease`] → [`AttachedRelease`] → [`PublishedRelease`]) so
//! a release can only be published once every asset has been attached. A
//! failure at any point leaves an invisible draft behind and surfaces the
//! error; nothing is retried.
use log::*;
use std::path::{Path, PathBuf};

use crate::{
    error::{PublishError, Result},
    forge::{
        config::ASSET_CONTENT_TYPE,
        request::{
            CreateReleaseRequest, ForgeRelease, ReleaseListRequest,
            ReleaseRequest, UploadAssetRequest,
        },
        traits::Forge,
    },
};

/// Lifecycle stage of a release created by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStage {
    Draft,
    AssetsAttached,
    Published,
}

/// Result of a publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// A release for the tag already existed, nothing was changed
    AlreadyExists,
    /// A new release was created, its assets attached and it was published
    Published(ForgeRelease),
}

/// A freshly created release that is not yet visible to consumers.
pub struct DraftRelease<'a> {
    forge: &'a dyn Forge,
    release: ForgeRelease,
}

impl<'a> DraftRelease<'a> {
    /// Create the release in draft state and re-fetch it so the full remote
    /// state is available for asset uploads.
    pub async fn create(
        forge: &'a dyn Forge,
        request: &ReleaseRequest,
    ) -> Result<Self> {
        let created = forge
            .create_release(CreateReleaseRequest {
                tag: request.tag.clone(),
                target_commitish: request.commit_sha.clone(),
                name: request.release_name(),
                body: request.release_notes.clone(),
                draft: true,
                prerelease: request.prerelease,
            })
            .await?;

        info!("created draft release {} for tag {}", created.id, request.tag);

        let release = forge.get_release(created.id).await?;

        Ok(Self { forge, release })
    }

    pub fn stage(&self) -> ReleaseStage {
        ReleaseStage::Draft
    }

    pub fn release(&self) -> &ForgeRelease {
        &self.release
    }

    /// Upload every artifact in order. The first failure aborts the whole
    /// operation and the release stays a draft.
    pub async fn attach_assets(
        mut self,
        artifact_paths: &[PathBuf],
    ) -> Result<AttachedRelease<'a>> {
        for path in artifact_paths {
            let file_name = asset_file_name(path)?;
            let content = tokio::fs::read(path)
                .await
                .map_err(|err| PublishError::file(path, err))?;

            info!(
                "uploading asset {file_name} to release {}",
                self.release.id
            );

            self.forge
                .upload_release_asset(UploadAssetRequest {
                    release_id: self.release.id,
                    file_name: file_name.clone(),
                    content_type: ASSET_CONTENT_TYPE.to_string(),
                    content,
                })
                .await?;

            self.release.assets.push(file_name);
        }

        Ok(AttachedRelease {
            forge: self.forge,
            release: self.release,
        })
    }
}

/// A draft release with all of its assets uploaded.
pub struct AttachedRelease<'a> {
    forge: &'a dyn Forge,
    release: ForgeRelease,
}

impl AttachedRelease<'_> {
    pub fn stage(&self) -> ReleaseStage {
        ReleaseStage::AssetsAttached
    }

    pub fn release(&self) -> &ForgeRelease {
        &self.release
    }

    /// Make the release publicly visible.
    pub async fn publish(self) -> Result<PublishedRelease> {
        let release = self
            .forge
            .update_release_draft(self.release.id, false)
            .await?;

        info!("published release {} ({})", release.id, release.tag);

        Ok(PublishedRelease { release })
    }
}

/// A release visible to consumers.
pub struct PublishedRelease {
    release: ForgeRelease,
}

impl PublishedRelease {
    pub fn stage(&self) -> ReleaseStage {
        ReleaseStage::Published
    }

    pub fn release(&self) -> &ForgeRelease {
        &self.release
    }

    pub fn into_release(self) -> ForgeRelease {
        self.release
    }
}

/// File name used for a release asset: the last path component.
fn asset_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| {
            PublishError::Transfer(format!(
                "cannot infer an asset file name from {}",
                path.display()
            ))
        })
}

/// Publish a GitHub release for the request, creating the authenticated
/// client from its settings.
pub async fn publish_release(request: &ReleaseRequest) -> Result<()> {
    request.validate()?;
    let forge = request.remote_config().get_forge()?;
    publish_release_with(forge.as_ref(), request).await?;
    Ok(())
}

/// Publish a release through the given forge.
///
/// Safe to re-run: when a release for the tag already exists the call
/// returns after the listing request without changing anything.
pub async fn publish_release_with(
    forge: &dyn Forge,
    request: &ReleaseRequest,
) -> Result<ReleaseOutcome> {
    request.validate()?;

    let existing = forge.list_releases(None).await?;

    if existing.iter().any(|r| r.tag == request.tag) {
        info!(
            "release for tag {} already exists in {}/{}: nothing to do",
            request.tag, request.owner, request.repo
        );
        return Ok(ReleaseOutcome::AlreadyExists);
    }

    let draft = DraftRelease::create(forge, request).await?;
    let attached = draft.attach_assets(&request.artifact_paths).await?;
    let published = attached.publish().await?;

    Ok(ReleaseOutcome::Published(published.into_release()))
}

/// List the releases of the repository named in the request.
pub async fn list_releases(
    request: &ReleaseListRequest,
) -> Result<Vec<ForgeRelease>> {
    request.validate()?;
    let forge = request.remote_config().get_forge()?;
    get_releases(forge.as_ref(), request.max_releases).await
}

/// List releases of a repository, newest first, optionally limited.
pub async fn get_releases(
    forge: &dyn Forge,
    max_releases: Option<usize>,
) -> Result<Vec<ForgeRelease>> {
    forge.list_releases(max_releases).await
}
