//! Documentation package publishing.
use log::*;

use crate::{
    archive::archive_directory,
    docs::{
        config::DocPublishRequest,
        host::{BlobStore, DocsHost, HttpBlobStore, ProjectUpload, WebDocu},
        strategy::{AssetUploadOutcome, AssetUploader},
    },
    error::{PublishError, Result},
    jenkins::fix_source_links_if_in_jenkins,
};

/// Result of a documentation publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsOutcome {
    /// The package was uploaded followed by its assets
    Published { assets: Vec<AssetUploadOutcome> },
    /// The version already existed and conflicts are configured to be skipped
    SkippedVersionConflict,
}

/// Package the source directory and publish it to the docs host configured
/// in the request, then upload the configured assets.
pub async fn publish_docs(request: &DocPublishRequest) -> Result<()> {
    request.validate_package()?;

    fix_source_links_if_in_jenkins(&request.source_directory)?;

    let host = WebDocu::new(&request.base_url)?;
    let store = HttpBlobStore::new()?;

    publish_docs_with(&host, &store, request).await?;

    Ok(())
}

/// Package and publish documentation through the given host and storage.
pub async fn publish_docs_with(
    host: &dyn DocsHost,
    store: &dyn BlobStore,
    request: &DocPublishRequest,
) -> Result<DocsOutcome> {
    request.validate_package()?;

    let package = archive_directory(&request.source_directory)?;

    let response = host
        .upload_project(ProjectUpload {
            api_key: request.api_key.clone(),
            version: request.version.clone(),
            markdown_changelog: request.changelog().map(str::to_string),
            package,
        })
        .await?;

    if !response.is_success() {
        if response.is_conflict() && request.skip_on_version_conflict {
            warn!(
                "docs host returned 409 Conflict for version {}: the version \
                 likely exists already, skipping package and asset uploads",
                request.version
            );
            return Ok(DocsOutcome::SkippedVersionConflict);
        }

        return Err(PublishError::upload(
            "Documentation upload",
            response.status,
            response.body,
        ));
    }

    info!("uploaded documentation for version {}", request.version);

    let assets = upload_assets_with(host, store, request).await?;

    Ok(DocsOutcome::Published { assets })
}

/// Upload only the configured asset files, without a documentation package.
pub async fn upload_doc_assets(request: &DocPublishRequest) -> Result<()> {
    request.validate()?;

    let host = WebDocu::new(&request.base_url)?;
    let store = HttpBlobStore::new()?;

    upload_assets_with(&host, &store, request).await?;

    Ok(())
}

/// Upload each configured asset in order. The first failure aborts.
pub async fn upload_assets_with(
    host: &dyn DocsHost,
    store: &dyn BlobStore,
    request: &DocPublishRequest,
) -> Result<Vec<AssetUploadOutcome>> {
    request.validate()?;

    let uploader = AssetUploader::new(host, store);
    let mut outcomes = Vec::with_capacity(request.asset_file_paths.len());

    for path in request.asset_file_paths.iter() {
        outcomes.push(uploader.upload_asset(path, request).await?);
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests;
