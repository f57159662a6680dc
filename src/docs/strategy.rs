//! Asset upload strategies.
//!
//! Assets are offered to an ordered list of strategies until one of them
//! uploads the file. The default chain first tries a direct transfer to blob
//! storage through a signed link granted by the docs host and falls back to
//! uploading through the docs host itself.
use async_trait::async_trait;
use bytes::Bytes;
use log::*;
use std::path::Path;

use crate::{
    docs::{
        config::DocPublishRequest,
        host::{
            AssetUpload, BlobStore, DocsHost, UploadLinkRequest,
            is_success_status,
        },
    },
    error::{PublishError, Result},
    path_helpers::normalize_path_filename,
};

/// Link fields the docs host has been seen to use for signed upload links.
const UPLOAD_LINK_FIELDS: [&str; 2] = ["UploadLink", "uploadLink"];

/// Outcome of uploading a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetUploadOutcome {
    UploadedViaDirectTransfer,
    UploadedViaProxy,
    /// The strategy could not upload the asset, the next one may try
    Failed,
}

/// An asset file read into memory under its remote-visible name.
#[derive(Debug, Clone)]
pub struct AssetFile {
    pub file_name: String,
    /// Shared buffer, cloning does not copy the file
    pub content: Bytes,
}

impl AssetFile {
    pub async fn read(path: &Path) -> Result<Self> {
        let file_name = normalize_path_filename(path);

        if file_name.is_empty() {
            return Err(PublishError::Validation(format!(
                "asset path {} has no file name",
                path.display()
            )));
        }

        let content = tokio::fs::read(path)
            .await
            .map_err(|err| PublishError::file(path, err))?;

        Ok(Self {
            file_name,
            content: Bytes::from(content),
        })
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

#[async_trait]
pub trait UploadStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Upload the asset. `Ok(AssetUploadOutcome::Failed)` hands over to the
    /// next strategy, an error aborts the upload.
    async fn upload(
        &self,
        asset: &AssetFile,
        request: &DocPublishRequest,
    ) -> Result<AssetUploadOutcome>;
}

/// Uploads straight to blob storage through a signed link.
pub struct DirectTransfer<'a> {
    host: &'a dyn DocsHost,
    store: &'a dyn BlobStore,
}

impl<'a> DirectTransfer<'a> {
    pub fn new(host: &'a dyn DocsHost, store: &'a dyn BlobStore) -> Self {
        Self { host, store }
    }

    async fn signed_link(
        &self,
        asset: &AssetFile,
        request: &DocPublishRequest,
    ) -> Option<String> {
        let response = self
            .host
            .request_upload_link(UploadLinkRequest {
                api_key: request.api_key.clone(),
                version: request.version.clone(),
                file_name: asset.file_name.clone(),
                file_size: asset.size(),
            })
            .await;

        match response {
            Ok(response) if response.is_success() => {
                let link = upload_link(&response.body);
                if link.is_none() {
                    debug!("signed upload response carried no upload link");
                }
                link
            }
            Ok(response) => {
                debug!(
                    "signed upload link was refused with status {}",
                    response.status
                );
                None
            }
            Err(err) => {
                debug!("failed to request signed upload link: {err}");
                None
            }
        }
    }
}

#[async_trait]
impl UploadStrategy for DirectTransfer<'_> {
    fn name(&self) -> &'static str {
        "direct transfer"
    }

    async fn upload(
        &self,
        asset: &AssetFile,
        request: &DocPublishRequest,
    ) -> Result<AssetUploadOutcome> {
        let Some(link) = self.signed_link(asset, request).await else {
            return Ok(AssetUploadOutcome::Failed);
        };

        match self.store.put_blob(link, asset.content.clone()).await {
            Ok(status) if is_success_status(status) => {
                Ok(AssetUploadOutcome::UploadedViaDirectTransfer)
            }
            Ok(status) => {
                debug!("blob storage rejected upload with status {status}");
                Ok(AssetUploadOutcome::Failed)
            }
            Err(err) => {
                debug!("blob storage upload failed: {err}");
                Ok(AssetUploadOutcome::Failed)
            }
        }
    }
}

/// Uploads through the docs host. Failures are final.
pub struct ProxiedUpload<'a> {
    host: &'a dyn DocsHost,
}

impl<'a> ProxiedUpload<'a> {
    pub fn new(host: &'a dyn DocsHost) -> Self {
        Self { host }
    }
}

#[async_trait]
impl UploadStrategy for ProxiedUpload<'_> {
    fn name(&self) -> &'static str {
        "proxied upload"
    }

    async fn upload(
        &self,
        asset: &AssetFile,
        request: &DocPublishRequest,
    ) -> Result<AssetUploadOutcome> {
        let response = self
            .host
            .upload_asset(AssetUpload {
                api_key: request.api_key.clone(),
                version: request.version.clone(),
                file_name: asset.file_name.clone(),
                content: asset.content.clone(),
            })
            .await?;

        if !response.is_success() {
            return Err(PublishError::upload(
                format!("Upload of asset {}", asset.file_name),
                response.status,
                response.body,
            ));
        }

        Ok(AssetUploadOutcome::UploadedViaProxy)
    }
}

/// Tries each strategy in order until one uploads the asset.
pub struct AssetUploader<'a> {
    strategies: Vec<Box<dyn UploadStrategy + 'a>>,
}

impl<'a> AssetUploader<'a> {
    /// Direct transfer first, proxied upload as fallback.
    pub fn new(host: &'a dyn DocsHost, store: &'a dyn BlobStore) -> Self {
        let strategies: Vec<Box<dyn UploadStrategy + 'a>> = vec![
            Box::new(DirectTransfer::new(host, store)),
            Box::new(ProxiedUpload::new(host)),
        ];
        Self::with_strategies(strategies)
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn UploadStrategy + 'a>>,
    ) -> Self {
        Self { strategies }
    }

    pub async fn upload_asset(
        &self,
        path: &Path,
        request: &DocPublishRequest,
    ) -> Result<AssetUploadOutcome> {
        debug!("uploading asset {}", path.display());

        let asset = AssetFile::read(path).await?;

        for strategy in self.strategies.iter() {
            match strategy.upload(&asset, request).await? {
                AssetUploadOutcome::Failed => {
                    debug!(
                        "{} did not upload {}: trying next strategy",
                        strategy.name(),
                        asset.file_name
                    );
                }
                outcome => {
                    info!(
                        "uploaded asset {} via {}",
                        asset.file_name,
                        strategy.name()
                    );
                    return Ok(outcome);
                }
            }
        }

        Err(PublishError::Transfer(format!(
            "no upload strategy accepted asset {}",
            asset.file_name
        )))
    }
}

/// Extract the signed upload link from a loosely typed JSON response,
/// accepting either casing of the link field.
pub fn upload_link(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;

    UPLOAD_LINK_FIELDS
        .iter()
        .filter_map(|field| json.get(*field).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|link| !link.is_empty())
        .map(str::to_string)
}
