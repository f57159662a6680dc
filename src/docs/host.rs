//! HTTP clients for the documentation host and blob storage.
use async_trait::async_trait;
use log::*;
#[cfg(test)]
use mockall::automock;
use bytes::Bytes;
use reqwest::{
    Client, Request, Url,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    docs::config::{
        ASSET_UPLOAD_PATH, PACKAGE_FILE_NAME, PROJECT_UPLOAD_PATH,
        SIGNED_UPLOAD_PATH, trim_base_url,
    },
    error::Result,
};

/// Header required by blob storage for single-shot uploads.
const BLOB_TYPE_HEADER: &str = "x-ms-blob-type";
const BLOB_TYPE_BLOCK: &str = "BlockBlob";

/// Status code and body of a docs host response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResponse {
    pub status: u16,
    pub body: String,
}

impl HostResponse {
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }
}

/// Whether a status code is in the 200-299 range.
pub fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

#[derive(Debug, Clone)]
/// Request to upload a packaged documentation archive.
pub struct ProjectUpload {
    pub api_key: SecretString,
    pub version: String,
    pub markdown_changelog: Option<String>,
    pub package: Vec<u8>,
}

#[derive(Debug, Clone)]
/// Request for a signed direct-to-storage upload link.
pub struct UploadLinkRequest {
    pub api_key: SecretString,
    pub version: String,
    pub file_name: String,
    pub file_size: u64,
}

#[derive(Debug, Clone)]
/// Request to upload an asset through the docs host.
pub struct AssetUpload {
    pub api_key: SecretString,
    pub version: String,
    pub file_name: String,
    pub content: Bytes,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UploadLinkBody<'a> {
    file_name: &'a str,
    file_size_in_bytes: u64,
}

/// Documentation host API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocsHost: Send + Sync {
    async fn upload_project(&self, req: ProjectUpload) -> Result<HostResponse>;
    async fn request_upload_link(
        &self,
        req: UploadLinkRequest,
    ) -> Result<HostResponse>;
    async fn upload_asset(&self, req: AssetUpload) -> Result<HostResponse>;
}

/// Storage accepting uploads to pre-signed URLs.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload the content to the signed link and return the status code.
    async fn put_blob(
        &self,
        upload_link: String,
        content: Bytes,
    ) -> Result<u16>;
}

/// A multipart form value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormValue {
    Text(String),
    File { file_name: String, content: Bytes },
}

/// Named multipart fields, in the order they are sent.
type FormFields = Vec<(&'static str, FormValue)>;

fn project_fields(req: ProjectUpload) -> FormFields {
    let mut fields = vec![
        ("ApiKey", FormValue::Text(req.api_key.expose_secret().to_string())),
        ("Version", FormValue::Text(req.version)),
    ];

    if let Some(changelog) = req
        .markdown_changelog
        .filter(|text| !text.trim().is_empty())
    {
        fields.push(("MarkdownChangelog", FormValue::Text(changelog)));
    }

    fields.push((
        "ProjectPackage",
        FormValue::File {
            file_name: PACKAGE_FILE_NAME.to_string(),
            content: Bytes::from(req.package),
        },
    ));

    fields
}

fn asset_fields(req: AssetUpload) -> FormFields {
    vec![
        ("ApiKey", FormValue::Text(req.api_key.expose_secret().to_string())),
        ("Version", FormValue::Text(req.version)),
        (
            "AssetFile",
            FormValue::File {
                file_name: req.file_name,
                content: req.content,
            },
        ),
    ]
}

fn into_form(fields: FormFields) -> Form {
    fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File { file_name, content } => {
                let length = content.len() as u64;
                let part = Part::stream_with_length(content, length)
                    .file_name(file_name);
                form.part(name, part)
            }
        })
}

/// WebDocu implementation of [`DocsHost`] using reqwest.
pub struct WebDocu {
    base_url: String,
    client: Client,
}

impl WebDocu {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            base_url: trim_base_url(base_url).to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn project_upload_request(&self, req: ProjectUpload) -> Result<Request> {
        Ok(self
            .client
            .post(self.endpoint(PROJECT_UPLOAD_PATH))
            .multipart(into_form(project_fields(req)))
            .build()?)
    }

    fn upload_link_request(&self, req: &UploadLinkRequest) -> Result<Request> {
        let url = Url::parse_with_params(
            &self.endpoint(SIGNED_UPLOAD_PATH),
            &[
                ("apiKey", req.api_key.expose_secret()),
                ("version", req.version.as_str()),
            ],
        )?;

        let body = UploadLinkBody {
            file_name: &req.file_name,
            file_size_in_bytes: req.file_size,
        };

        Ok(self.client.post(url).json(&body).build()?)
    }

    fn asset_upload_request(&self, req: AssetUpload) -> Result<Request> {
        Ok(self
            .client
            .post(self.endpoint(ASSET_UPLOAD_PATH))
            .multipart(into_form(asset_fields(req)))
            .build()?)
    }

    async fn send(&self, request: Request) -> Result<HostResponse> {
        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HostResponse { status, body })
    }
}

#[async_trait]
impl DocsHost for WebDocu {
    async fn upload_project(&self, req: ProjectUpload) -> Result<HostResponse> {
        let request = self.project_upload_request(req)?;
        info!("uploading documentation package to {}", request.url());
        self.send(request).await
    }

    async fn request_upload_link(
        &self,
        req: UploadLinkRequest,
    ) -> Result<HostResponse> {
        let request = self.upload_link_request(&req)?;
        self.send(request).await
    }

    async fn upload_asset(&self, req: AssetUpload) -> Result<HostResponse> {
        let request = self.asset_upload_request(req)?;
        self.send(request).await
    }
}

/// [`BlobStore`] uploading with a single HTTP PUT.
pub struct HttpBlobStore {
    client: Client,
}

impl HttpBlobStore {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
        })
    }

    fn put_request(
        &self,
        upload_link: &str,
        content: Bytes,
    ) -> Result<Request> {
        Ok(self
            .client
            .put(upload_link)
            .header(BLOB_TYPE_HEADER, BLOB_TYPE_BLOCK)
            .body(content)
            .build()?)
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put_blob(
        &self,
        upload_link: String,
        content: Bytes,
    ) -> Result<u16> {
        let request = self.put_request(&upload_link, content)?;
        let response = self.client.execute(request).await?;
        Ok(response.status().as_u16())
    }
}
