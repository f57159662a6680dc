//! Settings for documentation and asset uploads.
use derive_builder::Builder;
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};

use crate::{
    error::{PublishError, Result},
    forge::request::require,
    path_helpers::normalize_path_filename,
};

/// Environment variable consulted for the docs host API key.
pub const API_KEY_ENV_VAR: &str = "WEBDOCU_API_KEY";
/// File name of the packaged documentation as sent to the host.
pub const PACKAGE_FILE_NAME: &str = "docs.zip";
/// Endpoint receiving documentation packages.
pub const PROJECT_UPLOAD_PATH: &str = "/API/Projects/Upload";
/// Endpoint granting signed direct-to-storage upload links.
pub const SIGNED_UPLOAD_PATH: &str = "/API/ProjectAssets/SASUpload";
/// Endpoint receiving assets proxied through the docs host.
pub const ASSET_UPLOAD_PATH: &str = "/API/ProjectAssets/Upload";

/// Settings for publishing a documentation package and its assets.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct DocPublishRequest {
    /// Directory packaged into the documentation archive
    #[builder(default)]
    pub source_directory: PathBuf,
    pub api_key: SecretString,
    /// Base URL of the documentation host
    pub base_url: String,
    /// Version the documentation and assets are published under
    pub version: String,
    /// Optional markdown changelog shown next to the version
    #[builder(default, setter(into, strip_option))]
    pub markdown_changelog: Option<String>,
    /// Asset files uploaded after the package, in this order
    #[builder(default)]
    pub asset_file_paths: Vec<PathBuf>,
    /// Treat an existing version (HTTP 409) as success and skip the assets
    #[builder(default)]
    pub skip_on_version_conflict: bool,
}

impl DocPublishRequest {
    pub fn builder() -> DocPublishRequestBuilder {
        DocPublishRequestBuilder::default()
    }

    /// Validate the settings shared by package and asset uploads.
    pub fn validate(&self) -> Result<()> {
        require("api_key", self.api_key.expose_secret())?;
        require("base_url", &self.base_url)?;
        require("version", &self.version)
    }

    /// Validate the settings needed to package and upload documentation.
    pub fn validate_package(&self) -> Result<()> {
        self.validate()?;

        if self.source_directory.as_os_str().is_empty() {
            return Err(PublishError::missing("source_directory"));
        }

        if !self.source_directory.is_dir() {
            return Err(PublishError::Validation(format!(
                "source_directory {} is not a directory",
                self.source_directory.display()
            )));
        }

        Ok(())
    }

    /// Changelog text when it carries any content.
    pub fn changelog(&self) -> Option<&str> {
        self.markdown_changelog
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Docs host base URL without trailing slashes.
pub fn trim_base_url(base_url: &str) -> &str {
    base_url.trim().trim_end_matches('/')
}

/// Version of a NuGet package taken from its file name, so
/// `Dangl.Docs.1.2.3.nupkg` of project `Dangl.Docs` yields `1.2.3`.
pub fn version_from_package_filename(
    path: &Path,
    project_name: &str,
) -> Result<String> {
    let file_name = normalize_path_filename(path);
    let without_extension =
        file_name.strip_suffix(".nupkg").unwrap_or(&file_name);
    let prefix = format!("{}.", project_name.trim());
    let version = without_extension
        .strip_prefix(&prefix)
        .unwrap_or(without_extension);

    if version.is_empty() {
        return Err(PublishError::Validation(format!(
            "no version found in package file name {}",
            path.display()
        )));
    }

    Ok(version.to_string())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn builder() -> DocPublishRequestBuilder {
        let mut builder = DocPublishRequest::builder();
        builder
            .api_key(SecretString::from("key".to_string()))
            .base_url("https://docs.example.com")
            .version("1.0.0");
        builder
    }

    #[test]
    fn asset_only_requests_need_no_source_directory() {
        let request = builder().build().unwrap();
        assert!(request.validate().is_ok());
        assert!(matches!(
            request.validate_package(),
            Err(PublishError::Validation(_))
        ));
    }

    #[test]
    fn package_requests_need_an_existing_directory() {
        let tmp = TempDir::new().unwrap();
        let request = builder()
            .source_directory(tmp.path().to_path_buf())
            .build()
            .unwrap();
        assert!(request.validate_package().is_ok());

        let request = builder()
            .source_directory(tmp.path().join("missing"))
            .build()
            .unwrap();
        assert!(request.validate_package().is_err());
    }

    #[test]
    fn requires_version() {
        let request = builder().version(" ").build().unwrap();
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn blank_changelog_is_omitted() {
        let request = builder().markdown_changelog("  \n").build().unwrap();
        assert_eq!(request.changelog(), None);

        let request = builder().markdown_changelog("## 1.0.0").build().unwrap();
        assert_eq!(request.changelog(), Some("## 1.0.0"));
    }

    #[test]
    fn trims_trailing_slashes() {
        assert_eq!(
            trim_base_url("https://docs.example.com//"),
            "https://docs.example.com"
        );
    }

    #[test]
    fn extracts_version_from_package_file_name() {
        let path = Path::new("output/Dangl.Docs.1.2.3-beta.4.nupkg");
        let version =
            version_from_package_filename(path, "Dangl.Docs").unwrap();
        assert_eq!(version, "1.2.3-beta.4");
    }

    #[test]
    fn package_without_version_is_rejected() {
        let path = Path::new("Dangl.Docs..nupkg");
        let err =
            version_from_package_filename(path, "Dangl.Docs").unwrap_err();
        assert!(matches!(err, PublishError::Validation(_)));
    }
}
