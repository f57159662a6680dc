//! Error types for publishing releases, pull requests and documentation.

use thiserror::Error;

/// Main error type for publishing operations.
#[derive(Error, Debug)]
pub enum PublishError {
    // Request errors
    #[error("Invalid request: {0}")]
    Validation(String),

    // Remote API errors
    #[error("API authentication failed: {0}")]
    Authentication(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("{context} failed with status code: {status}\n{body}")]
    Upload {
        context: String,
        status: u16,
        body: String,
    },

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Forge operation failed: {0}")]
    Forge(String),

    // Network errors
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Invalid repository URL: {0}")]
    InvalidRemoteUrl(String),

    #[error("Git URL parse error: {0}")]
    GitUrl(#[from] git_url_parse::GitUrlParseError),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regular expression error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Logger initialization error: {0}")]
    Logger(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using PublishError
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    /// Create a validation error for a required request field
    pub fn missing(field: &str) -> Self {
        Self::Validation(format!("{field} must not be empty"))
    }

    /// Create an upload error from a non-success response
    pub fn upload(
        context: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::Upload {
            context: context.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a transfer error for a local file that could not be read
    pub fn file(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Transfer(format!("failed to read {}: {err}", path.display()))
    }

    /// Status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upload { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Implement From for std::io::Error - local I/O failures are transfer errors
impl From<std::io::Error> for PublishError {
    fn from(err: std::io::Error) -> Self {
        Self::Transfer(err.to_string())
    }
}

impl From<walkdir::Error> for PublishError {
    fn from(err: walkdir::Error) -> Self {
        Self::Transfer(err.to_string())
    }
}

// Implement From for reqwest errors (network/API)
impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status()
            && let Some(status) = err.status()
        {
            match status.as_u16() {
                401 | 403 => Self::Authentication(err.to_string()),
                404 => Self::NotFound(err.to_string()),
                409 => Self::Conflict(err.to_string()),
                _ => Self::Network(err.to_string()),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for PublishError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                match source.status_code.as_u16() {
                    401 | 403 => Self::Authentication(source.message.clone()),
                    404 => Self::NotFound(source.message.clone()),
                    409 | 422 => Self::Conflict(source.message.clone()),
                    _ => Self::Forge(format!("GitHub API error: {err}")),
                }
            }
            _ => Self::Forge(format!("GitHub API error: {err}")),
        }
    }
}

// Builder errors from derive_builder mean a required request field was
// never set
impl From<crate::forge::request::ReleaseRequestBuilderError> for PublishError {
    fn from(err: crate::forge::request::ReleaseRequestBuilderError) -> Self {
        Self::Validation(format!("Builder error: {err}"))
    }
}

impl From<crate::forge::request::PullRequestRequestBuilderError>
    for PublishError
{
    fn from(err: crate::forge::request::PullRequestRequestBuilderError) -> Self {
        Self::Validation(format!("Builder error: {err}"))
    }
}

impl From<crate::forge::request::ReleaseListRequestBuilderError>
    for PublishError
{
    fn from(err: crate::forge::request::ReleaseListRequestBuilderError) -> Self {
        Self::Validation(format!("Builder error: {err}"))
    }
}

impl From<crate::docs::config::DocPublishRequestBuilderError>
    for PublishError
{
    fn from(err: crate::docs::config::DocPublishRequestBuilderError) -> Self {
        Self::Validation(format!("Builder error: {err}"))
    }
}
