pub mod archive;
pub mod changelog;
pub mod docs;
pub mod error;
pub mod forge;
pub mod jenkins;
pub mod path_helpers;
pub mod pull_request;
pub mod release;

pub use docs::{
    config::{DocPublishRequest, version_from_package_filename},
    publisher::{publish_docs, upload_doc_assets},
    strategy::AssetUploadOutcome,
};
pub use error::{PublishError, Result};
pub use forge::{
    config::{RemoteConfig, github_repository_info, parse_repository_url},
    get_repository,
    request::{
        ForgeRelease, PullRequestRequest, ReleaseListRequest, ReleaseRequest,
        RepositoryInfo,
    },
};
pub use pull_request::create_pull_request;
pub use release::{list_releases, publish_release};

#[cfg(test)]
pub mod test_helpers;
