//! Documentation and asset upload command implementation.
use log::*;
use release_publisher::{
    DocPublishRequest, changelog::complete_changelog,
    docs::config::DocPublishRequestBuilder, publish_docs, upload_doc_assets,
    version_from_package_filename,
};

use crate::{
    cli::{DocsArgs, DocsHostArgs},
    result::Result,
};

/// Publish a documentation directory followed by its assets.
pub async fn execute(docs_args: &DocsArgs) -> Result<()> {
    let mut builder = host_request(&docs_args.host)?;
    builder
        .source_directory(docs_args.source_dir.clone())
        .skip_on_version_conflict(docs_args.skip_on_version_conflict);

    if let Some(path) = &docs_args.changelog {
        builder.markdown_changelog(complete_changelog(path)?);
    }

    let request = builder.build()?;

    info!(
        "publishing documentation from {} as version {}",
        request.source_directory.display(),
        request.version
    );

    publish_docs(&request).await?;

    Ok(())
}

/// Upload assets without a documentation package.
pub async fn upload_assets(host_args: &DocsHostArgs) -> Result<()> {
    let request = host_request(host_args)?.build()?;

    info!(
        "uploading {} assets for version {}",
        request.asset_file_paths.len(),
        request.version
    );

    upload_doc_assets(&request).await?;

    Ok(())
}

fn host_request(host_args: &DocsHostArgs) -> Result<DocPublishRequestBuilder> {
    let version = match (&host_args.docs_version, &host_args.package) {
        (Some(version), _) => version.clone(),
        (None, Some(package)) => version_from_package_filename(
            package,
            host_args.project_name.as_deref().unwrap_or_default(),
        )?,
        (None, None) => String::new(),
    };

    let mut builder = DocPublishRequest::builder();
    builder
        .api_key(host_args.get_api_key()?)
        .base_url(host_args.docs_url.as_str())
        .version(version)
        .asset_file_paths(host_args.assets.clone());

    Ok(builder)
}
