//! Release publishing and listing command implementation.
use log::*;
use release_publisher::{
    ReleaseListRequest, ReleaseRequest, changelog::complete_changelog,
    list_releases, publish_release,
};

use crate::{
    cli::{Args, ReleaseArgs, ReleasesArgs},
    command::common,
    result::Result,
};

/// Publish the release described by the arguments.
pub async fn execute(args: &Args, release_args: &ReleaseArgs) -> Result<()> {
    let remote = args.get_remote()?;

    let notes = match (&release_args.notes, &release_args.changelog) {
        (Some(notes), _) => notes.clone(),
        (None, Some(path)) => complete_changelog(path)?,
        (None, None) => String::new(),
    };

    let mut builder = ReleaseRequest::builder();
    builder
        .owner(remote.owner)
        .repo(remote.repo)
        .tag(release_args.tag.as_str())
        .commit_sha(release_args.commit_sha.as_str())
        .release_notes(notes)
        .prerelease(release_args.prerelease)
        .artifact_paths(release_args.artifacts.clone())
        .token(remote.token);

    if let Some(name) = &release_args.name {
        builder.name(name.as_str());
    }

    if let Some(api_base_url) = remote.api_base_url {
        builder.api_base_url(api_base_url);
    }

    let request = builder.build()?;

    info!(
        "publishing release {} with {} artifacts",
        request.tag,
        request.artifact_paths.len()
    );

    publish_release(&request).await?;

    Ok(())
}

/// Print the releases of the repository.
pub async fn list(args: &Args, releases_args: &ReleasesArgs) -> Result<()> {
    let remote = args.get_remote()?;

    let mut builder = ReleaseListRequest::builder();
    builder
        .owner(remote.owner)
        .repo(remote.repo)
        .token(remote.token);

    if let Some(max) = releases_args.max {
        builder.max_releases(max);
    }

    if let Some(api_base_url) = remote.api_base_url {
        builder.api_base_url(api_base_url);
    }

    let releases = list_releases(&builder.build()?).await?;

    debug!("found {} releases", releases.len());

    common::write_json(&releases, releases_args.out_file.as_deref()).await
}
