//! Pull request and repository command implementation.
use release_publisher::{
    PullRequestRequest, create_pull_request, get_repository,
};

use crate::{
    cli::{Args, PullRequestArgs},
    command::common,
    result::Result,
};

/// Open the pull request described by the arguments.
pub async fn execute(args: &Args, pr_args: &PullRequestArgs) -> Result<()> {
    let remote = args.get_remote()?;

    let mut builder = PullRequestRequest::builder();
    builder
        .owner(remote.owner)
        .repo(remote.repo)
        .head(pr_args.head.as_str())
        .base(pr_args.base.as_str())
        .title(pr_args.title.as_str())
        .token(remote.token);

    if let Some(body) = &pr_args.body {
        builder.body(body.as_str());
    }

    if let Some(api_base_url) = remote.api_base_url {
        builder.api_base_url(api_base_url);
    }

    create_pull_request(&builder.build()?).await?;

    Ok(())
}

/// Print repository information.
pub async fn show_repository(args: &Args) -> Result<()> {
    let remote = args.get_remote()?;
    let repository = get_repository(&remote).await?;
    common::write_json(&repository, None).await
}
