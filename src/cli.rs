//! CLI argument parsing and remote repository configuration.
use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::eyre::eyre;
use release_publisher::{
    RemoteConfig, docs::config::API_KEY_ENV_VAR, github_repository_info,
    parse_repository_url,
};
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::result::Result;

/// Environment variable consulted when no GitHub token is given.
pub const GITHUB_TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Global CLI arguments for the GitHub remote and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub repository URL (https://github.com/owner/repo).
    pub github_repo: String,

    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to a token embedded in the
    /// repository URL, then to the GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = "", global = true)]
    /// API base URL of a GitHub Enterprise instance.
    pub github_api_url: String,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Publishing subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a GitHub release with its artifacts unless the tag already has
    /// one.
    Release(ReleaseArgs),

    /// Open a pull request unless one is already open for the branches.
    PullRequest(PullRequestArgs),

    /// Print the releases of the repository as JSON.
    Releases(ReleasesArgs),

    /// Print repository information as JSON.
    Repository,

    /// Upload a documentation directory and its assets to WebDocu.
    Docs(DocsArgs),

    /// Upload assets to WebDocu without a documentation package.
    Assets(DocsHostArgs),

    /// Print the release notes of a markdown changelog.
    Changelog(ChangelogArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ReleaseArgs {
    #[arg(long)]
    /// Tag to release.
    pub tag: String,

    #[arg(long)]
    /// Commit the tag is created from.
    pub commit_sha: String,

    #[arg(long)]
    /// Release name. Defaults to the tag.
    pub name: Option<String>,

    #[arg(long, conflicts_with = "changelog")]
    /// Markdown release notes.
    pub notes: Option<String>,

    #[arg(long)]
    /// Changelog file the release notes are read from.
    pub changelog: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Mark the release as a prerelease.
    pub prerelease: bool,

    #[arg(long = "artifact")]
    /// File to attach to the release. Repeat for multiple files.
    pub artifacts: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct PullRequestArgs {
    #[arg(long)]
    /// Branch containing the changes.
    pub head: String,

    #[arg(long)]
    /// Branch the changes are merged into.
    pub base: String,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub body: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct ReleasesArgs {
    #[arg(long)]
    /// Maximum number of releases, newest first.
    pub max: Option<usize>,

    #[arg(long)]
    /// Write the JSON to this file instead of stdout.
    pub out_file: Option<PathBuf>,
}

/// Docs host connection and asset settings.
#[derive(ClapArgs, Debug)]
pub struct DocsHostArgs {
    #[arg(long)]
    /// Base URL of the WebDocu instance.
    pub docs_url: String,

    #[arg(long, default_value = "")]
    /// WebDocu API key. Falls back to the WEBDOCU_API_KEY env var.
    pub api_key: String,

    #[arg(long = "docs-version", required_unless_present = "package")]
    /// Version the documentation and assets belong to.
    pub docs_version: Option<String>,

    #[arg(long, requires = "project_name")]
    /// NuGet package the version is derived from when --docs-version is
    /// omitted.
    pub package: Option<PathBuf>,

    #[arg(long)]
    /// Project name prefixing the package file name.
    pub project_name: Option<String>,

    #[arg(long = "asset")]
    /// Asset file to upload. Repeat for multiple files.
    pub assets: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct DocsArgs {
    #[arg(long)]
    /// Directory containing the generated documentation.
    pub source_dir: PathBuf,

    #[arg(long)]
    /// Changelog file whose release notes are published with the docs.
    pub changelog: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Succeed without uploading anything when the version already exists.
    pub skip_on_version_conflict: bool,

    #[command(flatten)]
    pub host: DocsHostArgs,
}

#[derive(ClapArgs, Debug)]
pub struct ChangelogArgs {
    /// Markdown changelog file.
    pub path: PathBuf,

    #[arg(long, default_value_t = false)]
    /// Escape the notes for use as an MSBuild property value.
    pub msbuild: bool,
}

impl Args {
    /// Configure the GitHub remote from CLI arguments.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        if self.github_repo.is_empty() {
            return Err(eyre!("must configure --github-repo"));
        }

        let api_base_url = (!self.github_api_url.is_empty())
            .then(|| self.github_api_url.clone());

        // enterprise hosts are only accepted with an explicit api url
        let (owner, repo, url_token) = if api_base_url.is_some() {
            let parsed = parse_repository_url(&self.github_repo)?;
            (parsed.owner, parsed.repo, parsed.token)
        } else {
            let (owner, repo) = github_repository_info(&self.github_repo)?;
            let url_token = parse_repository_url(&self.github_repo)?.token;
            (owner, repo, url_token)
        };

        let token = resolve_secret(
            &self.github_token,
            url_token,
            GITHUB_TOKEN_ENV_VAR,
        )
        .ok_or(eyre!("must set github token"))?;

        Ok(RemoteConfig::new(owner, repo, token, api_base_url))
    }
}

impl DocsHostArgs {
    /// API key from the argument or the WEBDOCU_API_KEY env var.
    pub fn get_api_key(&self) -> Result<SecretString> {
        resolve_secret(&self.api_key, None, API_KEY_ENV_VAR)
            .ok_or(eyre!("must set a WebDocu api key"))
    }
}

/// First non-empty value of the argument, the fallback and the env var.
fn resolve_secret(
    arg: &str,
    fallback: Option<String>,
    env_var: &str,
) -> Option<SecretString> {
    let mut value = arg.to_string();

    if value.is_empty()
        && let Some(fallback) = fallback
    {
        value = fallback;
    }

    if value.is_empty()
        && let Ok(env_value) = env::var(env_var)
    {
        value = env_value;
    }

    (!value.trim().is_empty()).then(|| SecretString::from(value))
}
