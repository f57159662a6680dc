//! Source link rewriting for documentation built inside Jenkins jobs.
//!
//! Jenkins checks out a branch as e.g. `origin/dev`, which generated "view
//! source" links then point at. Rewriting those links to the commit hash
//! keeps them valid and pinned to the documented version.
use log::*;
use std::{env, fs, path::Path};
use walkdir::WalkDir;

use crate::error::{PublishError, Result};

/// Environment variable set by Jenkins for every job.
pub const JENKINS_URL_ENV_VAR: &str = "JENKINS_URL";
pub const GIT_BRANCH_ENV_VAR: &str = "GIT_BRANCH";
pub const GIT_COMMIT_ENV_VAR: &str = "GIT_COMMIT";

/// Git coordinates of the current Jenkins build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JenkinsContext {
    pub git_branch: String,
    pub git_commit: String,
}

impl JenkinsContext {
    /// Detect a Jenkins job from the environment.
    pub fn from_env() -> Option<Self> {
        let in_jenkins = env::var(JENKINS_URL_ENV_VAR)
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false);

        if !in_jenkins {
            return None;
        }

        let git_branch = env::var(GIT_BRANCH_ENV_VAR).ok()?;
        let git_commit = env::var(GIT_COMMIT_ENV_VAR).ok()?;

        if git_branch.trim().is_empty() || git_commit.trim().is_empty() {
            return None;
        }

        Some(Self {
            git_branch,
            git_commit,
        })
    }

    /// Rewrite branch based blob links in `content` to the commit.
    pub fn rewrite(&self, content: &str) -> String {
        let commit = format!("blob/{}", self.git_commit);
        content
            .replace(&format!("blob/{}", self.git_branch), &commit)
            .replace(&format!("blob/heads/{}", self.git_branch), &commit)
    }
}

/// Rewrite source links in every HTML file below `source_directory`.
/// Returns the number of files that changed.
pub fn rewrite_source_links(
    source_directory: &Path,
    context: &JenkinsContext,
) -> Result<usize> {
    let mut rewritten = 0;

    for entry in WalkDir::new(source_directory) {
        let entry = entry?;
        let path = entry.path();

        let is_html = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));

        if !entry.file_type().is_file() || !is_html {
            continue;
        }

        let original = fs::read_to_string(path)
            .map_err(|err| PublishError::file(path, err))?;
        let corrected = context.rewrite(&original);

        if corrected != original {
            fs::write(path, corrected)?;
            rewritten += 1;
        }
    }

    Ok(rewritten)
}

/// Rewrite source links when running inside a Jenkins job.
pub fn fix_source_links_if_in_jenkins(source_directory: &Path) -> Result<()> {
    match JenkinsContext::from_env() {
        Some(context) => {
            info!(
                "inside a Jenkins job: \"View Source\" links will point to commit {}",
                context.git_commit
            );
            let count = rewrite_source_links(source_directory, &context)?;
            debug!("rewrote source links in {count} html files");
        }
        None => {
            info!(
                "not inside a Jenkins job: \"View Source\" links will not be changed"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn context() -> JenkinsContext {
        JenkinsContext {
            git_branch: "origin/dev".into(),
            git_commit: "0123abcd".into(),
        }
    }

    #[test]
    fn rewrites_branch_links_to_commit() {
        let html = r#"<a href="https://github.com/o/r/blob/origin/dev/src/lib.rs">"#;
        assert_eq!(
            context().rewrite(html),
            r#"<a href="https://github.com/o/r/blob/0123abcd/src/lib.rs">"#
        );
    }

    #[test]
    fn rewrites_heads_links_to_commit() {
        let html = "blob/heads/origin/dev/README.md";
        assert_eq!(context().rewrite(html), "blob/0123abcd/README.md");
    }

    #[test]
    fn rewrites_only_html_files() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("api")).unwrap();
        let link = "blob/origin/dev/src/main.rs";
        fs::write(tmp.path().join("api/index.html"), link).unwrap();
        fs::write(tmp.path().join("other.html"), "no links").unwrap();
        fs::write(tmp.path().join("notes.txt"), link).unwrap();

        let count = rewrite_source_links(tmp.path(), &context()).unwrap();
        assert_eq!(count, 1);

        let html = fs::read_to_string(tmp.path().join("api/index.html")).unwrap();
        assert_eq!(html, "blob/0123abcd/src/main.rs");

        let txt = fs::read_to_string(tmp.path().join("notes.txt")).unwrap();
        assert_eq!(txt, link);
    }
}
