//! Idempotent pull request creation.
use log::*;

use crate::{
    error::Result,
    forge::{
        request::{
            CreatePrRequest, GetPrRequest, PullRequest, PullRequestRequest,
        },
        traits::Forge,
    },
};

/// Result of a pull request call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestOutcome {
    /// An open pull request for the same head and base already exists
    AlreadyOpen(PullRequest),
    Created(PullRequest),
}

/// Open a pull request from `head` into `base` unless one is already open.
pub async fn create_pull_request(request: &PullRequestRequest) -> Result<()> {
    request.validate()?;
    let forge = request.remote_config().get_forge()?;
    create_pull_request_with(forge.as_ref(), request).await?;
    Ok(())
}

/// Open a pull request through the given forge.
pub async fn create_pull_request_with(
    forge: &dyn Forge,
    request: &PullRequestRequest,
) -> Result<PullRequestOutcome> {
    request.validate()?;

    let repository = forge.get_repository().await?;
    debug!(
        "found repository {} ({})",
        repository.full_name.as_deref().unwrap_or(&repository.name),
        repository.id
    );

    let open = forge
        .list_open_prs(GetPrRequest {
            head_branch: request.head.clone(),
            base_branch: request.base.clone(),
        })
        .await?;

    let head_branch = branch_name(&request.head);

    if let Some(existing) = open.into_iter().find(|pr| {
        pr.head_branch == head_branch && pr.base_branch == request.base
    }) {
        info!(
            "pull request #{} from branch '{}' into '{}' already exists",
            existing.number, request.head, request.base
        );
        return Ok(PullRequestOutcome::AlreadyOpen(existing));
    }

    let created = forge
        .create_pr(CreatePrRequest {
            head_branch: request.head.clone(),
            base_branch: request.base.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
        })
        .await?;

    Ok(PullRequestOutcome::Created(created))
}

/// Branch part of a head that may be qualified as `owner:branch`. GitHub
/// reports the head ref of a pull request without the owner.
fn branch_name(head: &str) -> &str {
    head.split_once(':').map_or(head, |(_, branch)| branch)
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::{
        error::PublishError,
        forge::{request::RepositoryInfo, traits::MockForge},
    };

    fn request(head: &str, base: &str) -> PullRequestRequest {
        PullRequestRequest::builder()
            .owner("test")
            .repo("repo")
            .head(head)
            .base(base)
            .title("Merge feature")
            .body("Adds the feature")
            .token(SecretString::from("token".to_string()))
            .build()
            .unwrap()
    }

    fn repository() -> RepositoryInfo {
        RepositoryInfo {
            id: 99,
            owner: Some("test".into()),
            name: "repo".into(),
            full_name: Some("test/repo".into()),
            default_branch: Some("main".into()),
        }
    }

    fn pr(number: u64, head: &str, base: &str) -> PullRequest {
        PullRequest {
            number,
            head_branch: head.into(),
            base_branch: base.into(),
        }
    }

    #[tokio::test]
    async fn existing_pull_request_is_not_duplicated() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_repository()
            .times(1)
            .returning(|| Ok(repository()));
        mock_forge
            .expect_list_open_prs()
            .times(1)
            .withf(|req| {
                req.head_branch == "feature/x" && req.base_branch == "main"
            })
            .returning(|_| Ok(vec![pr(12, "feature/x", "main")]));
        mock_forge.expect_create_pr().times(0);

        let outcome =
            create_pull_request_with(&mock_forge, &request("feature/x", "main"))
                .await
                .unwrap();

        assert_eq!(
            outcome,
            PullRequestOutcome::AlreadyOpen(pr(12, "feature/x", "main"))
        );
    }

    #[tokio::test]
    async fn creates_pull_request_when_none_matches() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_repository()
            .returning(|| Ok(repository()));
        // a pull request into another base does not count
        mock_forge
            .expect_list_open_prs()
            .returning(|_| Ok(vec![pr(3, "feature/x", "develop")]));
        mock_forge
            .expect_create_pr()
            .times(1)
            .withf(|req| {
                req.head_branch == "feature/x"
                    && req.base_branch == "main"
                    && req.title == "Merge feature"
                    && req.body.as_deref() == Some("Adds the feature")
            })
            .returning(|req| Ok(pr(13, &req.head_branch, &req.base_branch)));

        let outcome =
            create_pull_request_with(&mock_forge, &request("feature/x", "main"))
                .await
                .unwrap();

        assert_eq!(
            outcome,
            PullRequestOutcome::Created(pr(13, "feature/x", "main"))
        );
    }

    #[tokio::test]
    async fn missing_repository_is_reported() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_repository()
            .returning(|| Err(PublishError::NotFound("test/repo".into())));
        mock_forge.expect_list_open_prs().times(0);
        mock_forge.expect_create_pr().times(0);

        let err =
            create_pull_request_with(&mock_forge, &request("feature/x", "main"))
                .await
                .unwrap_err();

        assert!(matches!(err, PublishError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_head_fails_validation() {
        let mock_forge = MockForge::new();

        let err = create_pull_request_with(&mock_forge, &request("", "main"))
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Validation(_)));
    }

    #[tokio::test]
    async fn owner_qualified_head_matches_open_pull_request() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_repository()
            .returning(|| Ok(repository()));
        mock_forge
            .expect_list_open_prs()
            .withf(|req| req.head_branch == "test:feature/x")
            .returning(|_| Ok(vec![pr(21, "feature/x", "main")]));
        mock_forge.expect_create_pr().times(0);

        let request = request("test:feature/x", "main");

        for _ in 0..2 {
            let outcome =
                create_pull_request_with(&mock_forge, &request).await.unwrap();
            assert_eq!(
                outcome,
                PullRequestOutcome::AlreadyOpen(pr(21, "feature/x", "main"))
            );
        }
    }

    #[test]
    fn branch_name_strips_owner() {
        assert_eq!(branch_name("owner:feature/x"), "feature/x");
        assert_eq!(branch_name("feature/x"), "feature/x");
    }
}
