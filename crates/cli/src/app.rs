//! One seeding run: load the document, pick a tracker, provision.

use anyhow::Context;
use github::GithubClient;
use provisioning::{plan, provision, MilestoneSet, ProvisionReport, RepositoryRef};
use tracing::{info, warn};

use crate::config::{Mode, RunConfig};
use crate::dry_run::DryRunTracker;

/// What a successful run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The document was checked; nothing was sent anywhere.
    Validated { milestones: usize, issues: usize },
    /// The workflow ran to completion against a tracker.
    Provisioned(ProvisionReport),
}

pub async fn execute(config: &RunConfig) -> anyhow::Result<Outcome> {
    let set = document::load(&config.document)?;

    match &config.mode {
        Mode::ValidateOnly => validate(&set),
        Mode::DryRun { repository } => {
            let report = provision(&DryRunTracker::new(), repository, &set).await?;
            Ok(Outcome::Provisioned(report))
        }
        Mode::Live { repository, github } => {
            let client =
                GithubClient::new(github.clone()).context("Failed to configure GitHub client")?;
            run_live(&client, repository, &set).await
        }
    }
}

fn validate(set: &MilestoneSet) -> anyhow::Result<Outcome> {
    let planned = plan(set)?;
    for milestone in &planned {
        info!(
            title = %milestone.title,
            due_on = %milestone.due_on,
            issues = milestone.issue_count,
            "Milestone is valid"
        );
    }
    Ok(Outcome::Validated {
        milestones: planned.len(),
        issues: set.issue_count(),
    })
}

async fn run_live(
    client: &GithubClient,
    repository: &RepositoryRef,
    set: &MilestoneSet,
) -> anyhow::Result<Outcome> {
    info!(repository = %repository, api = client.base_url(), "Provisioning on GitHub");
    let report = provision(client, repository, set).await.inspect_err(|_| {
        warn!(
            "Anything created before this failure was kept; \
             re-running the same document will create it again"
        );
    })?;
    Ok(Outcome::Provisioned(report))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use provisioning::ProvisionError;
    use tempfile::NamedTempFile;

    use super::*;

    const DOCUMENT: &str = r#"
milestones:
  - title: v1
    description: ""
    due_on: "2024-01-15"
    issues:
      - title: Bug A
        body: ""
        labels: [bug]
  - title: v2
    due_on: "2024-03-01"
    issues:
      - title: Feature B
      - title: Feature C
"#;

    fn write_document(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    fn repository() -> RepositoryRef {
        RepositoryRef::from_parts("octo-org", "widgets").expect("valid repository")
    }

    #[tokio::test]
    async fn validate_only_counts_without_a_tracker() {
        let file = write_document(DOCUMENT);
        let config = RunConfig {
            document: file.path().to_path_buf(),
            mode: Mode::ValidateOnly,
        };

        let outcome = execute(&config).await.expect("valid document");

        assert_eq!(
            outcome,
            Outcome::Validated {
                milestones: 2,
                issues: 3
            }
        );
    }

    #[tokio::test]
    async fn dry_run_walks_every_item() {
        let file = write_document(DOCUMENT);
        let config = RunConfig {
            document: file.path().to_path_buf(),
            mode: Mode::DryRun {
                repository: repository(),
            },
        };

        let outcome = execute(&config).await.expect("dry run succeeds");

        assert_eq!(
            outcome,
            Outcome::Provisioned(ProvisionReport {
                milestones_created: 2,
                issues_created: 3
            })
        );
    }

    #[tokio::test]
    async fn bad_date_fails_validation_with_milestone_context() {
        let file = write_document("milestones:\n  - title: v1\n    due_on: \"15-01-2024\"\n");
        let config = RunConfig {
            document: file.path().to_path_buf(),
            mode: Mode::ValidateOnly,
        };

        let err = execute(&config).await.expect_err("bad date");

        let provision_err = err
            .downcast_ref::<ProvisionError>()
            .expect("provisioning error");
        assert!(matches!(provision_err, ProvisionError::DateParse { .. }));
        assert!(format!("{err:#}").contains("'15-01-2024'"));
    }

    #[tokio::test]
    async fn malformed_document_never_reaches_the_workflow() {
        let file = write_document("milestones:\n  - title: v1\n    issues: oops\n");
        let config = RunConfig {
            document: file.path().to_path_buf(),
            mode: Mode::DryRun {
                repository: repository(),
            },
        };

        let err = execute(&config).await.expect_err("decode error");

        assert!(matches!(
            err.downcast_ref::<document::LoadError>(),
            Some(document::LoadError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn missing_document_is_reported_with_its_path() {
        let config = RunConfig {
            document: PathBuf::from("/nonexistent/milestone.yaml"),
            mode: Mode::ValidateOnly,
        };

        let err = execute(&config).await.expect_err("read error");

        assert!(matches!(
            err.downcast_ref::<document::LoadError>(),
            Some(document::LoadError::Read { .. })
        ));
        assert!(err.to_string().contains("/nonexistent/milestone.yaml"));
    }
}
