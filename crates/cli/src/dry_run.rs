//! A tracker that logs what would be created and never leaves the process.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use provisioning::{
    CreatedIssue, CreatedMilestone, IssueNumber, IssueTracker, MilestoneNumber, NewIssue,
    NewMilestone, RepositoryRef, TrackerError,
};
use tracing::info;

/// Hands out sequential numbers starting at 1 so issue payloads in the log
/// reference the milestone they would be filed under.
#[derive(Debug, Default)]
pub struct DryRunTracker {
    milestones: AtomicU64,
    issues: AtomicU64,
}

impl DryRunTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssueTracker for DryRunTracker {
    async fn create_milestone(
        &self,
        repository: &RepositoryRef,
        milestone: &NewMilestone,
    ) -> Result<CreatedMilestone, TrackerError> {
        let number = MilestoneNumber::new(self.milestones.fetch_add(1, Ordering::Relaxed) + 1);
        info!(
            dry_run = true,
            repository = %repository,
            number = %number,
            title = %milestone.title,
            due_on = %milestone.due_on,
            "Would create milestone"
        );
        Ok(CreatedMilestone { number })
    }

    async fn create_issue(
        &self,
        repository: &RepositoryRef,
        issue: &NewIssue,
    ) -> Result<CreatedIssue, TrackerError> {
        let number = IssueNumber::new(self.issues.fetch_add(1, Ordering::Relaxed) + 1);
        info!(
            dry_run = true,
            repository = %repository,
            milestone = %issue.milestone,
            title = %issue.title,
            labels = ?issue.labels,
            "Would create issue"
        );
        Ok(CreatedIssue { number })
    }
}
