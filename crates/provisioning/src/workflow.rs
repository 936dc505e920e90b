//! The provisioning workflow.
//!
//! Walks a [`MilestoneSet`] in document order and drives an [`IssueTracker`]:
//! for each milestone, parse its due date, create it, then create each of its
//! issues against the returned milestone number. Exactly one call is in flight
//! at any time and the first failure ends the run.
//!
//! Nothing is rolled back after a failure and nothing makes a re-run safe:
//! running the same document twice creates everything twice.

use tracing::{debug, info, info_span, Instrument};

use crate::{
    tracker::{IssueTracker, NewIssue, NewMilestone},
    DueDate, Issue, Milestone, MilestoneNumber, MilestoneSet, ProvisionError, ProvisionReport,
    RepositoryRef,
};

/// Creates every milestone and issue in `milestones` on `tracker`.
///
/// A milestone's due date is checked immediately before that milestone is
/// created, so a bad date in the third milestone still leaves the first two
/// (and their issues) on the tracker.
pub async fn provision<T>(
    tracker: &T,
    repository: &RepositoryRef,
    milestones: &MilestoneSet,
) -> Result<ProvisionReport, ProvisionError>
where
    T: IssueTracker + ?Sized,
{
    let mut report = ProvisionReport::default();

    for milestone in &milestones.milestones {
        let span = info_span!("milestone", title = %milestone.title);
        let created = provision_milestone(tracker, repository, milestone)
            .instrument(span)
            .await?;
        report.milestones_created += 1;
        report.issues_created += created;
    }

    info!(
        repository = %repository,
        milestones = report.milestones_created,
        issues = report.issues_created,
        "Provisioning complete"
    );
    Ok(report)
}

/// Creates one milestone and its issues; returns the number of issues created.
async fn provision_milestone<T>(
    tracker: &T,
    repository: &RepositoryRef,
    milestone: &Milestone,
) -> Result<usize, ProvisionError>
where
    T: IssueTracker + ?Sized,
{
    let due = parse_due_date(milestone)?;

    let request = NewMilestone {
        title: milestone.title.clone(),
        description: milestone.description.clone(),
        due_on: due.to_timestamp(),
    };
    let created = tracker
        .create_milestone(repository, &request)
        .await
        .map_err(|source| ProvisionError::MilestoneCreate {
            milestone: milestone.title.clone(),
            source,
        })?;
    info!(number = %created.number, due_on = %due, "Created milestone");

    for issue in &milestone.issues {
        let request = issue_request(issue, created.number);
        let filed = tracker
            .create_issue(repository, &request)
            .await
            .map_err(|source| ProvisionError::IssueCreate {
                milestone: milestone.title.clone(),
                issue: issue.title.clone(),
                source,
            })?;
        debug!(number = %filed.number, title = %issue.title, "Created issue");
    }

    Ok(milestone.issues.len())
}

fn parse_due_date(milestone: &Milestone) -> Result<DueDate, ProvisionError> {
    DueDate::parse(&milestone.due_on).map_err(|source| ProvisionError::DateParse {
        milestone: milestone.title.clone(),
        raw: milestone.due_on.clone(),
        source,
    })
}

fn issue_request(issue: &Issue, milestone: MilestoneNumber) -> NewIssue {
    NewIssue {
        title: issue.title.clone(),
        body: issue.body.clone(),
        labels: issue.labels.clone(),
        milestone,
    }
}

// ---------------------------------------------------------------------------
// Offline validation
// ---------------------------------------------------------------------------

/// A milestone whose due date has been checked, ready to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMilestone {
    pub title: String,
    pub due_on: DueDate,
    pub issue_count: usize,
}

/// Checks every due date in `milestones` without touching a tracker.
///
/// Stops at the first bad date, reporting it exactly as [`provision`] would.
pub fn plan(milestones: &MilestoneSet) -> Result<Vec<PlannedMilestone>, ProvisionError> {
    milestones
        .milestones
        .iter()
        .map(|milestone| -> Result<PlannedMilestone, ProvisionError> {
            Ok(PlannedMilestone {
                title: milestone.title.clone(),
                due_on: parse_due_date(milestone)?,
                issue_count: milestone.issues.len(),
            })
        })
        .collect()
}
