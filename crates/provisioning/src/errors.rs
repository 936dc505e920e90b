//! Top-level error type for the provisioning workflow.
//!
//! [`ProvisionError`] covers every condition that stops a run. Failures raised
//! by the tracker itself are described by [`crate::tracker::TrackerError`] and
//! arrive here wrapped with the milestone (and issue) that was being created.
//!
//! None of these errors is retried. There is no rollback either: whatever was
//! created before the failure stays on the tracker.

use thiserror::Error;

use crate::tracker::TrackerError;
use crate::types::DueDateError;

/// Errors that halt a provisioning run.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A milestone's `due_on` is not a `YYYY-MM-DD` date.
    ///
    /// Raised before any tracker call is made for that milestone.
    #[error("Milestone '{milestone}' has an invalid due date '{raw}'")]
    DateParse {
        /// Title of the offending milestone.
        milestone: String,
        /// The `due_on` value exactly as it appeared in the document.
        raw: String,
        #[source]
        source: DueDateError,
    },

    /// The tracker refused or failed to create a milestone.
    #[error("Failed to create milestone '{milestone}'")]
    MilestoneCreate {
        milestone: String,
        #[source]
        source: TrackerError,
    },

    /// The tracker refused or failed to create an issue.
    ///
    /// Issues before this one in the same milestone were already created.
    #[error("Failed to create issue '{issue}' in milestone '{milestone}'")]
    IssueCreate {
        milestone: String,
        issue: String,
        #[source]
        source: TrackerError,
    },
}
