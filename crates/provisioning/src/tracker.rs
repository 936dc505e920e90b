//! The issue-tracker port.
//!
//! The workflow only needs two remote operations, create-milestone and
//! create-issue. [`IssueTracker`] names them; infrastructure crates (the
//! `github` adapter, the CLI's dry-run tracker) supply the implementations.
//! Authentication is the implementation's concern and never appears here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{IssueNumber, MilestoneNumber, RepositoryRef, Timestamp};

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

/// Payload for creating a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMilestone {
    pub title: String,
    pub description: String,
    /// Start of the due day, in UTC.
    pub due_on: Timestamp,
}

/// Payload for creating an issue under an already-created milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub milestone: MilestoneNumber,
}

/// What the tracker reports back after creating a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedMilestone {
    pub number: MilestoneNumber,
}

/// What the tracker reports back after creating an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub number: IssueNumber,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single tracker call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// The request never got a response (DNS, TLS, connection reset, timeout).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The tracker rejected the credentials.
    #[error("Tracker rejected the credentials (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The tracker answered with a non-success status.
    #[error("Tracker returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The tracker answered with success but the body could not be understood.
    #[error("Unexpected tracker response: {message}")]
    UnexpectedResponse { message: String },
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Remote operations the provisioning workflow drives.
///
/// Implementations are called strictly one at a time; they need not be
/// re-entrant, but must be `Send + Sync` so the workflow can run on any
/// runtime thread.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Creates a milestone in `repository` and returns its assigned number.
    async fn create_milestone(
        &self,
        repository: &RepositoryRef,
        milestone: &NewMilestone,
    ) -> Result<CreatedMilestone, TrackerError>;

    /// Creates an issue in `repository` under `issue.milestone`.
    async fn create_issue(
        &self,
        repository: &RepositoryRef,
        issue: &NewIssue,
    ) -> Result<CreatedIssue, TrackerError>;
}
