//! Core domain for the milestone seeder.
//!
//! This crate holds the milestone document model, the newtype identifiers and
//! value types, the [`IssueTracker`] port, and the workflow that drives it.
//! Infrastructure crates implement the port; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`MilestoneNumber`, `RepositoryRef`, etc.) |
//! | [`types`] | Value types (`DueDate`, `Timestamp`, `ProvisionReport`) |
//! | [`model`] | The decoded document (`MilestoneSet`, `Milestone`, `Issue`) |
//! | [`tracker`] | The `IssueTracker` port, its payloads and `TrackerError` |
//! | [`workflow`] | `provision` and the offline `plan` check |
//! | [`errors`] | `ProvisionError` |

pub mod errors;
pub mod identifiers;
pub mod model;
pub mod tracker;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod tests;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::ProvisionError;
pub use identifiers::{
    IssueNumber, MilestoneNumber, ProvisionRunId, RepositoryName, RepositoryOwner, RepositoryRef,
};
pub use model::{Issue, Milestone, MilestoneSet};
pub use tracker::{
    CreatedIssue, CreatedMilestone, IssueTracker, NewIssue, NewMilestone, TrackerError,
};
pub use types::{DueDate, DueDateError, ProvisionReport, Timestamp, DUE_DATE_FORMAT};
pub use workflow::{plan, provision, PlannedMilestone};
