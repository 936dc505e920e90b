//! The milestone document model.
//!
//! These types mirror the YAML schema field for field. Every field defaults to
//! empty when absent and unknown keys are ignored, so a sparse document still
//! decodes; only a wrong *shape* (e.g. `issues` given as a string) is rejected.
//! `due_on` stays a raw string here and is parsed by the workflow, which owns
//! the decision of when a bad date aborts the run.

use serde::{Deserialize, Serialize};

/// Root of a milestone document: milestones in the order they are created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSet {
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl MilestoneSet {
    /// Total number of issues across every milestone.
    pub fn issue_count(&self) -> usize {
        self.milestones.iter().map(|m| m.issues.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }
}

/// A milestone and the issues filed under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Due date as written in the document; expected as `YYYY-MM-DD`.
    #[serde(default)]
    pub due_on: String,

    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// A single work item filed under its enclosing [`Milestone`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub body: String,

    /// Label names, in source order. Duplicates are passed through untouched.
    #[serde(default)]
    pub labels: Vec<String>,
}
