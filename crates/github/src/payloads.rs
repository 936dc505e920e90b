//! GitHub REST request and response bodies.
//!
//! Only the fields the seeder sends or reads are modelled; GitHub's responses
//! carry far more, which serde ignores.

use provisioning::{NewIssue, NewMilestone};
use serde::{Deserialize, Serialize};

/// Body of `POST /repos/{owner}/{repo}/milestones`.
#[derive(Debug, Serialize)]
pub(crate) struct MilestoneRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// ISO 8601 timestamp, e.g. `2024-01-15T00:00:00Z`.
    pub due_on: String,
}

impl<'a> From<&'a NewMilestone> for MilestoneRequest<'a> {
    fn from(milestone: &'a NewMilestone) -> Self {
        Self {
            title: &milestone.title,
            description: &milestone.description,
            due_on: milestone.due_on.to_rfc3339(),
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Serialize)]
pub(crate) struct IssueRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub labels: &'a [String],
    /// The milestone *number*, not its node id.
    pub milestone: u64,
}

impl<'a> From<&'a NewIssue> for IssueRequest<'a> {
    fn from(issue: &'a NewIssue) -> Self {
        Self {
            title: &issue.title,
            body: &issue.body,
            labels: &issue.labels,
            milestone: issue.milestone.as_u64(),
        }
    }
}

/// The part of a created milestone or issue the seeder needs.
#[derive(Debug, Deserialize)]
pub(crate) struct Numbered {
    pub number: u64,
}

/// GitHub's error document, e.g. on `422 Validation Failed`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// One entry of [`ErrorBody::errors`]. GitHub sends either a structured
/// object or, on some endpoints, a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FieldError {
    Detailed {
        resource: Option<String>,
        field: Option<String>,
        code: Option<String>,
        message: Option<String>,
    },
    Text(String),
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::Text(text) => f.write_str(text),
            FieldError::Detailed {
                resource,
                field,
                code,
                message,
            } => {
                let target = match (resource, field) {
                    (Some(r), Some(fl)) => format!("{r}.{fl}"),
                    (Some(r), None) => r.clone(),
                    (None, Some(fl)) => fl.clone(),
                    (None, None) => String::new(),
                };
                let detail = message.as_deref().or(code.as_deref()).unwrap_or("invalid");
                if target.is_empty() {
                    f.write_str(detail)
                } else {
                    write!(f, "{target} {detail}")
                }
            }
        }
    }
}

impl ErrorBody {
    /// `message`, followed by the per-field errors in parentheses when present.
    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return self.message.clone();
        }
        let details: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        format!("{} ({})", self.message, details.join("; "))
    }
}
