//! Shared value types for the provisioning domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! values with invariants (a due date is always a real calendar date) and take
//! part in the workflow's computations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Formats the timestamp as RFC 3339 with a `Z` suffix and whole seconds,
    /// e.g. `2024-01-15T00:00:00Z`.
    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------

/// The only layout accepted for `due_on` in a milestone document.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a `due_on` value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DueDateError {
    /// Not ten characters shaped `dddd-dd-dd`.
    #[error("expected a date in YYYY-MM-DD form")]
    Layout,

    /// The right shape, but no such calendar day (e.g. `2024-02-30`).
    #[error(transparent)]
    Calendar(#[from] chrono::ParseError),
}

/// A milestone's due date: a calendar day with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Parses a `YYYY-MM-DD` string.
    ///
    /// Zero padding is mandatory and nothing may surround the date; chrono's
    /// `%Y-%m-%d` alone would also take `2024-1-5` or `+2024-01-15`.
    pub fn parse(raw: &str) -> Result<Self, DueDateError> {
        if !has_fixed_layout(raw.as_bytes()) {
            return Err(DueDateError::Layout);
        }
        Ok(Self(NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT)?))
    }

    /// Returns the underlying [`NaiveDate`].
    pub fn as_date(self) -> NaiveDate {
        self.0
    }

    /// Midnight UTC at the start of the due day.
    pub fn to_timestamp(self) -> Timestamp {
        Timestamp::from_utc(self.0.and_time(NaiveTime::MIN).and_utc())
    }
}

fn has_fixed_layout(raw: &[u8]) -> bool {
    raw.len() == 10
        && raw.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl std::fmt::Display for DueDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DUE_DATE_FORMAT))
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Counts of what a successful run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionReport {
    /// Milestones created on the tracker.
    pub milestones_created: usize,
    /// Issues created on the tracker, across all milestones.
    pub issues_created: usize,
}
