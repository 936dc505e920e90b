//! Newtype domain identifiers.
//!
//! Numbers handed out by the tracker and the names that address a repository
//! are wrapped in distinct newtypes so a [`MilestoneNumber`] can never be passed
//! where an [`IssueNumber`] is expected, even though both are `u64` underneath.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or only whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (tracker-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — tracker-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// The number the tracker assigns to a newly created milestone.
    ///
    /// Every issue filed under that milestone carries this number.
    MilestoneNumber
}

u64_id! {
    /// The number the tracker assigns to a newly created issue.
    IssueNumber
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single seeding run (one invocation of the CLI).
///
/// Attached to the root span so every event from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProvisionRunId(Uuid);

impl ProvisionRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ProvisionRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (repository addressing)
// ---------------------------------------------------------------------------

string_id! {
    /// The user or organisation that owns the target repository.
    RepositoryOwner
}

string_id! {
    /// The repository name, without the owner prefix.
    RepositoryName
}

/// The repository milestones and issues are created in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    owner: RepositoryOwner,
    name: RepositoryName,
}

impl RepositoryRef {
    /// Creates a reference from its two parts.
    pub fn new(owner: RepositoryOwner, name: RepositoryName) -> Self {
        Self { owner, name }
    }

    /// Builds a reference from raw strings, returning `None` if either part is
    /// blank.
    pub fn from_parts(owner: impl Into<String>, name: impl Into<String>) -> Option<Self> {
        Some(Self::new(RepositoryOwner::new(owner)?, RepositoryName::new(name)?))
    }

    pub fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    pub fn name(&self) -> &RepositoryName {
        &self.name
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "repo")]
    #[case("owner", "")]
    #[case("   ", "repo")]
    fn from_parts_rejects_blank_segments(#[case] owner: &str, #[case] name: &str) {
        assert!(RepositoryRef::from_parts(owner, name).is_none());
    }

    #[test]
    fn repository_ref_displays_as_owner_slash_name() {
        let repo = RepositoryRef::from_parts("octo-org", "widgets").expect("valid repository");
        assert_eq!(repo.to_string(), "octo-org/widgets");
        assert_eq!(repo.owner().as_str(), "octo-org");
        assert_eq!(repo.name().as_str(), "widgets");
    }

    #[test]
    fn tracker_numbers_display_with_hash_prefix() {
        assert_eq!(MilestoneNumber::new(7).to_string(), "#7");
        assert_eq!(IssueNumber::new(42).as_u64(), 42);
    }
}
