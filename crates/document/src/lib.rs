//! Milestone document loader.
//!
//! Reads a YAML file and decodes it into a [`provisioning::MilestoneSet`].
//! Field names follow the document schema exactly; missing fields default to
//! empty and unknown fields are ignored. Only an unreadable file or a document
//! of the wrong shape is an error.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File access and YAML decoding live here. The
//! [`provisioning`] crate sees only the decoded model.

use std::path::{Path, PathBuf};

use provisioning::MilestoneSet;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a milestone document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read (missing, unreadable, not UTF-8).
    #[error("Failed to read milestone document '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a valid milestone document.
    #[error("Failed to decode milestone document '{}'", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Reads and decodes the milestone document at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<MilestoneSet, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let set = parse(&content).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        milestones = set.milestones.len(),
        issues = set.issue_count(),
        "Loaded milestone document"
    );
    Ok(set)
}

/// Decodes a milestone document held in memory.
///
/// A blank document (nothing but whitespace or comments) yields an empty set.
/// Decoding goes straight from text to the model so that plain scalars such as
/// `title: 1.0` stay strings and a bare `description:` reads as empty.
pub fn parse(content: &str) -> Result<MilestoneSet, serde_yaml::Error> {
    Ok(serde_yaml::from_str::<Option<MilestoneSet>>(content)?.unwrap_or_default())
}
