//! Milestone seeder GitHub infrastructure adapter.
//!
//! Implements the [`provisioning::IssueTracker`] port against the GitHub REST
//! API using `reqwest`. Two endpoints are used:
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | create milestone | `POST /repos/{owner}/{repo}/milestones` |
//! | create issue | `POST /repos/{owner}/{repo}/issues` |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! Authentication, request shaping and status-code mapping are handled here;
//! the [`provisioning`] crate never sees them.

mod client;
mod payloads;

pub use client::{
    ApiToken, GithubClient, GithubConfig, GithubError, API_VERSION, DEFAULT_API_URL,
    DEFAULT_TIMEOUT,
};

#[cfg(test)]
mod tests;
