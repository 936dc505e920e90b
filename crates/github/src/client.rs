//! [`GithubClient`]: the REST-backed [`IssueTracker`].

use std::time::Duration;

use async_trait::async_trait;
use provisioning::{
    CreatedIssue, CreatedMilestone, IssueNumber, IssueTracker, MilestoneNumber, NewIssue,
    NewMilestone, RepositoryRef, TrackerError,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::payloads::{ErrorBody, IssueRequest, MilestoneRequest, Numbered};

/// Public GitHub REST endpoint. GitHub Enterprise Server installs use
/// `https://<host>/api/v3` instead.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version pinned through the `X-GitHub-Api-Version` header.
pub const API_VERSION: &str = "2022-11-28";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("milestone-seeder/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A personal access token or installation token.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token, returning `None` if it is blank.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Everything needed to talk to one GitHub instance.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_base_url: String,
    pub token: ApiToken,
    pub timeout: Duration,
}

impl GithubConfig {
    /// Configuration for api.github.com with the default timeout.
    pub fn new(token: ApiToken) -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            token,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors raised while constructing a [`GithubClient`].
#[derive(Debug, Error)]
pub enum GithubError {
    /// The token contains characters that cannot appear in an HTTP header.
    #[error("GitHub token is not a valid HTTP header value")]
    InvalidToken,

    /// The API base URL is empty or not an http(s) URL.
    #[error("GitHub API URL '{url}' must start with http:// or https://")]
    InvalidBaseUrl { url: String },

    /// The underlying HTTP client could not be built (e.g. TLS backend failure).
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Creates milestones and issues through the GitHub REST API.
///
/// Authentication, API versioning and the user agent are baked into the
/// underlying `reqwest::Client` as default headers. No call is retried.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self, GithubError> {
        let base_url = normalise_base_url(&config.api_base_url)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.expose()))
            .map_err(|_| GithubError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self { http, base_url })
    }

    /// The API root every request is made against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn repo_url(&self, repository: &RepositoryRef, resource: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_url,
            repository.owner(),
            repository.name(),
            resource
        )
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, TrackerError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = classify_failure(status, &text);
            warn!(url, status = status.as_u16(), error = %err, "GitHub request failed");
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| TrackerError::UnexpectedResponse {
            message: format!("{e} (HTTP {status})"),
        })
    }
}

#[async_trait]
impl IssueTracker for GithubClient {
    async fn create_milestone(
        &self,
        repository: &RepositoryRef,
        milestone: &NewMilestone,
    ) -> Result<CreatedMilestone, TrackerError> {
        let url = self.repo_url(repository, "milestones");
        let created: Numbered = self.post(&url, &MilestoneRequest::from(milestone)).await?;
        Ok(CreatedMilestone {
            number: MilestoneNumber::new(created.number),
        })
    }

    async fn create_issue(
        &self,
        repository: &RepositoryRef,
        issue: &NewIssue,
    ) -> Result<CreatedIssue, TrackerError> {
        let url = self.repo_url(repository, "issues");
        let created: Numbered = self.post(&url, &IssueRequest::from(issue)).await?;
        Ok(CreatedIssue {
            number: IssueNumber::new(created.number),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn normalise_base_url(raw: &str) -> Result<String, GithubError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(GithubError::InvalidBaseUrl {
            url: raw.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

/// Maps a non-success response onto the port's error type.
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> TrackerError {
    if status == StatusCode::UNAUTHORIZED {
        return TrackerError::Unauthorized {
            status: status.as_u16(),
        };
    }
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.summary(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned(),
        Err(_) => body.trim().to_owned(),
    };
    TrackerError::Api {
        status: status.as_u16(),
        message,
    }
}

fn transport_error(err: reqwest::Error) -> TrackerError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    TrackerError::Transport { message }
}
