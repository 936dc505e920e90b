//! Command-line arguments and the validated run configuration built from them.
//!
//! Every flag can also be supplied through an environment variable, so the
//! seeder runs unchanged from a shell, a CI job, or a container.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use github::{ApiToken, GithubConfig, DEFAULT_API_URL};
use provisioning::RepositoryRef;
use thiserror::Error;

/// Create GitHub milestones and issues from a YAML document.
#[derive(Debug, Clone, Parser)]
#[command(name = "milestone-seeder", version, about)]
pub struct Cli {
    /// Path to the milestone document.
    #[arg(long, env = "SEEDER_FILE", default_value = "milestone.yaml")]
    pub file: PathBuf,

    /// Owner (user or organisation) of the target repository.
    #[arg(long, env = "GITHUB_OWNER")]
    pub owner: Option<String>,

    /// Name of the target repository.
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: Option<String>,

    /// GitHub token with `issues: write` permission on the repository.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API root (override for GitHub Enterprise Server).
    #[arg(long = "api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "SEEDER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Walk the document and log every create without calling GitHub.
    #[arg(long, conflicts_with = "validate_only")]
    pub dry_run: bool,

    /// Only load the document and check its due dates.
    #[arg(long)]
    pub validate_only: bool,

    /// Log output format.
    #[arg(long, env = "SEEDER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// What a run will do once the document is loaded.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Check the document only; no tracker is involved.
    ValidateOnly,
    /// Drive the workflow against a tracker that only logs.
    DryRun { repository: RepositoryRef },
    /// Create everything on GitHub.
    Live {
        repository: RepositoryRef,
        github: GithubConfig,
    },
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub document: PathBuf,
    pub mode: Mode,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Repository owner is required (--owner or GITHUB_OWNER)")]
    MissingOwner,

    #[error("Repository name is required (--repo or GITHUB_REPO)")]
    MissingRepo,

    #[error("GitHub token is required (--token or GITHUB_TOKEN) unless --dry-run or --validate-only is set")]
    MissingToken,

    #[error("Timeout must be at least one second")]
    ZeroTimeout,
}

impl TryFrom<Cli> for RunConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.validate_only {
            return Ok(Self {
                document: cli.file,
                mode: Mode::ValidateOnly,
            });
        }

        let owner = cli.owner.ok_or(ConfigError::MissingOwner)?;
        let repo = cli.repo.ok_or(ConfigError::MissingRepo)?;
        let repository = RepositoryRef::from_parts(owner.clone(), repo).ok_or(
            if owner.trim().is_empty() {
                ConfigError::MissingOwner
            } else {
                ConfigError::MissingRepo
            },
        )?;

        let mode = if cli.dry_run {
            Mode::DryRun { repository }
        } else {
            if cli.timeout_secs == 0 {
                return Err(ConfigError::ZeroTimeout);
            }
            let token = cli
                .token
                .and_then(ApiToken::new)
                .ok_or(ConfigError::MissingToken)?;
            let github = GithubConfig::new(token)
                .with_api_base_url(cli.api_url)
                .with_timeout(Duration::from_secs(cli.timeout_secs));
            Mode::Live { repository, github }
        };

        Ok(Self {
            document: cli.file,
            mode,
        })
    }
}
