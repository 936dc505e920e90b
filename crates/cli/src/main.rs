//! Milestone seeder CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse configuration** — flags and environment variables into a
//!    validated [`config::RunConfig`].
//! 2. **Wire observability** — configure `tracing-subscriber` (text or JSON on
//!    stderr). All `tracing` spans and events emitted by every crate in the
//!    workspace flow through this layer.
//! 3. **Construct infrastructure** — a `GithubClient`, or the dry-run tracker,
//!    and hand it to the provisioning workflow.
//! 4. **Report** — log the outcome and exit non-zero on the first error.

mod app;
mod config;
mod dry_run;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use provisioning::ProvisionRunId;
use tracing::{error, info, info_span, Instrument};

use crate::app::Outcome;
use crate::config::{Cli, RunConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.log_format) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    let run_id = ProvisionRunId::new_random();
    let span = info_span!("seed", run_id = %run_id);

    match run(cli).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RunConfig::try_from(cli)?;

    match app::execute(&config).await? {
        Outcome::Validated { milestones, issues } => {
            info!(milestones, issues, "Document is valid");
        }
        Outcome::Provisioned(report) => {
            info!(
                milestones = report.milestones_created,
                issues = report.issues_created,
                "Done"
            );
        }
    }
    Ok(())
}
