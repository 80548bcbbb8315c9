//! jira-notify - post a CI step's status as a comment on its Jira issue.
//!
//! Designed to run as a GitHub Actions step. Inputs are read from the
//! `INPUT_*` variables the runner sets for action inputs, and the run context
//! from `GITHUB_REF` and `GITHUB_EVENT_PATH`. Each input is also accepted as
//! a flag for local use.
//!
//! # Environment Variables
//!
//! - `INPUT_EMAIL` - Jira account email (required)
//! - `INPUT_TOKEN` - Jira API token (required)
//! - `INPUT_URL` - Jira site URL, e.g. `https://example.atlassian.net` (required)
//! - `INPUT_SUCCESS` - comment text when the step succeeded (required)
//! - `INPUT_FAILED` - comment text otherwise (required)
//! - `INPUT_LABEL` - pull-request label that suppresses the comment
//! - `INPUT_STATUS` - upstream step status, `success` or anything else (required)
//! - `GITHUB_REF` - triggering ref, `refs/heads/<branch>` (required)
//! - `GITHUB_EVENT_PATH` - webhook payload file, used for pull-request labels
//! - `RUST_LOG` - log filter for stderr diagnostics (default `jira_notify=info`)
//!
//! # Examples
//!
//! ```bash
//! jira-notify \
//!   --email ci@example.com --token "$JIRA_TOKEN" \
//!   --url https://example.atlassian.net \
//!   --success "Build passed" --failed "Build failed" \
//!   --status success --ref refs/heads/feature/ABC-123-login
//! ```

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jira_notify::{ActionsReporter, CiContext, CiStatus, Config, Notifier, Outcome};

/// Post a CI status comment to the Jira issue named by the branch.
#[derive(Parser)]
#[command(name = "jira-notify")]
#[command(about = "Post a CI status comment to the Jira issue named by the branch")]
#[command(version)]
struct Cli {
    /// Jira account email
    #[arg(long, env = "INPUT_EMAIL")]
    email: String,

    /// Jira API token
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: String,

    /// Jira site URL
    #[arg(long, env = "INPUT_URL")]
    url: String,

    /// Comment text when the step succeeded
    #[arg(long, env = "INPUT_SUCCESS")]
    success: String,

    /// Comment text when the step did not succeed
    #[arg(long, env = "INPUT_FAILED")]
    failed: String,

    /// Pull-request label that suppresses the comment
    #[arg(long, env = "INPUT_LABEL")]
    label: Option<String>,

    /// Upstream step status; only `success` selects the success text
    #[arg(long, env = "INPUT_STATUS")]
    status: String,

    /// Triggering git ref
    #[arg(long = "ref", env = "GITHUB_REF")]
    git_ref: String,

    /// Webhook event payload file
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries workflow commands.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jira_notify=info")),
        )
        .init();

    let mut reporter = ActionsReporter::stdout();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return fail(&mut reporter, err.to_string().trim_end()),
    };

    match run(cli).await {
        Ok(outcome) => {
            if let Err(e) = reporter.report(&outcome) {
                error!(error = %e, "Failed to write outcome");
            }
            if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => fail(&mut reporter, &format!("{err:#}")),
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    let config = Config::new(
        cli.email,
        cli.token,
        &cli.url,
        cli.success,
        cli.failed,
        cli.label,
        CiStatus::from_input(&cli.status),
    )
    .context("Failed to read inputs")?;

    let context = CiContext::load(cli.git_ref, cli.event_path.as_deref())
        .await
        .context("Failed to load CI event")?;

    let notifier = Notifier::from_config(config).context("Failed to create Jira client")?;

    notifier
        .run(&context)
        .await
        .context("Failed to notify Jira")
}

fn fail(reporter: &mut ActionsReporter<io::Stdout>, message: &str) -> ExitCode {
    error!(error = %message, "jira-notify failed");
    if let Err(e) = reporter.report_error(message) {
        error!(error = %e, "Failed to write failure");
    }
    ExitCode::FAILURE
}
