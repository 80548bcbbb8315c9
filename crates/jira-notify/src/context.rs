//! CI run context: triggering ref and pull-request labels.
//!
//! In GitHub Actions the ref comes from `GITHUB_REF` and the labels from the
//! webhook payload stored at `GITHUB_EVENT_PATH`. Both are passed in
//! explicitly so the notifier never reads process globals.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::NotifyError;

/// Prefix GitHub puts in front of branch refs.
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Read-only description of the CI event being reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiContext {
    git_ref: String,
    labels: Vec<String>,
}

impl CiContext {
    /// Context for a ref with the given pull-request labels.
    #[must_use]
    pub fn new(git_ref: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            git_ref: git_ref.into(),
            labels,
        }
    }

    /// Load the context from a ref and an optional event payload file.
    ///
    /// A path that does not exist is treated as an empty payload (no labels).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Event`] if the file's existence cannot be
    /// determined, or it exists but cannot be read or is not a JSON object.
    pub async fn load(
        git_ref: impl Into<String>,
        event_path: Option<&Path>,
    ) -> Result<Self, NotifyError> {
        let git_ref = git_ref.into();

        let Some(path) = event_path else {
            debug!("No event payload path, assuming no pull request");
            return Ok(Self::new(git_ref, vec![]));
        };

        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| event_error(path, &e))?;
        if !exists {
            warn!(path = %path.display(), "Event payload file does not exist");
            return Ok(Self::new(git_ref, vec![]));
        }

        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| event_error(path, &e))?;
        let labels = pull_request_labels(&raw).map_err(|e| event_error(path, &e))?;

        debug!(label_count = labels.len(), "Loaded pull request labels");
        Ok(Self::new(git_ref, labels))
    }

    /// The raw git ref, e.g. `refs/heads/feature/ABC-1`.
    #[must_use]
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    /// Branch name: the ref with `refs/heads/` stripped, or the ref unchanged.
    #[must_use]
    pub fn branch_name(&self) -> &str {
        self.git_ref
            .strip_prefix(BRANCH_REF_PREFIX)
            .unwrap_or(&self.git_ref)
    }

    /// Labels of the triggering pull request; empty for other events.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

fn event_error(path: &Path, err: &dyn std::fmt::Display) -> NotifyError {
    NotifyError::Event {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Extract `pull_request.labels[].name` from a webhook payload.
///
/// # Errors
///
/// Returns a JSON error when the payload is not an object of the expected shape.
pub fn pull_request_labels(payload: &str) -> Result<Vec<String>, serde_json::Error> {
    let event: EventPayload = serde_json::from_str(payload)?;

    Ok(event
        .pull_request
        .and_then(|pr| pr.labels)
        .unwrap_or_default()
        .into_iter()
        .map(|label| label.name)
        .collect())
}

// =============================================================================
// GitHub webhook payload types
// =============================================================================

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    labels: Option<Vec<LabelPayload>>,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    name: String,
}
