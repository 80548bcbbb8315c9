//! Terminal results of a notifier run.

use std::fmt;

use crate::tracker::DeliveryResult;

/// How an outcome is surfaced to the CI runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational - normal operations
    Info,
    /// Warning - nothing was posted but the run is not failed
    Warning,
    /// Error - the run is failed
    Error,
}

impl Severity {
    /// Get display name for this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Result of one invocation. At most one comment is posted per outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The branch name carries no issue key; nothing was posted
    SkippedNoIssueKey { branch: String },

    /// The pull request carries the skip label; nothing was posted
    SkippedByLabel { issue_key: String, label: String },

    /// The comment was created
    Delivered { issue_key: String, status: u16 },

    /// The tracker rejected the comment or could not be reached
    DeliveryFailed {
        issue_key: String,
        result: DeliveryResult,
    },
}

impl Outcome {
    /// Build the outcome of a delivery attempt.
    #[must_use]
    pub fn from_delivery(issue_key: impl Into<String>, result: DeliveryResult) -> Self {
        let issue_key = issue_key.into();
        match result {
            DeliveryResult::Success { status } => Self::Delivered { issue_key, status },
            result => Self::DeliveryFailed { issue_key, result },
        }
    }

    /// Whether the CI step should pass. Only a failed delivery fails it.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::DeliveryFailed { .. })
    }

    /// Get the severity for this outcome.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::SkippedNoIssueKey { .. } => Severity::Warning,
            Self::SkippedByLabel { .. } | Self::Delivered { .. } => Severity::Info,
            Self::DeliveryFailed { .. } => Severity::Error,
        }
    }

    /// Issue key the outcome refers to, if one was found.
    #[must_use]
    pub fn issue_key(&self) -> Option<&str> {
        match self {
            Self::SkippedNoIssueKey { .. } => None,
            Self::SkippedByLabel { issue_key, .. }
            | Self::Delivered { issue_key, .. }
            | Self::DeliveryFailed { issue_key, .. } => Some(issue_key),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedNoIssueKey { branch } => {
                write!(f, "Cannot extract JIRA issue key from branch: {branch}")
            }
            Self::SkippedByLabel { label, .. } => {
                write!(f, "Skipping step due to label: {label}")
            }
            Self::Delivered { issue_key, .. } => {
                write!(f, "Successfully commented on {issue_key}")
            }
            Self::DeliveryFailed {
                result: result @ DeliveryResult::TransportError { .. },
                ..
            } => write!(f, "{result}"),
            Self::DeliveryFailed { issue_key, result } => {
                write!(f, "Failed to comment on issue {issue_key}: {result}")
            }
        }
    }
}
