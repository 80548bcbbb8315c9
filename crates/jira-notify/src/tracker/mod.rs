//! Issue tracker clients.

pub mod jira;

use async_trait::async_trait;
use std::fmt;

use crate::comment::CommentBody;
use crate::error::NotifyError;

/// Trait for issue trackers that accept comments (Jira today).
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Get the name of this tracker.
    fn name(&self) -> &'static str;

    /// Post `comment` on `issue_key`, attempting exactly one request.
    ///
    /// Transport failures and non-2xx responses are returned as
    /// [`DeliveryResult`] values, not as errors.
    async fn add_comment(
        &self,
        issue_key: &str,
        comment: &CommentBody,
    ) -> Result<DeliveryResult, NotifyError>;
}

/// Classified result of one comment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    /// The tracker answered with a 2xx status
    Success { status: u16 },
    /// The tracker answered with any other status
    Failure { status: u16, body: String },
    /// No response: DNS, connect, TLS, reset, timeout
    TransportError { message: String },
}

impl DeliveryResult {
    /// Classify a response by status code alone.
    #[must_use]
    pub fn from_response(status: u16, body: String) -> Self {
        if (200..300).contains(&status) {
            Self::Success { status }
        } else {
            Self::Failure { status, body }
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl fmt::Display for DeliveryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { status } => write!(f, "{status}"),
            Self::Failure { status, body } => write!(f, "{status} {body}"),
            Self::TransportError { message } => write!(f, "Request error: {message}"),
        }
    }
}
