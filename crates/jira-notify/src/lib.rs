//! Jira status comments for CI runs.
//!
//! This crate posts a single comment to the Jira issue named by the branch
//! that triggered a CI run, telling the issue whether the run's step passed
//! or failed.
//!
//! # Usage
//!
//! ```no_run
//! use jira_notify::{CiContext, CiStatus, Config, Notifier};
//!
//! # async fn example() -> Result<(), jira_notify::NotifyError> {
//! let config = Config::new(
//!     "ci@example.com",
//!     "api-token",
//!     "https://example.atlassian.net",
//!     "Build passed",
//!     "Build failed",
//!     Some("no-jira".to_string()),
//!     CiStatus::from_input("success"),
//! )?;
//! let notifier = Notifier::from_config(config)?;
//!
//! let context = CiContext::new("refs/heads/feature/ABC-123-login", vec![]);
//! let outcome = notifier.run(&context).await?;
//! assert!(outcome.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! # Flow
//!
//! - [`extract_issue_key`] finds the issue key in the branch name; without
//!   one the run ends with a warning and nothing is posted
//! - [`should_skip`] checks the pull-request labels against the skip label
//! - [`CommentBody::strong`] builds the ADF comment for the status message
//! - [`IssueTracker::add_comment`] posts it once, no retries
//!
//! The [`Outcome`] is returned to the caller; [`ActionsReporter`] turns it
//! into GitHub Actions workflow commands.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod comment;
pub mod config;
pub mod context;
pub mod error;
pub mod issue_key;
pub mod labels;
pub mod outcome;
pub mod report;
pub mod tracker;

pub use auth::BasicCredential;
pub use comment::CommentBody;
pub use config::{CiStatus, Config};
pub use context::CiContext;
pub use error::NotifyError;
pub use issue_key::extract_issue_key;
pub use labels::should_skip;
pub use outcome::{Outcome, Severity};
pub use report::ActionsReporter;
pub use tracker::jira::JiraClient;
pub use tracker::{DeliveryResult, IssueTracker};

use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs one notification: extract, filter, compose, deliver.
pub struct Notifier {
    config: Config,
    tracker: Arc<dyn IssueTracker>,
}

impl Notifier {
    /// Create a notifier delivering through `tracker`.
    #[must_use]
    pub fn new(config: Config, tracker: Arc<dyn IssueTracker>) -> Self {
        Self { config, tracker }
    }

    /// Create a notifier delivering to the Jira site in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: Config) -> Result<Self, NotifyError> {
        let tracker = JiraClient::from_config(&config)?;
        Ok(Self::new(config, Arc::new(tracker)))
    }

    /// Get the configuration this notifier runs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the notification for `context`.
    ///
    /// A missing issue key or a matching skip label end the run without a
    /// request. Otherwise exactly one comment request is made and its
    /// classified result is returned as the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures outside the delivery itself, such
    /// as payload serialization.
    pub async fn run(&self, context: &CiContext) -> Result<Outcome, NotifyError> {
        let branch = context.branch_name();

        let Some(issue_key) = extract_issue_key(branch) else {
            warn!(branch, "Cannot extract issue key from branch");
            return Ok(Outcome::SkippedNoIssueKey {
                branch: branch.to_string(),
            });
        };

        debug!(branch, issue_key, "Resolved issue key");

        if let Some(label) = self.config.skip_label.as_deref() {
            if should_skip(context.labels(), label) {
                info!(issue_key, label, "Skip label present, not commenting");
                return Ok(Outcome::SkippedByLabel {
                    issue_key: issue_key.to_string(),
                    label: label.to_string(),
                });
            }
        }

        let comment = CommentBody::strong(self.config.message());

        info!(
            tracker = self.tracker.name(),
            issue_key,
            status = %self.config.status,
            "Sending status comment"
        );

        let result = self.tracker.add_comment(issue_key, &comment).await?;
        Ok(Outcome::from_delivery(issue_key, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Tracker double that records calls and answers with a fixed result.
    struct RecordingTracker {
        result: DeliveryResult,
        calls: Mutex<Vec<(String, CommentBody)>>,
    }

    impl RecordingTracker {
        fn answering(result: DeliveryResult) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: Mutex::new(vec![]),
            })
        }

        fn calls(&self) -> Vec<(String, CommentBody)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IssueTracker for RecordingTracker {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn add_comment(
            &self,
            issue_key: &str,
            comment: &CommentBody,
        ) -> Result<DeliveryResult, NotifyError> {
            self.calls
                .lock()
                .unwrap()
                .push((issue_key.to_string(), comment.clone()));
            Ok(self.result.clone())
        }
    }

    fn config(status: &str, skip_label: Option<&str>) -> Config {
        Config::new(
            "a@b.com",
            "t0k",
            "https://example.atlassian.net",
            "Build passed",
            "Build failed",
            skip_label.map(str::to_string),
            CiStatus::from_input(status),
        )
        .unwrap()
    }

    fn created() -> DeliveryResult {
        DeliveryResult::Success { status: 201 }
    }

    #[tokio::test]
    async fn test_success_status_posts_success_text() {
        let tracker = RecordingTracker::answering(created());
        let notifier = Notifier::new(config("success", None), tracker.clone());

        let outcome = notifier
            .run(&CiContext::new("refs/heads/feature/ABC-123-fix", vec![]))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Delivered {
                issue_key: "ABC-123".to_string(),
                status: 201
            }
        );
        let calls = tracker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "ABC-123");
        assert_eq!(calls[0].1, CommentBody::strong("Build passed"));
    }

    #[tokio::test]
    async fn test_other_status_posts_failure_text() {
        for status in ["failure", "cancelled", "skipped", ""] {
            let tracker = RecordingTracker::answering(created());
            let notifier = Notifier::new(config(status, None), tracker.clone());

            notifier
                .run(&CiContext::new("refs/heads/OPS-9", vec![]))
                .await
                .unwrap();

            let calls = tracker.calls();
            assert_eq!(calls.len(), 1, "status {status:?}");
            assert_eq!(calls[0].1.text(), Some("Build failed"), "status {status:?}");
        }
    }

    #[tokio::test]
    async fn test_missing_issue_key_makes_no_request() {
        let tracker = RecordingTracker::answering(created());
        let notifier = Notifier::new(config("success", None), tracker.clone());

        let outcome = notifier
            .run(&CiContext::new("refs/heads/main", vec![]))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::SkippedNoIssueKey {
                branch: "main".to_string()
            }
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.severity(), Severity::Warning);
        assert!(tracker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_skip_label_makes_no_request() {
        let tracker = RecordingTracker::answering(created());
        let notifier = Notifier::new(config("success", Some("wip")), tracker.clone());
        let context = CiContext::new(
            "refs/heads/feature/ABC-123-fix",
            vec!["ABC".to_string(), "wip".to_string()],
        );

        let outcome = notifier.run(&context).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::SkippedByLabel {
                issue_key: "ABC-123".to_string(),
                label: "wip".to_string()
            }
        );
        assert!(outcome.is_success());
        assert!(tracker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_skip_label_is_case_sensitive() {
        let tracker = RecordingTracker::answering(created());
        let notifier = Notifier::new(config("success", Some("WIP")), tracker.clone());
        let context = CiContext::new("refs/heads/ABC-1", vec!["wip".to_string()]);

        let outcome = notifier.run(&context).await.unwrap();

        assert!(matches!(outcome, Outcome::Delivered { .. }));
        assert_eq!(tracker.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_comment_fails_run() {
        let tracker = RecordingTracker::answering(DeliveryResult::Failure {
            status: 404,
            body: "Issue Does Not Exist".to_string(),
        });
        let notifier = Notifier::new(config("success", None), tracker.clone());

        let outcome = notifier
            .run(&CiContext::new("refs/heads/ABC-123", vec![]))
            .await
            .unwrap();

        assert!(!outcome.is_success());
        let message = outcome.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("Issue Does Not Exist"));
        assert_eq!(tracker.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_fails_run() {
        let tracker = RecordingTracker::answering(DeliveryResult::TransportError {
            message: "connection refused".to_string(),
        });
        let notifier = Notifier::new(config("failure", None), tracker.clone());

        let outcome = notifier
            .run(&CiContext::new("refs/heads/ABC-123", vec![]))
            .await
            .unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.to_string(), "Request error: connection refused");
    }
}
