//! Jira Cloud REST v3 comment client.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{redirect, Url};
use tracing::{debug, info, warn};

use crate::auth::BasicCredential;
use crate::comment::CommentBody;
use crate::config::Config;
use crate::error::NotifyError;
use crate::tracker::{DeliveryResult, IssueTracker};

/// Path of the comment-creation endpoint, relative to the site URL.
const COMMENT_PATH: &str = "rest/api/3/issue";

/// Jira comment client.
pub struct JiraClient {
    base_url: Url,
    credential: BasicCredential,
    client: reqwest::Client,
}

impl JiraClient {
    /// Create a client for the Jira site at `base_url`.
    ///
    /// Redirects are not followed: a 3xx answer is reported as a failed
    /// delivery like any other non-2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: Url, credential: BasicCredential) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url,
            credential,
            client,
        })
    }

    /// Create a client from the invocation configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        Self::new(config.base_url.clone(), config.credential())
    }

    /// Full URL of the comment endpoint for `issue_key`.
    #[must_use]
    pub fn comment_url(&self, issue_key: &str) -> String {
        format!(
            "{}/{COMMENT_PATH}/{issue_key}/comment",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    fn name(&self) -> &'static str {
        "jira"
    }

    async fn add_comment(
        &self,
        issue_key: &str,
        comment: &CommentBody,
    ) -> Result<DeliveryResult, NotifyError> {
        let url = self.comment_url(issue_key);
        let payload = comment.to_bytes()?;

        debug!(
            tracker = "jira",
            issue_key,
            url = %url,
            bytes = payload.len(),
            "Posting comment"
        );

        let response = match self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.credential.header_value())
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, payload.len())
            .body(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let message = error_chain(&e);
                warn!(tracker = "jira", issue_key, error = %message, "Jira request failed");
                return Ok(DeliveryResult::TransportError { message });
            }
        };

        let status = response.status().as_u16();
        // A body cut off mid-read is a transport failure even after a 2xx status.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let message = error_chain(&e);
                warn!(
                    tracker = "jira",
                    issue_key,
                    status,
                    error = %message,
                    "Jira response body could not be read"
                );
                return Ok(DeliveryResult::TransportError { message });
            }
        };
        let result = DeliveryResult::from_response(status, body);

        match &result {
            DeliveryResult::Success { status } => {
                info!(tracker = "jira", issue_key, status, "Comment created");
            }
            DeliveryResult::Failure { status, body } => {
                warn!(
                    tracker = "jira",
                    issue_key,
                    status,
                    body = %body,
                    "Jira rejected comment"
                );
            }
            DeliveryResult::TransportError { .. } => {}
        }

        Ok(result)
    }
}

/// Render an error with its sources, `outer: inner: root`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
