//! Validated configuration for one invocation.

use reqwest::Url;
use std::fmt;
use std::str::FromStr;

use crate::auth::BasicCredential;
use crate::error::NotifyError;

/// Outcome of the upstream CI step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiStatus {
    /// The step reported exactly `success`
    Success,
    /// Any other value (`failure`, `cancelled`, empty, ...)
    Failure,
}

impl CiStatus {
    /// Map the raw status input; only the literal `success` counts as success.
    #[must_use]
    pub fn from_input(raw: &str) -> Self {
        if raw == "success" {
            Self::Success
        } else {
            Self::Failure
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl FromStr for CiStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_input(s))
    }
}

impl fmt::Display for CiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notifier configuration.
#[derive(Clone)]
pub struct Config {
    /// Jira account email used for Basic auth.
    pub email: String,
    /// Jira API token.
    pub token: String,
    /// Jira site base URL, e.g. `https://example.atlassian.net`.
    pub base_url: Url,
    /// Comment text when the step succeeded.
    pub success_message: String,
    /// Comment text for every other status.
    pub failure_message: String,
    /// Pull-request label that suppresses the comment.
    pub skip_label: Option<String>,
    /// Upstream step status.
    pub status: CiStatus,
}

impl Config {
    /// Build a configuration from raw inputs, validating the URL.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Config`] if `url` is not an absolute http(s) URL.
    pub fn new(
        email: impl Into<String>,
        token: impl Into<String>,
        url: &str,
        success_message: impl Into<String>,
        failure_message: impl Into<String>,
        skip_label: Option<String>,
        status: CiStatus,
    ) -> Result<Self, NotifyError> {
        Ok(Self {
            email: email.into(),
            token: token.into(),
            base_url: parse_base_url(url)?,
            success_message: success_message.into(),
            failure_message: failure_message.into(),
            skip_label: skip_label.filter(|label| !label.is_empty()),
            status,
        })
    }

    /// Comment text selected by the step status.
    #[must_use]
    pub fn message(&self) -> &str {
        match self.status {
            CiStatus::Success => &self.success_message,
            CiStatus::Failure => &self.failure_message,
        }
    }

    /// Basic credential derived from email and token.
    #[must_use]
    pub fn credential(&self) -> BasicCredential {
        BasicCredential::new(&self.email, &self.token)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("email", &self.email)
            .field("token", &"***")
            .field("base_url", &self.base_url.as_str())
            .field("success_message", &self.success_message)
            .field("failure_message", &self.failure_message)
            .field("skip_label", &self.skip_label)
            .field("status", &self.status)
            .finish()
    }
}

/// Parse and check the Jira base URL.
///
/// # Errors
///
/// Returns [`NotifyError::Config`] for unparsable, relative or non-http(s)
/// URLs, and for URLs carrying a query or fragment.
pub fn parse_base_url(raw: &str) -> Result<Url, NotifyError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| NotifyError::Config(format!("url '{raw}' is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => {}
        scheme => {
            return Err(NotifyError::Config(format!(
                "url '{raw}' must be an http(s) URL with a host, got scheme '{scheme}'"
            )))
        }
    }

    // The endpoint path is appended to the URL text.
    if url.query().is_some() || url.fragment().is_some() {
        return Err(NotifyError::Config(format!(
            "url '{raw}' must not contain a query or fragment"
        )));
    }

    Ok(url)
}
