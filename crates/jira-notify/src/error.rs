//! Error types for the Jira notifier.

use thiserror::Error;

/// Errors that abort an invocation before or around delivery.
///
/// A non-2xx response or a transport failure is *not* an error here; those
/// are classified into [`crate::DeliveryResult`] and reported as an outcome.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// An input is missing or malformed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The CI event payload could not be read or parsed
    #[error("Invalid event payload {path}: {reason}")]
    Event { path: String, reason: String },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
