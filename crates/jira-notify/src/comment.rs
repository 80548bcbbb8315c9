//! Jira comment payloads in Atlassian Document Format (ADF).
//!
//! Jira Cloud's v3 REST API rejects plain-string comment bodies; a comment is
//! a document made of block nodes (paragraphs) holding inline nodes (text)
//! with optional formatting marks. Only the subset this tool emits is modelled.

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// ADF schema version accepted by Jira Cloud.
pub const ADF_VERSION: u32 = 1;

/// Request body for `POST /rest/api/3/issue/{key}/comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentBody {
    pub body: Document,
}

impl CommentBody {
    /// Build a comment holding `message` as a single bold paragraph.
    #[must_use]
    pub fn strong(message: impl Into<String>) -> Self {
        Self {
            body: Document {
                kind: DocumentKind::Doc,
                version: ADF_VERSION,
                content: vec![Block::Paragraph {
                    content: vec![Inline::Text {
                        text: message.into(),
                        marks: vec![Mark::Strong],
                    }],
                }],
            },
        }
    }

    /// The text of the first text node, if the document has one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.first_text().map(|(text, _)| text)
    }

    /// Whether the first text node carries the `strong` mark.
    #[must_use]
    pub fn is_strong(&self) -> bool {
        self.first_text()
            .is_some_and(|(_, marks)| marks.contains(&Mark::Strong))
    }

    /// Serialize to the exact bytes sent on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Serialization`] if JSON encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, NotifyError> {
        Ok(serde_json::to_vec(self)?)
    }

    fn first_text(&self) -> Option<(&str, &[Mark])> {
        self.body
            .content
            .iter()
            .flat_map(|block| match block {
                Block::Paragraph { content } => content.iter(),
            })
            .map(|inline| match inline {
                Inline::Text { text, marks } => (text.as_str(), marks.as_slice()),
            })
            .next()
    }
}

/// Root `doc` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub version: u32,
    pub content: Vec<Block>,
}

/// Type tag of the root node; ADF only defines `doc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Doc,
}

/// Top-level block nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph { content: Vec<Inline> },
}

/// Inline nodes inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
}

/// Text formatting marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Strong,
}
