//! Issue key extraction from branch names.

use regex::Regex;
use std::sync::LazyLock;

/// Jira issue key: uppercase project prefix, hyphen, numeric id.
static ISSUE_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+-[0-9]+").expect("issue key pattern is valid"));

/// Return the leftmost issue key in `branch`, if any.
///
/// Matching is case-sensitive and the input is not trimmed or normalized,
/// so `feature/abc-123` has no key while `feature/ABC-123-fix` yields `ABC-123`.
#[must_use]
pub fn extract_issue_key(branch: &str) -> Option<&str> {
    ISSUE_KEY_PATTERN.find(branch).map(|m| m.as_str())
}
