//! Pull-request label filtering.

/// Check whether a pull request carrying `labels` should be skipped.
///
/// Returns true iff some label equals `skip_label` exactly. An empty skip
/// label never matches, even against an empty label name.
#[must_use]
pub fn should_skip<I, S>(labels: I, skip_label: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if skip_label.is_empty() {
        return false;
    }

    labels.into_iter().any(|label| label.as_ref() == skip_label)
}
