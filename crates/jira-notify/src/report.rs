//! GitHub Actions reporting.
//!
//! Outcomes are written to stdout as workflow commands
//! (`::warning::`, `::error::`) so the runner annotates the step. The exit
//! code is chosen by the caller from [`Outcome::is_success`].

use std::io::{self, Write};

use crate::outcome::{Outcome, Severity};

/// Writes outcomes as GitHub Actions workflow commands.
pub struct ActionsReporter<W> {
    out: W,
}

impl ActionsReporter<io::Stdout> {
    /// Reporter writing to the process stdout, where the runner reads commands.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ActionsReporter<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Report a terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn report(&mut self, outcome: &Outcome) -> io::Result<()> {
        self.emit(outcome.severity(), &outcome.to_string())
    }

    /// Report a failure that happened before an outcome was reached.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn report_error(&mut self, message: &str) -> io::Result<()> {
        self.emit(Severity::Error, message)
    }

    fn emit(&mut self, severity: Severity, message: &str) -> io::Result<()> {
        match severity {
            Severity::Info => writeln!(self.out, "{message}")?,
            Severity::Warning | Severity::Error => {
                writeln!(self.out, "::{}::{}", severity.as_str(), escape_data(message))?;
            }
        }
        self.out.flush()
    }

    /// Consume the reporter and return the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Escape a workflow command message so it stays on one line.
#[must_use]
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::DeliveryResult;

    fn render(outcome: &Outcome) -> String {
        let mut reporter = ActionsReporter::new(Vec::new());
        reporter.report(outcome).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_missing_key_is_warning_command() {
        let outcome = Outcome::SkippedNoIssueKey {
            branch: "main".to_string(),
        };
        assert_eq!(
            render(&outcome),
            "::warning::Cannot extract JIRA issue key from branch: main\n"
        );
    }

    #[test]
    fn test_delivered_is_plain_line() {
        let outcome = Outcome::Delivered {
            issue_key: "ABC-123".to_string(),
            status: 201,
        };
        assert_eq!(render(&outcome), "Successfully commented on ABC-123\n");
    }

    #[test]
    fn test_failed_delivery_is_error_command() {
        let outcome = Outcome::DeliveryFailed {
            issue_key: "ABC-123".to_string(),
            result: DeliveryResult::Failure {
                status: 404,
                body: "Issue Does Not Exist".to_string(),
            },
        };
        assert_eq!(
            render(&outcome),
            "::error::Failed to comment on issue ABC-123: 404 Issue Does Not Exist\n"
        );
    }

    #[test]
    fn test_multiline_body_is_escaped() {
        let mut reporter = ActionsReporter::new(Vec::new());
        reporter
            .report_error("{\"errorMessages\":[\"x\"]}\r\n100% broken")
            .unwrap();
        assert_eq!(
            String::from_utf8(reporter.into_inner()).unwrap(),
            "::error::{\"errorMessages\":[\"x\"]}%0D%0A100%25 broken\n"
        );
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("plain"), "plain");
        assert_eq!(escape_data("a%b\nc"), "a%25b%0Ac");
    }
}
