//! HTTP Basic credentials for the Jira REST API.

use base64::Engine;
use std::fmt;

/// Base64-encoded `email:token` pair, ready for an `Authorization: Basic` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredential(String);

impl BasicCredential {
    /// Encode `email` and `token` with standard (padded) Base64.
    #[must_use]
    pub fn new(email: &str, token: &str) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{email}:{token}"));
        Self(encoded)
    }

    /// The encoded credential, without the `Basic ` scheme prefix.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.0
    }

    /// Full `Authorization` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.0)
    }
}

impl fmt::Debug for BasicCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BasicCredential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_email_and_token() {
        let credential = BasicCredential::new("a@b.com", "t0k");
        // base64("a@b.com:t0k")
        assert_eq!(credential.encoded(), "YUBiLmNvbTp0MGs=");
        assert_eq!(credential.header_value(), "Basic YUBiLmNvbTp0MGs=");
    }

    #[test]
    fn test_encoding_decodes_back_to_pair() {
        let credential = BasicCredential::new("dev@example.org", "s3cr3t:with:colons");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(credential.encoded())
            .unwrap();
        assert_eq!(decoded, b"dev@example.org:s3cr3t:with:colons");
    }

    #[test]
    fn test_debug_hides_secret() {
        let credential = BasicCredential::new("a@b.com", "t0k");
        assert_eq!(format!("{credential:?}"), "BasicCredential(***)");
    }
}
