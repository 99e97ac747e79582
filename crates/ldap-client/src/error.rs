//! Client error types.

use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Session-level failure: initialization or option handling.
    /// Fatal to the affected call only.
    #[error("session error: {0}")]
    Session(String),

    /// A completed request finished with a non-zero result code. The
    /// diagnostic is never empty: when the server supplied none, the
    /// standard description for the code is used.
    #[error("directory error {code}: {diagnostic}")]
    Directory {
        /// Protocol result code.
        code: i32,
        /// Human-readable explanation.
        diagnostic: String,
    },

    /// Authentication failure: unsupported mechanism or challenge.
    /// Fatal to the bind attempt, not retryable.
    #[error("authentication failed: {0}")]
    Authentication(#[from] ldap_auth::AuthError),

    /// Codepage setup failure.
    #[error("codec error: {0}")]
    Codec(#[from] ldap_codec::CodecError),

    /// The response chain violated the wire contract.
    #[error("protocol error: {0}")]
    Protocol(#[from] ldap_protocol::ProtocolError),
}

impl Error {
    /// Build a [`Error::Directory`] from a result code and the
    /// server-supplied diagnostic, falling back to the standard code
    /// description so the text is never empty.
    #[must_use]
    pub fn directory(code: i32, server_diagnostic: &str, fallback: String) -> Self {
        let diagnostic = if server_diagnostic.is_empty() {
            fallback
        } else {
            server_diagnostic.to_owned()
        };
        Self::Directory { code, diagnostic }
    }

    /// The protocol result code, if this is a directory error.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Directory { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_error_falls_back_to_code_text() {
        let err = Error::directory(49, "", "invalid credentials".to_owned());
        assert_eq!(err.to_string(), "directory error 49: invalid credentials");
    }

    #[test]
    fn directory_error_prefers_server_diagnostic() {
        let err = Error::directory(32, "no such base DN", "no such object".to_owned());
        assert_eq!(err.to_string(), "directory error 32: no such base DN");
        assert_eq!(err.code(), Some(32));
    }
}
