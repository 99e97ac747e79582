//! Client configuration.

use std::time::Duration;

use ldap_codec::Codepage;

/// Configuration for one directory client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory server URL, handed to the transport's session
    /// initializer (e.g. `ldap://directory.example.com`).
    pub url: String,
    /// The codepage the directory speaks. [`Codepage::Utf8`] skips
    /// transcoding entirely.
    pub codepage: Codepage,
    /// Network timeout forwarded to the session as an option; the
    /// transport enforces it, the core does not.
    pub network_timeout: Option<Duration>,
}

impl Config {
    /// Configuration with default settings for the given URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            codepage: Codepage::Utf8,
            network_timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Set the directory codepage.
    #[must_use]
    pub fn codepage(mut self, codepage: Codepage) -> Self {
        self.codepage = codepage;
        self
    }

    /// Set the network timeout, or `None` to leave the transport's
    /// default untouched.
    #[must_use]
    pub fn network_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.network_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("ldap://localhost");
        assert_eq!(config.url, "ldap://localhost");
        assert_eq!(config.codepage, Codepage::Utf8);
        assert_eq!(config.network_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn builder() {
        let config = Config::new("ldaps://dir.example.com")
            .codepage(Codepage::Windows1251)
            .network_timeout(None);
        assert_eq!(config.codepage, Codepage::Windows1251);
        assert_eq!(config.network_timeout, None);
    }
}
