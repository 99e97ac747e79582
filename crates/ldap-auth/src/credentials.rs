//! Credential types for directory authentication.

use std::borrow::Cow;

/// Credentials for a bind operation.
///
/// Every field is independently optional: absent fields are filled
/// from the session's current option values by the client before the
/// bind is issued, so a caller may supply only what differs from the
/// session defaults. The struct is designed to minimize copying of
/// sensitive data.
#[derive(Clone, Default)]
pub struct Credentials {
    /// SASL mechanism name (e.g. `"DIGEST-MD5"`, `"GSSAPI"`). Absent
    /// means simple bind.
    pub mechanism: Option<Cow<'static, str>>,
    /// SASL realm.
    pub realm: Option<Cow<'static, str>>,
    /// Authentication identity (authcid), or the bind DN for a simple
    /// bind.
    pub identity: Option<Cow<'static, str>>,
    /// Password.
    pub secret: Option<Cow<'static, str>>,
    /// Authorization identity (authzid).
    pub authz_id: Option<Cow<'static, str>>,
}

impl Credentials {
    /// Credentials for a simple bind.
    pub fn simple(
        identity: impl Into<Cow<'static, str>>,
        secret: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            identity: Some(identity.into()),
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    /// Credentials for an interactive SASL bind with the given
    /// mechanism.
    pub fn sasl(mechanism: impl Into<Cow<'static, str>>) -> Self {
        Self {
            mechanism: Some(mechanism.into()),
            ..Self::default()
        }
    }

    /// Set the SASL realm.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<Cow<'static, str>>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Set the authentication identity.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<Cow<'static, str>>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Set the password.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<Cow<'static, str>>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set the authorization identity.
    #[must_use]
    pub fn with_authz_id(mut self, authz_id: impl Into<Cow<'static, str>>) -> Self {
        self.authz_id = Some(authz_id.into());
        self
    }

    /// Whether these credentials request an interactive SASL bind.
    #[must_use]
    pub fn is_sasl(&self) -> bool {
        self.mechanism.is_some()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret in debug output
        f.debug_struct("Credentials")
            .field("mechanism", &self.mechanism)
            .field("realm", &self.realm)
            .field("identity", &self.identity)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("authz_id", &self.authz_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let creds = Credentials::simple("uid=alice,dc=example", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn sasl_detection() {
        assert!(Credentials::sasl("DIGEST-MD5").is_sasl());
        assert!(!Credentials::simple("dn", "pw").is_sasl());
    }
}
