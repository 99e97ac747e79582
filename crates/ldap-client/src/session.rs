//! The opaque transport session interface.
//!
//! Connect/TLS/unbind, BER framing, and the SASL negotiation engine
//! all live behind this trait. Implementations receive and return
//! explicit-length byte sequences only; if the underlying API speaks
//! sentinel-terminated arrays, the length↔sentinel conversion is the
//! implementor's job, keeping that discipline out of the core.

use bytes::Bytes;
use ldap_auth::{AuthError, Challenge, InteractFlags};
use ldap_codec::OwnedValueArray;
use ldap_protocol::MessageCursor;
use ldap_protocol::result_code;

/// Search scope of a directory search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// The base object only.
    Base,
    /// Immediate children of the base object.
    OneLevel,
    /// The base object and its whole subtree.
    #[default]
    Subtree,
}

impl Scope {
    /// The wire value of this scope (RFC 4511 `SearchRequest.scope`).
    #[must_use]
    pub fn wire_value(self) -> u8 {
        match self {
            Self::Base => 0,
            Self::OneLevel => 1,
            Self::Subtree => 2,
        }
    }
}

/// Keys of session options the core reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SessionOption {
    /// Network timeout applied by the transport to each request.
    NetworkTimeout,
    /// Default SASL realm configured on the session.
    SaslRealm,
    /// Default authentication identity configured on the session.
    SaslAuthcId,
    /// Default bind secret configured on the session.
    SaslSecret,
    /// Default authorization identity configured on the session.
    SaslAuthzId,
    /// Default SASL mechanism configured on the session.
    SaslMechanism,
}

/// A session option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValue {
    /// Text-valued option.
    Text(String),
    /// Numeric option (e.g. a timeout in milliseconds).
    Number(i64),
}

impl SessionValue {
    /// The text payload, if this is a text option.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }
}

/// The transport collaborator: one bound connection to a directory
/// server.
///
/// All methods are synchronous and report completion through a
/// protocol result code (0 is success). A failed `search` carries its
/// result code in `Result::Err` since no message chain exists to
/// return; `set_option` is the one transport-level call with no result
/// code, so it reports failure as a human-readable message.
///
/// A session is a single shared mutable resource. The transport does
/// not guarantee two requests can execute concurrently on one handle;
/// [`crate::DirectoryClient`] serializes access accordingly.
pub trait DirectorySession: Send {
    /// Simple bind with an identity and a credential buffer.
    fn bind_simple(&mut self, identity: &[u8], secret: &[u8]) -> i32;

    /// Interactive SASL bind. The negotiation engine drives the
    /// handshake and calls `interact` with batches of challenges; the
    /// callback's error, if any, aborts the exchange.
    fn bind_interactive(
        &mut self,
        mechanism: &str,
        flags: InteractFlags,
        interact: &mut dyn FnMut(InteractFlags, &mut [Challenge]) -> Result<(), AuthError>,
    ) -> i32;

    /// Issue a search and return the response-message chain.
    ///
    /// `sort` is the textual sort-control specification described in
    /// [`crate::SortSpec`], or `None` for server order.
    #[allow(clippy::too_many_arguments)]
    fn search(
        &mut self,
        base: &[u8],
        scope: Scope,
        filter: &[u8],
        attributes: &[Bytes],
        sort: Option<&str>,
    ) -> Result<Box<dyn MessageCursor + Send>, i32>;

    /// Add an entry with the given per-attribute value arrays.
    fn add(&mut self, dn: &[u8], values: &[OwnedValueArray]) -> i32;

    /// Apply the given per-attribute modifications to an entry.
    fn modify(&mut self, dn: &[u8], values: &[OwnedValueArray]) -> i32;

    /// Delete an entry.
    fn delete(&mut self, dn: &[u8]) -> i32;

    /// Read a session option's current value.
    fn get_option(&self, key: SessionOption) -> Option<SessionValue>;

    /// Set a session option.
    fn set_option(&mut self, key: SessionOption, value: SessionValue) -> Result<(), String>;

    /// Human-readable description of a result code.
    ///
    /// The default delegates to the standard code table; transports
    /// with richer server-specific descriptions may override it. The
    /// returned text must never be empty.
    fn error_text(&self, code: i32) -> String {
        result_code::error_text(code).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_wire_values() {
        assert_eq!(Scope::Base.wire_value(), 0);
        assert_eq!(Scope::OneLevel.wire_value(), 1);
        assert_eq!(Scope::Subtree.wire_value(), 2);
    }
}
