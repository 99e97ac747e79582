//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication.
///
/// `Clone` is required because the challenge callback hands the error
/// to the negotiation engine while the client keeps a copy to surface
/// after the bind call returns.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The requested SASL mechanism is not supported.
    #[error("unsupported SASL mechanism: {0}")]
    UnsupportedMechanism(String),

    /// The negotiation engine issued a challenge kind this client does
    /// not understand. Fatal to the whole bind attempt — not a
    /// skip-and-continue condition.
    #[error("unsupported challenge kind: 0x{0:04x}")]
    UnsupportedChallenge(u32),

    /// Quiet mode was requested but the batch would require
    /// interaction; the challenge list is left untouched.
    #[error("interaction declined in quiet mode")]
    InteractionDeclined,
}
