//! Protocol error types.

use thiserror::Error;

/// Errors raised when a response chain violates the wire contract.
///
/// The decoder itself degrades gracefully (see
/// [`crate::ResultDecoder`]); these errors are raised by callers that
/// cannot proceed without a well-formed terminal result.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The chain ended without a final-result message.
    #[error("response chain ended without a final result message")]
    MissingFinalResult,
}
