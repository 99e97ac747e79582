//! Codec error types.

use thiserror::Error;

/// Errors that can occur while setting up text conversion.
///
/// Once a [`crate::CodecBridge`] is constructed, per-call conversion is
/// infallible (see the module documentation for the permissive decode
/// behavior); only conversion-table initialization can fail.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The requested codepage label is not a supported conversion.
    #[error("unsupported codepage: {0}")]
    UnsupportedCodepage(String),
}
