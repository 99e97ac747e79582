//! # ldap-codec
//!
//! Text conversion between a directory server's codepage and the
//! client's canonical UTF-8 representation, plus marshaling of attribute
//! values for mutation requests.
//!
//! Legacy directory deployments frequently store and return attribute
//! text in a non-Unicode codepage. This crate is the single boundary
//! where raw wire bytes become `String`s and vice versa; everything
//! above it works in canonical UTF-8 only.
//!
//! ## Components
//!
//! | Type | Role |
//! |------|------|
//! | [`Codepage`] | Named legacy encoding selection |
//! | [`CodecBridge`] | Bidirectional bytes↔text conversion |
//! | [`ValueArrayBuilder`] | Marshals value lists for add/modify requests |
//! | [`OwnedValueArray`] | Explicit-length encoded value array with deterministic release |

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod bridge;
pub mod error;
pub mod values;

pub use bridge::{Codepage, CodecBridge};
pub use error::CodecError;
pub use values::{EncodedValue, ModKind, OwnedValueArray, ValueArrayBuilder};
