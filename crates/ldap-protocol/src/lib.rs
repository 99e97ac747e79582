//! # ldap-protocol
//!
//! Typed data model for directory search responses and the decoder
//! that produces it from a server's response-message chain.
//!
//! The transport collaborator hands back search results as a chain of
//! heterogeneous messages: entries, continuation references, and a
//! final result carrying the operation's status. [`ResultDecoder`]
//! walks that chain once, in wire order, and reconstructs a
//! [`ResultSet`] of owned, memory-safe records with all text decoded
//! through the configured codepage bridge.
//!
//! The chain itself stays opaque: the decoder only sees the
//! [`MessageCursor`] capability, never the transport's memory layout.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod decoder;
pub mod entry;
pub mod error;
pub mod message;
pub mod result_code;

pub use decoder::ResultDecoder;
pub use entry::{Attribute, AttributeValue, Entry, Outcome, Reference, ResultSet};
pub use error::ProtocolError;
pub use message::{EntryBody, Message, MessageCursor, RawAttribute, ResultBody};
