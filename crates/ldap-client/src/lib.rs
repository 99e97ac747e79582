//! # ldap-client
//!
//! High-level directory client: bind, search, add, modify, and delete
//! over an opaque transport session, with results decoded into typed,
//! owned records.
//!
//! This is the primary public API surface of the rust-ldap-driver
//! project. The transport itself (connect, TLS, unbind, BER framing)
//! is a collaborator behind the [`DirectorySession`] trait; this crate
//! orchestrates the codepage bridge, the result decoder, and the SASL
//! challenge resolver on top of it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ldap_client::{Config, Credentials, DirectoryClient, Scope, SearchRequest};
//!
//! let config = Config::new("ldap://directory.example.com");
//! let mut client = DirectoryClient::connect(config, open_session)?;
//!
//! client.bind(&Credentials::simple("cn=admin,dc=example,dc=com", "secret"))?;
//!
//! let request = SearchRequest::new("dc=example,dc=com", Scope::Subtree)
//!     .filter("(objectClass=person)")
//!     .attributes(["cn", "mail"]);
//! let results = client.search(&request)?;
//!
//! for entry in &results.entries {
//!     println!("{}", entry.dn);
//! }
//! ```
//!
//! ## Concurrency
//!
//! One client serializes all operations on its session through a
//! single-request-at-a-time lock; the asynchronous variants run the
//! blocking form on a worker thread and deliver their result through a
//! completion callback. There is no cancellation path: a dispatched
//! operation runs to completion or failure.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod sort;

// Re-export commonly used types
pub use client::{DirectoryClient, Modification, SearchRequest};
pub use config::Config;
pub use error::Error;
pub use ldap_auth::{Challenge, ChallengeKind, ChallengeResolver, Credentials, InteractFlags};
pub use ldap_codec::{CodecBridge, Codepage, ModKind};
pub use ldap_protocol::{Attribute, AttributeValue, Entry, Outcome, Reference, ResultSet};
pub use session::{DirectorySession, Scope, SessionOption, SessionValue};
pub use sort::{SortOrder, SortSpec};
