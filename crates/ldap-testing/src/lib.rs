//! # ldap-testing
//!
//! Test infrastructure for LDAP driver development.
//!
//! Provides a scripted in-memory [`MockSession`] standing in for the
//! transport collaborator (no server required), plus fixture helpers
//! for building response-message chains. The driver's integration
//! tests live in this crate's `tests/` directory to avoid a circular
//! dev-dependency on `ldap-client`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ldap_testing::{MockSession, fixtures};
//!
//! let (session, handle) = MockSession::new();
//! handle.queue_search(vec![
//!     fixtures::entry("uid=alice,dc=example", &[("cn", &["Alice"])]),
//!     fixtures::done(0, ""),
//! ]);
//! // hand `session` to DirectoryClient::with_session(...)
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod fixtures;
pub mod mock_session;

pub use mock_session::{MockCall, MockHandle, MockSession};
