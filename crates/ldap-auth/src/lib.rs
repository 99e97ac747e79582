//! # ldap-auth
//!
//! Bind credentials and the interactive phase of SASL authentication,
//! isolated from connection logic for better modularity and testing.
//!
//! The SASL negotiation engine itself lives in the transport
//! collaborator; during an interactive bind it hands over a batch of
//! credential challenges (realm, identity, secret, authorization
//! identity, ...) and reads the answers back after the whole batch is
//! resolved. [`ChallengeResolver`] is the state machine that fills in
//! those answers from a [`Credentials`] value.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod challenge;
pub mod credentials;
pub mod error;
pub mod resolver;

pub use challenge::{Challenge, ChallengeKind};
pub use credentials::Credentials;
pub use error::AuthError;
pub use resolver::{ChallengeResolver, InteractFlags};
