//! Credential challenges issued by the SASL negotiation engine.

use bytes::Bytes;

/// SASL interaction identifiers, mirroring the Cyrus SASL `SASL_CB_*`
/// callback codes the negotiation engine uses on the wire.
const CB_AUTHNAME: u32 = 0x4002;
const CB_PASS: u32 = 0x4004;
const CB_ECHOPROMPT: u32 = 0x4005;
const CB_NOECHOPROMPT: u32 = 0x4006;
const CB_GETREALM: u32 = 0x4008;
const CB_USER: u32 = 0x4001;
const CB_LIST_END: u32 = 0;

/// What a single challenge is asking for.
///
/// The untyped challenge-kind integer of the wire interface is mapped
/// to this exhaustive enum; the `Unknown` arm forces every consumer to
/// decide explicitly what an unrecognized kind means (for the resolver
/// it is fatal to the whole bind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    /// SASL realm.
    Realm,
    /// Authentication identity (authcid).
    Identity,
    /// Password.
    Secret,
    /// Authorization identity (authzid).
    AuthorizationIdentity,
    /// Free-form prompt the engine will answer with its own default;
    /// input must not be echoed.
    NoEchoPrompt,
    /// Free-form prompt the engine will answer with its own default.
    EchoPrompt,
    /// Terminator of a challenge batch.
    EndOfList,
    /// A kind this client does not understand.
    Unknown(u32),
}

impl ChallengeKind {
    /// Map a wire interaction identifier to a challenge kind.
    #[must_use]
    pub fn from_wire(id: u32) -> Self {
        match id {
            CB_GETREALM => Self::Realm,
            CB_AUTHNAME => Self::Identity,
            CB_PASS => Self::Secret,
            CB_USER => Self::AuthorizationIdentity,
            CB_NOECHOPROMPT => Self::NoEchoPrompt,
            CB_ECHOPROMPT => Self::EchoPrompt,
            CB_LIST_END => Self::EndOfList,
            other => Self::Unknown(other),
        }
    }
}

/// One pending challenge in a batch.
///
/// Issued by the negotiation engine, resolved in place by the
/// [`crate::ChallengeResolver`], and read back by the engine after the
/// whole batch is resolved; discarded once the bind call returns.
#[derive(Debug, Clone)]
pub struct Challenge {
    /// What is being asked for.
    pub kind: ChallengeKind,
    /// Prompt text supplied by the engine, in the directory codepage.
    pub prompt: Bytes,
    /// The resolved answer; `None` until resolved, and left `None` for
    /// prompt kinds the engine answers itself.
    pub answer: Option<Bytes>,
}

impl Challenge {
    /// A challenge with no prompt text.
    #[must_use]
    pub fn new(kind: ChallengeKind) -> Self {
        Self {
            kind,
            prompt: Bytes::new(),
            answer: None,
        }
    }

    /// The batch terminator.
    #[must_use]
    pub fn end_of_list() -> Self {
        Self::new(ChallengeKind::EndOfList)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_mapping() {
        assert_eq!(ChallengeKind::from_wire(0x4008), ChallengeKind::Realm);
        assert_eq!(ChallengeKind::from_wire(0x4002), ChallengeKind::Identity);
        assert_eq!(ChallengeKind::from_wire(0x4004), ChallengeKind::Secret);
        assert_eq!(ChallengeKind::from_wire(0x4001), ChallengeKind::AuthorizationIdentity);
        assert_eq!(ChallengeKind::from_wire(0), ChallengeKind::EndOfList);
        assert_eq!(ChallengeKind::from_wire(0x9999), ChallengeKind::Unknown(0x9999));
    }
}
