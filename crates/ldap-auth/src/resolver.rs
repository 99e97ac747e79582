//! The interactive-bind challenge state machine.

use bytes::{Bytes, BytesMut};
use ldap_codec::CodecBridge;

use crate::challenge::{Challenge, ChallengeKind};
use crate::credentials::Credentials;
use crate::error::AuthError;

/// Flags passed by the negotiation engine alongside a challenge batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractFlags {
    /// Normal interactive resolution.
    #[default]
    Interactive,
    /// Quiet mode: the caller forbids interaction. The batch must be
    /// refused without touching the challenge list; the engine falls
    /// back to its own defaults.
    Quiet,
}

/// Answers a batch of credential challenges from one [`Credentials`]
/// value.
///
/// The resolver is scoped to a single bind call. Non-empty answers are
/// appended to one growable accumulation buffer owned by the resolver;
/// each challenge's answer is a view of the just-appended region, not
/// a copy, because the negotiation engine reads answers only after the
/// whole batch is resolved. The buffer (and every answer view into it)
/// stays alive until the resolver is dropped after the bind returns,
/// success or failure.
///
/// State transitions per challenge:
///
/// | kind | action |
/// |------|--------|
/// | realm / identity / secret / authz-id | answer from credentials |
/// | no-echo / echo prompt | skip; the engine supplies its own default |
/// | end-of-list | stop, success |
/// | anything else | stop, fatal [`AuthError::UnsupportedChallenge`] |
#[derive(Debug)]
pub struct ChallengeResolver {
    credentials: Credentials,
    bridge: CodecBridge,
    answers: BytesMut,
}

impl ChallengeResolver {
    /// Create a resolver for one bind call.
    #[must_use]
    pub fn new(credentials: Credentials, bridge: CodecBridge) -> Self {
        Self {
            credentials,
            bridge,
            answers: BytesMut::new(),
        }
    }

    /// Entry point matching the negotiation engine's callback contract.
    ///
    /// Quiet mode short-circuits to [`AuthError::InteractionDeclined`]
    /// without touching the challenge list — a non-fatal status the
    /// engine maps to its own defaults.
    pub fn interact(
        &mut self,
        flags: InteractFlags,
        challenges: &mut [Challenge],
    ) -> Result<(), AuthError> {
        if flags == InteractFlags::Quiet {
            return Err(AuthError::InteractionDeclined);
        }
        self.resolve_all(challenges)
    }

    /// Resolve every challenge in the batch, in order, until the
    /// end-of-list terminator.
    ///
    /// An [`ChallengeKind::Unknown`] challenge aborts immediately:
    /// challenges after it are left unresolved and the bind must be
    /// surfaced as a login failure, not retried.
    pub fn resolve_all(&mut self, challenges: &mut [Challenge]) -> Result<(), AuthError> {
        for challenge in challenges.iter_mut() {
            if !challenge.prompt.is_empty() {
                let prompt = self.bridge.decode(&challenge.prompt);
                tracing::trace!(kind = ?challenge.kind, prompt = %prompt, "resolving challenge");
            }
            match challenge.kind {
                ChallengeKind::Realm => {
                    challenge.answer = Some(self.answer_from(self.credentials.realm.clone()));
                }
                ChallengeKind::Identity => {
                    challenge.answer = Some(self.answer_from(self.credentials.identity.clone()));
                }
                ChallengeKind::Secret => {
                    challenge.answer = Some(self.answer_from(self.credentials.secret.clone()));
                }
                ChallengeKind::AuthorizationIdentity => {
                    challenge.answer = Some(self.answer_from(self.credentials.authz_id.clone()));
                }
                ChallengeKind::NoEchoPrompt | ChallengeKind::EchoPrompt => {
                    // The engine answers its own prompts.
                }
                ChallengeKind::EndOfList => return Ok(()),
                ChallengeKind::Unknown(id) => {
                    tracing::debug!(id, "aborting bind on unknown challenge kind");
                    return Err(AuthError::UnsupportedChallenge(id));
                }
            }
        }
        Ok(())
    }

    /// Append one answer to the accumulation buffer and return a view
    /// of the appended region. Empty answers take the zero-length
    /// shortcut: no append, a static empty view.
    fn answer_from(&mut self, text: Option<std::borrow::Cow<'static, str>>) -> Bytes {
        let text = text.as_deref().unwrap_or("");
        if text.is_empty() {
            return Bytes::new();
        }
        let encoded = self.bridge.encode(text);
        self.answers.extend_from_slice(&encoded);
        self.answers.split().freeze()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn resolver(credentials: Credentials) -> ChallengeResolver {
        ChallengeResolver::new(credentials, CodecBridge::utf8())
    }

    #[test]
    fn answers_identity_then_secret() {
        let creds = Credentials::sasl("DIGEST-MD5")
            .with_identity("alice")
            .with_secret("hunter2");
        let mut batch = vec![
            Challenge::new(ChallengeKind::Identity),
            Challenge::new(ChallengeKind::Secret),
            Challenge::end_of_list(),
        ];
        resolver(creds).resolve_all(&mut batch).unwrap();
        assert_eq!(batch[0].answer.as_deref(), Some(b"alice".as_slice()));
        assert_eq!(batch[1].answer.as_deref(), Some(b"hunter2".as_slice()));
        assert!(batch[2].answer.is_none());
    }

    #[test]
    fn absent_credential_yields_empty_answer() {
        let mut batch = vec![
            Challenge::new(ChallengeKind::Realm),
            Challenge::end_of_list(),
        ];
        resolver(Credentials::sasl("DIGEST-MD5")).resolve_all(&mut batch).unwrap();
        assert_eq!(batch[0].answer.as_deref(), Some(b"".as_slice()));
    }

    #[test]
    fn prompts_are_skipped() {
        let mut batch = vec![
            Challenge::new(ChallengeKind::EchoPrompt),
            Challenge::new(ChallengeKind::NoEchoPrompt),
            Challenge::end_of_list(),
        ];
        resolver(Credentials::default()).resolve_all(&mut batch).unwrap();
        assert!(batch[0].answer.is_none());
        assert!(batch[1].answer.is_none());
    }

    #[test]
    fn unknown_kind_is_fatal_and_stops_processing() {
        let creds = Credentials::sasl("DIGEST-MD5").with_identity("alice");
        let mut batch = vec![
            Challenge::new(ChallengeKind::Unknown(0x9999)),
            Challenge::new(ChallengeKind::Identity),
            Challenge::end_of_list(),
        ];
        let err = resolver(creds).resolve_all(&mut batch).unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedChallenge(0x9999)));
        // The item after the unknown one was never touched.
        assert!(batch[1].answer.is_none());
    }

    #[test]
    fn quiet_mode_declines_without_touching_batch() {
        let creds = Credentials::sasl("DIGEST-MD5").with_identity("alice");
        let mut batch = vec![
            Challenge::new(ChallengeKind::Identity),
            Challenge::end_of_list(),
        ];
        let err = resolver(creds)
            .interact(InteractFlags::Quiet, &mut batch)
            .unwrap_err();
        assert!(matches!(err, AuthError::InteractionDeclined));
        assert!(batch[0].answer.is_none());
    }

    #[test]
    fn answers_survive_the_batch() {
        // The engine reads answers after the whole batch is resolved;
        // views must stay valid for as long as the challenges live.
        let creds = Credentials::sasl("DIGEST-MD5")
            .with_identity("alice")
            .with_secret("hunter2")
            .with_realm("EXAMPLE.COM");
        let mut batch = vec![
            Challenge::new(ChallengeKind::Realm),
            Challenge::new(ChallengeKind::Identity),
            Challenge::new(ChallengeKind::Secret),
            Challenge::end_of_list(),
        ];
        let mut r = resolver(creds);
        r.resolve_all(&mut batch).unwrap();
        drop(r);
        assert_eq!(batch[0].answer.as_deref(), Some(b"EXAMPLE.COM".as_slice()));
        assert_eq!(batch[1].answer.as_deref(), Some(b"alice".as_slice()));
        assert_eq!(batch[2].answer.as_deref(), Some(b"hunter2".as_slice()));
    }

    #[test]
    fn answers_encode_through_bridge() {
        let creds = Credentials::sasl("DIGEST-MD5").with_identity("Иван");
        let mut batch = vec![
            Challenge::new(ChallengeKind::Identity),
            Challenge::end_of_list(),
        ];
        let mut r = ChallengeResolver::new(creds, CodecBridge::new(ldap_codec::Codepage::Windows1251));
        r.resolve_all(&mut batch).unwrap();
        assert_eq!(batch[0].answer.as_deref(), Some([0xC8, 0xE2, 0xE0, 0xED].as_slice()));
    }
}
