//! Response-chain decoding.
//!
//! One linear pass over the message chain, O(messages + total attribute
//! values), no backtracking, entries kept in wire order.

use ldap_codec::CodecBridge;

use crate::entry::{Attribute, Entry, Outcome, Reference, ResultSet};
use crate::message::{Message, MessageCursor, ResultBody};

/// Decodes a response-message chain into a [`ResultSet`].
///
/// Each message is classified by its application tag as an entry, a
/// continuation reference, or the final result; messages with any
/// other tag are skipped silently for forward compatibility. All wire
/// text passes through the configured [`CodecBridge`].
///
/// # Malformed final results
///
/// When the transport reports a final-result message whose body it
/// could not parse, the outcome is recorded as `Outcome::default()`
/// rather than an error. A default outcome reads as "success with no
/// diagnostic", which is ambiguous — callers seeing one must re-check
/// the raw status of the request before trusting it. Both call sites
/// in `ldap-client` compensate this way.
#[derive(Debug, Clone)]
pub struct ResultDecoder {
    bridge: CodecBridge,
}

impl ResultDecoder {
    /// Create a decoder using the given codepage bridge.
    #[must_use]
    pub fn new(bridge: CodecBridge) -> Self {
        Self { bridge }
    }

    /// Consume the chain and produce the decoded result set.
    pub fn decode<C>(&self, cursor: &mut C) -> ResultSet
    where
        C: MessageCursor + ?Sized,
    {
        let mut set = ResultSet::default();

        while let Some(message) = cursor.next_message() {
            match message {
                Message::Entry(body) => {
                    let dn = self.bridge.decode(&body.dn);
                    let mut attributes = Vec::with_capacity(body.attributes.len());
                    for raw in &body.attributes {
                        // A zero-value attribute is simply omitted.
                        if raw.values.is_empty() {
                            continue;
                        }
                        attributes.push(Attribute {
                            name: self.bridge.decode(&raw.name),
                            values: raw.values.iter().map(|v| self.bridge.decode(v)).collect(),
                        });
                    }
                    set.entries.push(Entry { dn, attributes });
                }
                Message::Reference(uris) => {
                    set.references.push(Reference {
                        uris: uris.iter().map(|u| self.bridge.decode(u)).collect(),
                    });
                }
                Message::FinalResult(body) => {
                    set.outcome = Some(match body {
                        Some(body) => self.decode_outcome(&body),
                        None => {
                            tracing::debug!(
                                entries = set.entries.len(),
                                "final result body failed to parse, recording default outcome"
                            );
                            Outcome::default()
                        }
                    });
                }
                Message::Other(tag) => {
                    tracing::trace!(tag, "skipping unknown message type");
                }
            }
        }

        tracing::debug!(
            entries = set.entries.len(),
            references = set.references.len(),
            has_outcome = set.outcome.is_some(),
            "decoded response chain"
        );
        set
    }

    fn decode_outcome(&self, body: &ResultBody) -> Outcome {
        Outcome {
            code: body.code,
            diagnostic: self.bridge.decode(&body.diagnostic),
            matched_dn: self.bridge.decode(&body.matched_dn),
            referrals: body.referrals.iter().map(|r| self.bridge.decode(r)).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::message::{EntryBody, RawAttribute};
    use bytes::Bytes;

    fn entry_message(dn: &str, attrs: &[(&str, &[&str])]) -> Message {
        Message::Entry(EntryBody {
            dn: Bytes::copy_from_slice(dn.as_bytes()),
            attributes: attrs
                .iter()
                .map(|(name, values)| RawAttribute {
                    name: Bytes::copy_from_slice(name.as_bytes()),
                    values: values
                        .iter()
                        .map(|v| Bytes::copy_from_slice(v.as_bytes()))
                        .collect(),
                })
                .collect(),
        })
    }

    fn done_message(code: i32, diagnostic: &str) -> Message {
        Message::FinalResult(Some(ResultBody {
            code,
            matched_dn: Bytes::new(),
            diagnostic: Bytes::copy_from_slice(diagnostic.as_bytes()),
            referrals: vec![],
        }))
    }

    fn decode(messages: Vec<Message>) -> ResultSet {
        ResultDecoder::new(CodecBridge::utf8()).decode(&mut messages.into_iter())
    }

    #[test]
    fn counts_entries_references_and_outcome() {
        let set = decode(vec![
            entry_message("uid=a,dc=x", &[("cn", &["a"])]),
            entry_message("uid=b,dc=x", &[("cn", &["b"])]),
            Message::Reference(vec![Bytes::from_static(b"ldap://other.example/dc=x")]),
            done_message(0, ""),
        ]);
        assert_eq!(set.entries.len(), 2);
        assert_eq!(set.references.len(), 1);
        assert!(set.outcome.as_ref().unwrap().is_success());
    }

    #[test]
    fn preserves_wire_order_and_value_order() {
        let set = decode(vec![
            entry_message("uid=b,dc=x", &[("mail", &["b1@x", "b2@x"])]),
            entry_message("uid=a,dc=x", &[("cn", &["a"])]),
            done_message(0, ""),
        ]);
        assert_eq!(set.entries[0].dn, "uid=b,dc=x");
        assert_eq!(set.entries[1].dn, "uid=a,dc=x");
        assert_eq!(set.entries[0].attributes[0].values, vec!["b1@x", "b2@x"]);
    }

    #[test]
    fn omits_zero_value_attributes() {
        let set = decode(vec![
            entry_message("uid=a,dc=x", &[("cn", &["a"]), ("memberOf", &[])]),
            done_message(0, ""),
        ]);
        assert_eq!(set.entries[0].attributes.len(), 1);
        assert_eq!(set.entries[0].attributes[0].name, "cn");
    }

    #[test]
    fn skips_unknown_message_types() {
        let set = decode(vec![
            Message::Other(0x78),
            entry_message("uid=a,dc=x", &[("cn", &["a"])]),
            Message::Other(0x01),
            done_message(0, ""),
        ]);
        assert_eq!(set.entries.len(), 1);
        assert!(set.outcome.is_some());
    }

    #[test]
    fn missing_final_result_leaves_outcome_none() {
        let set = decode(vec![entry_message("uid=a,dc=x", &[("cn", &["a"])])]);
        assert!(set.outcome.is_none());
    }

    #[test]
    fn malformed_final_result_records_default_outcome() {
        let set = decode(vec![Message::FinalResult(None)]);
        assert_eq!(set.outcome, Some(Outcome::default()));
    }

    #[test]
    fn failure_outcome_carries_diagnostic() {
        let set = decode(vec![done_message(32, "no such base")]);
        let outcome = set.outcome.unwrap();
        assert_eq!(outcome.code, 32);
        assert_eq!(outcome.diagnostic, "no such base");
        assert!(!outcome.is_success());
    }

    #[test]
    fn decodes_codepage_text() {
        let bridge = CodecBridge::new(ldap_codec::Codepage::Windows1251);
        let decoder = ResultDecoder::new(bridge);
        let mut chain = vec![
            Message::Entry(EntryBody {
                dn: Bytes::from_static(b"uid=ivan,dc=x"),
                attributes: vec![RawAttribute {
                    name: Bytes::from_static(b"cn"),
                    // "Иван" in Windows-1251
                    values: vec![Bytes::from_static(&[0xC8, 0xE2, 0xE0, 0xED])],
                }],
            }),
            done_message(0, ""),
        ]
        .into_iter();
        let set = decoder.decode(&mut chain);
        assert_eq!(set.entries[0].attributes[0].values[0], "Иван");
    }
}
