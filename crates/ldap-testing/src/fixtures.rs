//! Fixture helpers for building response-message chains.

use bytes::Bytes;
use ldap_protocol::{EntryBody, Message, RawAttribute, ResultBody};

/// An entry message with UTF-8 text.
#[must_use]
pub fn entry(dn: &str, attributes: &[(&str, &[&str])]) -> Message {
    Message::Entry(EntryBody {
        dn: Bytes::copy_from_slice(dn.as_bytes()),
        attributes: attributes
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

/// A continuation-reference message.
#[must_use]
pub fn reference(uris: &[&str]) -> Message {
    Message::Reference(
        uris.iter()
            .map(|u| Bytes::copy_from_slice(u.as_bytes()))
            .collect(),
    )
}

/// A final-result message.
#[must_use]
pub fn done(code: i32, diagnostic: &str) -> Message {
    Message::FinalResult(Some(ResultBody {
        code,
        matched_dn: Bytes::new(),
        diagnostic: Bytes::copy_from_slice(diagnostic.as_bytes()),
        referrals: vec![],
    }))
}

/// A final-result message whose body failed to parse.
#[must_use]
pub fn malformed_done() -> Message {
    Message::FinalResult(None)
}

/// A chain of `n` single-attribute person entries plus a success
/// result.
#[must_use]
pub fn person_chain(n: usize) -> Vec<Message> {
    let mut chain: Vec<Message> = (0..n)
        .map(|i| {
            let dn = format!("uid=user{i},ou=people,dc=example,dc=com");
            let cn = format!("User {i}");
            entry(&dn, &[("cn", &[cn.as_str()])])
        })
        .collect();
    chain.push(done(0, ""));
    chain
}
