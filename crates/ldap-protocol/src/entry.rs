//! Decoded, owned response records.
//!
//! These are plain value objects owned by the [`ResultSet`] that
//! contains them; there are no back-references into wire buffers.

use std::collections::HashMap;

/// A named, possibly multi-valued property of an entry.
///
/// Value order is the server's return order and carries no guaranteed
/// meaning. `values` is non-empty by construction: the decoder omits
/// attributes whose declared value list turned out empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// The attribute's values, in server return order.
    pub values: Vec<String>,
}

/// One directory object returned by a search.
///
/// Attribute names are unique within an entry by protocol convention;
/// this is not enforced here. Entries are immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The entry's distinguished name.
    pub dn: String,
    /// The entry's attributes.
    pub attributes: Vec<Attribute>,
}

impl Entry {
    /// Look up an attribute by name (case-sensitive).
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A continuation reference: alternate locations the client may chase
/// for more matching data. Informational only; no chasing logic lives
/// in this driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Referral URIs.
    pub uris: Vec<String>,
}

/// Terminal status of one directory request.
///
/// `code == 0` is success; any other value is a protocol-level failure
/// whose standard description is available via
/// [`crate::result_code::error_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Protocol result code.
    pub code: i32,
    /// Server-supplied diagnostic message (may be empty).
    pub diagnostic: String,
    /// The closest existing ancestor DN, on name-resolution failures.
    pub matched_dn: String,
    /// Referral URIs attached to the result.
    pub referrals: Vec<String>,
}

impl Outcome {
    /// Whether the operation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// A scalar-or-list attribute value in the dictionary view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// The attribute had exactly one value.
    Single(String),
    /// The attribute had two or more values.
    Multiple(Vec<String>),
}

/// Everything decoded from one response chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// Entries, in wire order.
    pub entries: Vec<Entry>,
    /// Continuation references, in wire order.
    pub references: Vec<Reference>,
    /// The terminal result.
    ///
    /// `None` means the chain contained no final-result message at all.
    /// `Some(Outcome::default())` may also mean the final-result
    /// message was present but its body failed to parse — callers that
    /// see a default outcome must re-check the raw status of the
    /// request itself before treating the operation as successful.
    pub outcome: Option<Outcome>,
}

impl ResultSet {
    /// Collapse the entries into a DN → (name → value) dictionary.
    ///
    /// Single-valued attributes unwrap to a scalar
    /// ([`AttributeValue::Single`]); attributes with two or more values
    /// stay a list. This collapsing is lossy: a one-value attribute and
    /// a single-element list are indistinguishable in the view. Use the
    /// typed [`ResultSet::entries`] when that distinction matters.
    #[must_use]
    pub fn to_dictionary(&self) -> HashMap<String, HashMap<String, AttributeValue>> {
        self.entries
            .iter()
            .map(|entry| {
                let attrs = entry
                    .attributes
                    .iter()
                    .map(|attr| {
                        let value = if attr.values.len() == 1 {
                            AttributeValue::Single(attr.values[0].clone())
                        } else {
                            AttributeValue::Multiple(attr.values.clone())
                        };
                        (attr.name.clone(), value)
                    })
                    .collect();
                (entry.dn.clone(), attrs)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet {
            entries: vec![Entry {
                dn: "uid=alice,dc=example,dc=com".into(),
                attributes: vec![
                    Attribute {
                        name: "cn".into(),
                        values: vec!["Alice Example".into()],
                    },
                    Attribute {
                        name: "mail".into(),
                        values: vec!["alice@example.com".into(), "a.example@example.com".into()],
                    },
                ],
            }],
            references: vec![],
            outcome: Some(Outcome::default()),
        }
    }

    #[test]
    fn dictionary_unwraps_single_values() {
        let dict = sample().to_dictionary();
        let attrs = &dict["uid=alice,dc=example,dc=com"];
        assert_eq!(attrs["cn"], AttributeValue::Single("Alice Example".into()));
    }

    #[test]
    fn dictionary_keeps_multi_values_as_list() {
        let dict = sample().to_dictionary();
        let attrs = &dict["uid=alice,dc=example,dc=com"];
        assert_eq!(
            attrs["mail"],
            AttributeValue::Multiple(vec![
                "alice@example.com".into(),
                "a.example@example.com".into()
            ])
        );
    }

    #[test]
    fn attribute_lookup() {
        let set = sample();
        let entry = &set.entries[0];
        assert!(entry.attribute("cn").is_some());
        assert!(entry.attribute("uid").is_none());
    }

    #[test]
    fn outcome_success() {
        assert!(Outcome::default().is_success());
        assert!(!Outcome { code: 49, ..Outcome::default() }.is_success());
    }
}
