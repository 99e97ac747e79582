//! Raw response messages as delivered by the transport collaborator.
//!
//! A search produces a chain of messages, each classified by its
//! RFC 4511 application tag. The transport adapter is responsible for
//! BER parsing and for converting its API's sentinel-terminated lists
//! into the explicit-length sequences carried here; everything above
//! this module works on owned `Bytes` with explicit lengths (embedded
//! zero bytes are legal in directory values).

use bytes::Bytes;

/// Application tag of a search result entry message (RFC 4511 `[APPLICATION 4]`).
pub const TAG_SEARCH_RESULT_ENTRY: u8 = 0x64;
/// Application tag of a search result done message (RFC 4511 `[APPLICATION 5]`).
pub const TAG_SEARCH_RESULT_DONE: u8 = 0x65;
/// Application tag of a search result reference message (RFC 4511 `[APPLICATION 19]`).
pub const TAG_SEARCH_RESULT_REFERENCE: u8 = 0x73;

/// One attribute of an entry message, still in wire encoding.
#[derive(Debug, Clone)]
pub struct RawAttribute {
    /// Attribute description (name), wire-encoded.
    pub name: Bytes,
    /// Declared value list, wire-encoded, in server return order.
    pub values: Vec<Bytes>,
}

/// Body of an entry message.
#[derive(Debug, Clone)]
pub struct EntryBody {
    /// Distinguished name, wire-encoded.
    pub dn: Bytes,
    /// The entry's attributes.
    pub attributes: Vec<RawAttribute>,
}

/// Body of a final-result message whose parse succeeded.
#[derive(Debug, Clone)]
pub struct ResultBody {
    /// Protocol result code; 0 is success.
    pub code: i32,
    /// Matched DN, wire-encoded.
    pub matched_dn: Bytes,
    /// Server-supplied diagnostic message, wire-encoded.
    pub diagnostic: Bytes,
    /// Referral URIs, wire-encoded.
    pub referrals: Vec<Bytes>,
}

/// One message of a response chain.
#[derive(Debug, Clone)]
pub enum Message {
    /// A search result entry.
    Entry(EntryBody),
    /// A continuation reference: alternate locations that may hold more
    /// matching data.
    Reference(Vec<Bytes>),
    /// The terminal result of the request.
    ///
    /// `None` means the transport reported the message as a final
    /// result but failed to parse its body; the decoder maps this to a
    /// default [`crate::Outcome`] rather than an error (see
    /// [`crate::ResultDecoder`] for the caller obligations this
    /// creates).
    FinalResult(Option<ResultBody>),
    /// A message with an unrecognized application tag. Skipped by the
    /// decoder for forward compatibility.
    Other(u8),
}

impl Message {
    /// The message's application tag.
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            Self::Entry(_) => TAG_SEARCH_RESULT_ENTRY,
            Self::Reference(_) => TAG_SEARCH_RESULT_REFERENCE,
            Self::FinalResult(_) => TAG_SEARCH_RESULT_DONE,
            Self::Other(tag) => *tag,
        }
    }
}

/// Cursor capability over a response-message chain.
///
/// Implemented by the transport collaborator (and by test doubles);
/// the decoder never assumes anything about the chain's in-memory
/// layout beyond this interface.
pub trait MessageCursor {
    /// Advance to the next message, or `None` when the chain is
    /// exhausted.
    fn next_message(&mut self) -> Option<Message>;
}

impl<I> MessageCursor for I
where
    I: Iterator<Item = Message>,
{
    fn next_message(&mut self) -> Option<Message> {
        self.next()
    }
}
