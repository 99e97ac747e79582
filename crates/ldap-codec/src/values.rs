//! Marshaling of attribute value lists for mutation requests.
//!
//! Add and modify requests carry, per attribute, an array of encoded
//! values. Directory values may contain embedded zero bytes, so the
//! wire form pairs every value with its explicit length rather than
//! relying on a terminator; only the transport adapter ever converts
//! these arrays into whatever sentinel discipline its API demands.
//!
//! Release is deterministic: [`OwnedValueArray`] frees its buffers when
//! dropped, on every exit path including errors, and the builder keeps
//! an outstanding-array count so tests can verify nothing leaks and
//! nothing is released twice.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;

use crate::bridge::CodecBridge;

/// The modification kind tagged onto one value array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModKind {
    /// Add the listed values to the attribute.
    AddValues,
    /// Replace the attribute's values with the listed ones.
    ReplaceValues,
    /// Delete the listed values from the attribute.
    DeleteValues,
}

/// One encoded attribute value: explicit length plus owned bytes.
///
/// The length is carried alongside the buffer because directory values
/// may contain embedded zero bytes; nothing downstream may treat these
/// as C strings.
#[derive(Debug, Clone)]
pub struct EncodedValue {
    /// Byte length of `bytes`.
    pub len: usize,
    /// The encoded value.
    pub bytes: Bytes,
}

/// An owned, explicitly-sized array of encoded values for one attribute.
///
/// Produced by [`ValueArrayBuilder::build`]; buffers are released when
/// the array is dropped. The type is deliberately not `Clone`: each
/// build corresponds to exactly one release.
#[derive(Debug)]
pub struct OwnedValueArray {
    /// Attribute name the values belong to.
    pub attribute: String,
    /// Modification kind for add/modify requests.
    pub kind: ModKind,
    values: Vec<EncodedValue>,
    outstanding: Arc<AtomicUsize>,
}

impl OwnedValueArray {
    /// The encoded values, in caller-supplied order.
    #[must_use]
    pub fn values(&self) -> &[EncodedValue] {
        &self.values
    }

    /// Number of values in the array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Drop for OwnedValueArray {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Builds [`OwnedValueArray`]s, encoding each value through a
/// [`CodecBridge`].
///
/// The builder tracks how many arrays it has built that have not yet
/// been released; [`ValueArrayBuilder::outstanding`] must be zero once
/// a mutation call returns, success or failure.
#[derive(Debug, Clone)]
pub struct ValueArrayBuilder {
    bridge: CodecBridge,
    outstanding: Arc<AtomicUsize>,
}

impl ValueArrayBuilder {
    /// Create a builder encoding through the given bridge.
    #[must_use]
    pub fn new(bridge: CodecBridge) -> Self {
        Self {
            bridge,
            outstanding: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Encode `values` into an owned array tagged with `kind`.
    pub fn build<S: AsRef<str>>(&self, attribute: &str, kind: ModKind, values: &[S]) -> OwnedValueArray {
        let values = values
            .iter()
            .map(|v| {
                let bytes = self.bridge.encode(v.as_ref());
                EncodedValue { len: bytes.len(), bytes }
            })
            .collect();
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        OwnedValueArray {
            attribute: attribute.to_owned(),
            kind,
            values,
            outstanding: Arc::clone(&self.outstanding),
        }
    }

    /// Number of built arrays not yet released.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }
}
