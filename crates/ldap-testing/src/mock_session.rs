//! Scripted in-memory session for unit and integration tests.
//!
//! [`MockSession`] implements the transport trait against scripted
//! responses and records every call it receives. The session is handed
//! to the client, while the paired [`MockHandle`] stays with the test
//! for scripting and inspection.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use ldap_auth::{AuthError, Challenge, InteractFlags};
use ldap_client::{DirectorySession, Scope, SessionOption, SessionValue};
use ldap_codec::{ModKind, OwnedValueArray};
use ldap_protocol::{Message, MessageCursor};

/// A value array as recorded by the mock (contents copied out).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedArray {
    /// Attribute name.
    pub attribute: String,
    /// Modification kind.
    pub kind: ModKind,
    /// Encoded values.
    pub values: Vec<Vec<u8>>,
}

impl RecordedArray {
    fn from_array(array: &OwnedValueArray) -> Self {
        Self {
            attribute: array.attribute.clone(),
            kind: array.kind,
            values: array.values().iter().map(|v| v.bytes.to_vec()).collect(),
        }
    }
}

/// One recorded session call.
#[derive(Debug, Clone)]
pub enum MockCall {
    /// A simple bind.
    BindSimple {
        /// Encoded identity.
        identity: Vec<u8>,
        /// Encoded secret.
        secret: Vec<u8>,
    },
    /// An interactive SASL bind.
    BindInteractive {
        /// Mechanism name.
        mechanism: String,
    },
    /// A search.
    Search {
        /// Encoded base DN.
        base: Vec<u8>,
        /// Scope.
        scope: Scope,
        /// Encoded filter.
        filter: Vec<u8>,
        /// Encoded attribute names.
        attributes: Vec<Vec<u8>>,
        /// Sort control string, if any.
        sort: Option<String>,
    },
    /// An add.
    Add {
        /// Encoded DN.
        dn: Vec<u8>,
        /// Recorded value arrays.
        values: Vec<RecordedArray>,
    },
    /// A modify.
    Modify {
        /// Encoded DN.
        dn: Vec<u8>,
        /// Recorded value arrays.
        values: Vec<RecordedArray>,
    },
    /// A delete.
    Delete {
        /// Encoded DN.
        dn: Vec<u8>,
    },
    /// A set-option call.
    SetOption {
        /// Option key.
        key: SessionOption,
        /// Option value.
        value: SessionValue,
    },
}

#[derive(Default)]
struct MockState {
    search_chains: VecDeque<Vec<Message>>,
    search_fail: Option<i32>,
    bind_code: i32,
    mutation_code: i32,
    challenges: Vec<Challenge>,
    resolved: Option<Vec<Challenge>>,
    options: HashMap<SessionOption, SessionValue>,
    calls: Vec<MockCall>,
}

/// The scripted session handed to the client under test.
pub struct MockSession {
    shared: Arc<Mutex<MockState>>,
}

/// Test-side scripting and inspection handle for a [`MockSession`].
#[derive(Clone)]
pub struct MockHandle {
    shared: Arc<Mutex<MockState>>,
}

impl MockSession {
    /// Create a session plus its scripting handle.
    #[must_use]
    pub fn new() -> (Self, MockHandle) {
        let shared = Arc::new(Mutex::new(MockState {
            challenges: vec![Challenge::end_of_list()],
            ..MockState::default()
        }));
        (
            Self {
                shared: Arc::clone(&shared),
            },
            MockHandle { shared },
        )
    }
}

impl MockHandle {
    /// Queue the response chain for the next search.
    pub fn queue_search(&self, chain: Vec<Message>) {
        self.shared.lock().search_chains.push_back(chain);
    }

    /// Make the next searches fail at the session level with `code`.
    pub fn fail_search(&self, code: i32) {
        self.shared.lock().search_fail = Some(code);
    }

    /// Set the result code binds return.
    pub fn set_bind_code(&self, code: i32) {
        self.shared.lock().bind_code = code;
    }

    /// Set the result code mutations return.
    pub fn set_mutation_code(&self, code: i32) {
        self.shared.lock().mutation_code = code;
    }

    /// Script the challenge batch issued during the next interactive
    /// bind. The batch should end with an end-of-list challenge.
    pub fn set_challenges(&self, challenges: Vec<Challenge>) {
        self.shared.lock().challenges = challenges;
    }

    /// Pre-populate a session option.
    pub fn set_option(&self, key: SessionOption, value: SessionValue) {
        self.shared.lock().options.insert(key, value);
    }

    /// The challenge batch as resolved by the client's last
    /// interactive bind.
    #[must_use]
    pub fn resolved_challenges(&self) -> Option<Vec<Challenge>> {
        self.shared.lock().resolved.clone()
    }

    /// Every call the session received, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.shared.lock().calls.clone()
    }
}

impl DirectorySession for MockSession {
    fn bind_simple(&mut self, identity: &[u8], secret: &[u8]) -> i32 {
        let mut state = self.shared.lock();
        state.calls.push(MockCall::BindSimple {
            identity: identity.to_vec(),
            secret: secret.to_vec(),
        });
        state.bind_code
    }

    fn bind_interactive(
        &mut self,
        mechanism: &str,
        flags: InteractFlags,
        interact: &mut dyn FnMut(InteractFlags, &mut [Challenge]) -> Result<(), AuthError>,
    ) -> i32 {
        let mut state = self.shared.lock();
        state.calls.push(MockCall::BindInteractive {
            mechanism: mechanism.to_owned(),
        });
        let mut batch = state.challenges.clone();
        match interact(flags, &mut batch) {
            Ok(()) => {
                state.resolved = Some(batch);
                state.bind_code
            }
            // The engine reports a bare "other" code; the typed error
            // travels through the client's side channel.
            Err(_) => 80,
        }
    }

    fn search(
        &mut self,
        base: &[u8],
        scope: Scope,
        filter: &[u8],
        attributes: &[Bytes],
        sort: Option<&str>,
    ) -> Result<Box<dyn MessageCursor + Send>, i32> {
        let mut state = self.shared.lock();
        state.calls.push(MockCall::Search {
            base: base.to_vec(),
            scope,
            filter: filter.to_vec(),
            attributes: attributes.iter().map(|a| a.to_vec()).collect(),
            sort: sort.map(ToOwned::to_owned),
        });
        if let Some(code) = state.search_fail {
            return Err(code);
        }
        let chain = state.search_chains.pop_front().unwrap_or_default();
        Ok(Box::new(chain.into_iter()))
    }

    fn add(&mut self, dn: &[u8], values: &[OwnedValueArray]) -> i32 {
        let mut state = self.shared.lock();
        state.calls.push(MockCall::Add {
            dn: dn.to_vec(),
            values: values.iter().map(RecordedArray::from_array).collect(),
        });
        state.mutation_code
    }

    fn modify(&mut self, dn: &[u8], values: &[OwnedValueArray]) -> i32 {
        let mut state = self.shared.lock();
        state.calls.push(MockCall::Modify {
            dn: dn.to_vec(),
            values: values.iter().map(RecordedArray::from_array).collect(),
        });
        state.mutation_code
    }

    fn delete(&mut self, dn: &[u8]) -> i32 {
        let mut state = self.shared.lock();
        state.calls.push(MockCall::Delete { dn: dn.to_vec() });
        state.mutation_code
    }

    fn get_option(&self, key: SessionOption) -> Option<SessionValue> {
        self.shared.lock().options.get(&key).cloned()
    }

    fn set_option(&mut self, key: SessionOption, value: SessionValue) -> Result<(), String> {
        let mut state = self.shared.lock();
        state.calls.push(MockCall::SetOption {
            key,
            value: value.clone(),
        });
        state.options.insert(key, value);
        Ok(())
    }
}
