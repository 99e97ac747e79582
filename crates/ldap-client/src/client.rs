//! The directory client orchestrator.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use ldap_auth::{ChallengeResolver, Credentials, InteractFlags};
use ldap_codec::{CodecBridge, ModKind, OwnedValueArray, ValueArrayBuilder};
use ldap_protocol::{ProtocolError, ResultDecoder, ResultSet};

use crate::config::Config;
use crate::error::Error;
use crate::session::{DirectorySession, Scope, SessionOption, SessionValue};
use crate::sort::SortSpec;

/// Parameters of one search operation.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Search base DN.
    pub base: String,
    /// Search scope.
    pub scope: Scope,
    /// Search filter; defaults to `(objectClass=*)`.
    pub filter: String,
    /// Attribute names to return; empty means all user attributes.
    pub attributes: Vec<String>,
    /// Optional server-side sort specification.
    pub sort: Option<SortSpec>,
}

impl SearchRequest {
    /// A request for the given base and scope, matching everything.
    #[must_use]
    pub fn new(base: impl Into<String>, scope: Scope) -> Self {
        Self {
            base: base.into(),
            scope,
            filter: "(objectClass=*)".to_owned(),
            attributes: Vec::new(),
            sort: None,
        }
    }

    /// Set the search filter.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the attributes to return.
    #[must_use]
    pub fn attributes<I, T>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the server-side sort specification.
    #[must_use]
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// One attribute modification for a modify operation.
#[derive(Debug, Clone)]
pub struct Modification {
    /// Attribute name.
    pub attribute: String,
    /// Modification kind.
    pub kind: ModKind,
    /// Values, canonical text.
    pub values: Vec<String>,
}

impl Modification {
    /// Add the given values to an attribute.
    #[must_use]
    pub fn add(attribute: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            attribute: attribute.into(),
            kind: ModKind::AddValues,
            values,
        }
    }

    /// Replace an attribute's values.
    #[must_use]
    pub fn replace(attribute: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            attribute: attribute.into(),
            kind: ModKind::ReplaceValues,
            values,
        }
    }

    /// Delete values from an attribute (all of them when `values` is
    /// empty).
    #[must_use]
    pub fn delete(attribute: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            attribute: attribute.into(),
            kind: ModKind::DeleteValues,
            values,
        }
    }
}

struct Inner<S> {
    // Single-request-at-a-time queue: the transport does not guarantee
    // two requests can run concurrently on one handle, so every
    // operation holds this lock for its full duration.
    session: Mutex<S>,
    bridge: CodecBridge,
    decoder: ResultDecoder,
    builder: ValueArrayBuilder,
}

/// A directory client over one transport session.
///
/// Cloning is cheap and shares the underlying session; overlapping
/// operations from clones (or from the `*_async` variants) are
/// serialized, never interleaved.
pub struct DirectoryClient<S: DirectorySession> {
    inner: Arc<Inner<S>>,
}

impl<S: DirectorySession> Clone for DirectoryClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: DirectorySession> DirectoryClient<S> {
    /// Initialize a session via `open` (the transport's session
    /// initializer, called with the configured URL) and wrap it in a
    /// client.
    pub fn connect<F>(config: Config, open: F) -> Result<Self, Error>
    where
        F: FnOnce(&str) -> Result<S, String>,
    {
        let session = open(&config.url).map_err(Error::Session)?;
        tracing::debug!(url = %config.url, codepage = config.codepage.name(), "session initialized");
        Self::with_session(config, session)
    }

    /// Wrap an already-initialized session.
    pub fn with_session(config: Config, mut session: S) -> Result<Self, Error> {
        if let Some(timeout) = config.network_timeout {
            let millis = i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX);
            session
                .set_option(SessionOption::NetworkTimeout, SessionValue::Number(millis))
                .map_err(Error::Session)?;
        }
        let bridge = CodecBridge::new(config.codepage);
        Ok(Self {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                bridge,
                decoder: ResultDecoder::new(bridge),
                builder: ValueArrayBuilder::new(bridge),
            }),
        })
    }

    /// Authenticate the session.
    ///
    /// Credentials with a mechanism run an interactive SASL bind, with
    /// the challenge resolver answering the engine's prompts; without
    /// one, a simple bind is issued. Credential fields left absent are
    /// filled from the session's current option values first.
    pub fn bind(&self, credentials: &Credentials) -> Result<(), Error> {
        let mut session = self.inner.session.lock();
        let credentials = fill_from_options(credentials.clone(), &*session);

        if let Some(mechanism) = credentials.mechanism.clone() {
            tracing::debug!(mechanism = %mechanism, "interactive SASL bind");
            let mut resolver = ChallengeResolver::new(credentials, self.inner.bridge);
            // The resolver error is kept on the side: the engine only
            // reports a bare result code, and the typed error is the
            // more useful failure to surface.
            let mut auth_failure = None;
            let code = session.bind_interactive(
                &mechanism,
                InteractFlags::Interactive,
                &mut |flags, challenges| {
                    resolver.interact(flags, challenges).inspect_err(|e| {
                        auth_failure = Some(e.clone());
                    })
                },
            );
            if let Some(failure) = auth_failure {
                return Err(failure.into());
            }
            check(&*session, code)
        } else {
            let identity = self
                .inner
                .bridge
                .encode(credentials.identity.as_deref().unwrap_or(""));
            let secret = self
                .inner
                .bridge
                .encode(credentials.secret.as_deref().unwrap_or(""));
            tracing::debug!("simple bind");
            let code = session.bind_simple(&identity, &secret);
            check(&*session, code)
        }
    }

    /// Run a search and decode the full response chain.
    ///
    /// A non-zero final outcome is surfaced as [`Error::Directory`];
    /// a chain with no final-result message at all is a protocol
    /// error. A present-but-default outcome is ambiguous (the
    /// final-result body may have failed to parse); since the search
    /// call itself reported success by delivering the chain, it is
    /// accepted here — this is the decoder's documented sharp edge.
    pub fn search(&self, request: &SearchRequest) -> Result<ResultSet, Error> {
        let mut session = self.inner.session.lock();
        let base = self.inner.bridge.encode(&request.base);
        let filter = self.inner.bridge.encode(&request.filter);
        let attributes: Vec<Bytes> = request
            .attributes
            .iter()
            .map(|a| self.inner.bridge.encode(a))
            .collect();
        let sort = request
            .sort
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(SortSpec::to_control_string);

        tracing::debug!(base = %request.base, scope = ?request.scope, filter = %request.filter, "search");
        let mut cursor = session
            .search(&base, request.scope, &filter, &attributes, sort.as_deref())
            .map_err(|code| Error::directory(code, "", session.error_text(code)))?;

        let set = self.inner.decoder.decode(cursor.as_mut());
        match &set.outcome {
            None => Err(ProtocolError::MissingFinalResult.into()),
            Some(outcome) if !outcome.is_success() => Err(Error::directory(
                outcome.code,
                &outcome.diagnostic,
                session.error_text(outcome.code),
            )),
            Some(_) => Ok(set),
        }
    }

    /// Add an entry.
    ///
    /// One value array is built per attribute; all arrays are released
    /// when this call returns, on the error path included.
    pub fn add(&self, dn: &str, attributes: &[(String, Vec<String>)]) -> Result<(), Error> {
        let mut session = self.inner.session.lock();
        let dn_bytes = self.inner.bridge.encode(dn);
        let arrays: Vec<OwnedValueArray> = attributes
            .iter()
            .map(|(name, values)| self.inner.builder.build(name, ModKind::AddValues, values))
            .collect();
        tracing::debug!(dn = %dn, attributes = arrays.len(), "add");
        let code = session.add(&dn_bytes, &arrays);
        drop(arrays);
        check(&*session, code)
    }

    /// Apply modifications to an entry.
    ///
    /// Same value-array discipline as [`DirectoryClient::add`].
    pub fn modify(&self, dn: &str, modifications: &[Modification]) -> Result<(), Error> {
        let mut session = self.inner.session.lock();
        let dn_bytes = self.inner.bridge.encode(dn);
        let arrays: Vec<OwnedValueArray> = modifications
            .iter()
            .map(|m| self.inner.builder.build(&m.attribute, m.kind, &m.values))
            .collect();
        tracing::debug!(dn = %dn, modifications = arrays.len(), "modify");
        let code = session.modify(&dn_bytes, &arrays);
        drop(arrays);
        check(&*session, code)
    }

    /// Delete an entry.
    pub fn delete(&self, dn: &str) -> Result<(), Error> {
        let mut session = self.inner.session.lock();
        let dn_bytes = self.inner.bridge.encode(dn);
        tracing::debug!(dn = %dn, "delete");
        let code = session.delete(&dn_bytes);
        check(&*session, code)
    }

    /// Number of built value arrays not yet released; zero whenever no
    /// mutation is in flight.
    #[must_use]
    pub fn outstanding_value_arrays(&self) -> usize {
        self.inner.builder.outstanding()
    }
}

/// Asynchronous variants: the blocking form runs on a worker thread
/// and the result is delivered through a completion callback. One
/// worker per call, unordered relative to other calls; the session
/// lock inside the blocking form provides the ordering guarantee.
impl<S: DirectorySession + 'static> DirectoryClient<S> {
    /// Run [`DirectoryClient::bind`] on a worker; the callback gets
    /// `None` on success.
    pub fn bind_async<F>(&self, credentials: Credentials, on_done: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Option<Error>) + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || on_done(client.bind(&credentials).err()))
    }

    /// Run [`DirectoryClient::search`] on a worker.
    pub fn search_async<F>(&self, request: SearchRequest, on_done: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Result<ResultSet, Error>) + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || on_done(client.search(&request)))
    }

    /// Run [`DirectoryClient::add`] on a worker; the callback gets
    /// `None` on success.
    pub fn add_async<F>(
        &self,
        dn: String,
        attributes: Vec<(String, Vec<String>)>,
        on_done: F,
    ) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Option<Error>) + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || on_done(client.add(&dn, &attributes).err()))
    }

    /// Run [`DirectoryClient::modify`] on a worker; the callback gets
    /// `None` on success.
    pub fn modify_async<F>(
        &self,
        dn: String,
        modifications: Vec<Modification>,
        on_done: F,
    ) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Option<Error>) + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || on_done(client.modify(&dn, &modifications).err()))
    }

    /// Run [`DirectoryClient::delete`] on a worker; the callback gets
    /// `None` on success.
    pub fn delete_async<F>(&self, dn: String, on_done: F) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(Option<Error>) + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || on_done(client.delete(&dn).err()))
    }
}

/// Map a completed request's result code to `Ok`/`Err`.
fn check<S: DirectorySession + ?Sized>(session: &S, code: i32) -> Result<(), Error> {
    if code == ldap_protocol::result_code::SUCCESS {
        Ok(())
    } else {
        Err(Error::Directory {
            code,
            diagnostic: session.error_text(code),
        })
    }
}

/// Fill absent credential fields from the session's current options.
fn fill_from_options<S: DirectorySession + ?Sized>(mut credentials: Credentials, session: &S) -> Credentials {
    let fetch = |key: SessionOption| {
        session
            .get_option(key)
            .and_then(|v| v.as_text().map(|t| std::borrow::Cow::Owned(t.to_owned())))
    };
    if credentials.mechanism.is_none() {
        credentials.mechanism = fetch(SessionOption::SaslMechanism);
    }
    if credentials.realm.is_none() {
        credentials.realm = fetch(SessionOption::SaslRealm);
    }
    if credentials.identity.is_none() {
        credentials.identity = fetch(SessionOption::SaslAuthcId);
    }
    if credentials.secret.is_none() {
        credentials.secret = fetch(SessionOption::SaslSecret);
    }
    if credentials.authz_id.is_none() {
        credentials.authz_id = fetch(SessionOption::SaslAuthzId);
    }
    credentials
}
