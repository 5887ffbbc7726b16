//! The identity resolver: provider events in, one live snapshot out.
//!
//! Concurrency model: a single event-loop task consumes the provider's
//! change stream; each signed-in event spawns one role lookup tagged with a
//! generation number. The publish lock covers the (generation, send) pair,
//! so a lookup whose generation has been superseded can never overwrite a
//! later snapshot — stale results are discarded, not applied.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, warn};

use fitdesk_auth::{gate, AccessDecision, RouteRequirement, Session, SessionSnapshot};

use crate::provider::{AuthProvider, SessionChange};
use crate::records::RoleStore;

struct PublishState {
    generation: u64,
    tx: watch::Sender<SessionSnapshot>,
}

/// Exclusive owner of the published snapshot.
struct Publisher {
    state: Mutex<PublishState>,
}

impl Publisher {
    fn new(tx: watch::Sender<SessionSnapshot>) -> Self {
        Self {
            state: Mutex::new(PublishState { generation: 0, tx }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PublishState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a new identity transition: bump the generation and publish the
    /// transitional snapshot in one critical section.
    fn begin(&self, snapshot: SessionSnapshot) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.tx.send_replace(snapshot);
        state.generation
    }

    /// Publish the settled snapshot for `generation`, unless a newer
    /// transition has started in the meantime.
    fn complete(&self, generation: u64, snapshot: SessionSnapshot) -> bool {
        let state = self.lock();
        if state.generation != generation {
            return false;
        }
        state.tx.send_replace(snapshot);
        true
    }
}

/// Read-only handle to the live session snapshot.
///
/// Cheap to clone; every clone observes the same single published triple.
#[derive(Clone)]
pub struct SessionHandle {
    publisher: Arc<Publisher>,
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// The current snapshot (owned copy).
    pub fn current(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }

    /// Gate decision against the current snapshot.
    pub fn authorize(&self, requirement: &RouteRequirement) -> AccessDecision {
        gate::authorize(&self.rx.borrow(), requirement)
    }

    /// Wait for the next snapshot replacement.
    pub async fn changed(&mut self) {
        // The publisher (and with it the sender) lives as long as any
        // handle, so the stream cannot error out from under us.
        let _ = self.rx.changed().await;
    }

    /// Wait until the resolver has settled, then return the snapshot.
    pub async fn settled(&mut self) -> SessionSnapshot {
        loop {
            {
                let snapshot = self.rx.borrow_and_update();
                if !snapshot.loading {
                    return snapshot.clone();
                }
            }
            self.changed().await;
        }
    }
}

impl core::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("generation", &self.publisher.lock().generation)
            .field("snapshot", &*self.rx.borrow())
            .finish()
    }
}

/// Builder/entry point for the resolver task.
pub struct IdentityResolver;

impl IdentityResolver {
    /// Subscribe to the provider and start resolving.
    ///
    /// If the subscription cannot be established the handle settles as
    /// permanently unauthenticated; every navigation then redirects to
    /// login. Nothing here is fatal to the process.
    pub async fn start(provider: &dyn AuthProvider, store: Arc<dyn RoleStore>) -> SessionHandle {
        let (tx, rx) = watch::channel(SessionSnapshot::loading());
        let publisher = Arc::new(Publisher::new(tx));

        match provider.subscribe().await {
            Ok(events) => {
                tokio::spawn(run(events, Arc::clone(&publisher), store));
            }
            Err(err) => {
                error!(error = %err, "auth provider subscription failed; treating as signed out");
                publisher.begin(SessionSnapshot::signed_out());
            }
        }

        SessionHandle { publisher, rx }
    }
}

async fn run(
    mut events: mpsc::Receiver<SessionChange>,
    publisher: Arc<Publisher>,
    store: Arc<dyn RoleStore>,
) {
    while let Some(change) = events.recv().await {
        match change {
            None => {
                let generation = publisher.begin(SessionSnapshot::signed_out());
                debug!(generation, "session cleared");
            }
            Some(provider_session) => {
                let session = Session::new(
                    provider_session.subject,
                    provider_session.display_name,
                );
                let generation = publisher.begin(SessionSnapshot::settling(session.clone()));
                debug!(generation, identity = %session.identity_id(), "session changed; resolving role");

                let publisher = Arc::clone(&publisher);
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let role = match store.role_record(session.identity_id()).await {
                        Ok(Some(record)) => {
                            if record.role.is_none() {
                                warn!(identity = %session.identity_id(), "role record has no recognized role; treating as unassigned");
                            }
                            record.role
                        }
                        Ok(None) => {
                            warn!(identity = %session.identity_id(), "role record not found; treating as unassigned");
                            None
                        }
                        Err(err) => {
                            warn!(identity = %session.identity_id(), error = %err, "role lookup failed; treating as unassigned");
                            None
                        }
                    };

                    if !publisher.complete(generation, SessionSnapshot::settled(session, role)) {
                        debug!(generation, "discarding superseded role lookup");
                    }
                });
            }
        }
    }

    debug!("provider change stream closed; resolver stopping");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use crate::provider::{ProviderError, ProviderSession};
    use crate::records::LookupError;
    use fitdesk_auth::{Destination, Role, RoleRecord};
    use fitdesk_core::IdentityId;

    type LookupResult = Result<Option<RoleRecord>, LookupError>;

    /// Provider double: the test keeps the sender and drives the stream.
    struct ScriptedProvider {
        events: Mutex<Option<mpsc::Receiver<SessionChange>>>,
    }

    impl ScriptedProvider {
        fn new() -> (Self, mpsc::Sender<SessionChange>) {
            let (tx, rx) = mpsc::channel(16);
            (
                Self {
                    events: Mutex::new(Some(rx)),
                },
                tx,
            )
        }
    }

    #[async_trait]
    impl AuthProvider for ScriptedProvider {
        async fn subscribe(&self) -> Result<mpsc::Receiver<SessionChange>, ProviderError> {
            self.events
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| ProviderError::Unavailable("already subscribed".into()))
        }

        async fn sign_out(&self) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    struct DownProvider;

    #[async_trait]
    impl AuthProvider for DownProvider {
        async fn subscribe(&self) -> Result<mpsc::Receiver<SessionChange>, ProviderError> {
            Err(ProviderError::Unavailable("connection refused".into()))
        }

        async fn sign_out(&self) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    /// Store double: immediate results per identity, plus optional blocking
    /// results released by the test (for supersede scenarios).
    #[derive(Default)]
    struct ScriptedStore {
        immediate: Mutex<HashMap<String, LookupResult>>,
        blocked: Mutex<HashMap<String, oneshot::Receiver<LookupResult>>>,
    }

    impl ScriptedStore {
        fn respond(&self, identity: &str, result: LookupResult) {
            self.immediate
                .lock()
                .unwrap()
                .insert(identity.to_string(), result);
        }

        fn block(&self, identity: &str) -> oneshot::Sender<LookupResult> {
            let (tx, rx) = oneshot::channel();
            self.blocked.lock().unwrap().insert(identity.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl RoleStore for ScriptedStore {
        async fn role_record(&self, identity: &IdentityId) -> LookupResult {
            let blocked = self.blocked.lock().unwrap().remove(identity.as_str());
            if let Some(rx) = blocked {
                return rx.await.unwrap_or(Ok(None));
            }
            self.immediate
                .lock()
                .unwrap()
                .get(identity.as_str())
                .cloned()
                .unwrap_or(Ok(None))
        }
    }

    fn signed_in(identity: &str, name: &str) -> SessionChange {
        Some(ProviderSession {
            subject: IdentityId::new(identity),
            display_name: Some(name.to_string()),
            email: None,
        })
    }

    fn record(identity: &str, role: Option<Role>) -> LookupResult {
        Ok(Some(RoleRecord {
            identity_id: IdentityId::new(identity),
            role,
        }))
    }

    #[tokio::test]
    async fn sign_in_settles_with_the_stored_role() {
        let (provider, events) = ScriptedProvider::new();
        let store = Arc::new(ScriptedStore::default());
        store.respond("uid-1", record("uid-1", Some(Role::Member)));

        let mut handle = IdentityResolver::start(&provider, store).await;
        events.send(signed_in("uid-1", "Ada")).await.unwrap();

        let snapshot = handle.settled().await;
        assert_eq!(snapshot.role, Some(Role::Member));
        assert_eq!(snapshot.identity_id().unwrap().as_str(), "uid-1");
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn loading_is_observable_until_the_lookup_settles() {
        let (provider, events) = ScriptedProvider::new();
        let store = Arc::new(ScriptedStore::default());
        let release = store.block("uid-1");

        let mut handle = IdentityResolver::start(&provider, store).await;
        events.send(signed_in("uid-1", "Ada")).await.unwrap();

        // The transitional snapshot carries the session but no role.
        handle.changed().await;
        let transitional = handle.current();
        assert!(transitional.loading);
        assert!(transitional.is_authenticated());
        assert_eq!(transitional.role, None);

        release.send(record("uid-1", Some(Role::Admin))).unwrap();
        let snapshot = handle.settled().await;
        assert_eq!(snapshot.role, Some(Role::Admin));
    }

    #[tokio::test]
    async fn record_not_found_settles_unassigned() {
        let (provider, events) = ScriptedProvider::new();
        let store = Arc::new(ScriptedStore::default());
        store.respond("uid-1", Ok(None));

        let mut handle = IdentityResolver::start(&provider, store).await;
        events.send(signed_in("uid-1", "Ada")).await.unwrap();

        let snapshot = handle.settled().await;
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.role, None);
        assert_eq!(
            handle.authorize(&RouteRequirement::public()),
            AccessDecision::Redirect(Destination::Login)
        );
    }

    #[tokio::test]
    async fn lookup_failure_settles_unassigned() {
        let (provider, events) = ScriptedProvider::new();
        let store = Arc::new(ScriptedStore::default());
        store.respond(
            "uid-1",
            Err(LookupError::Unavailable("store timeout".into())),
        );

        let mut handle = IdentityResolver::start(&provider, store).await;
        events.send(signed_in("uid-1", "Ada")).await.unwrap();

        let snapshot = handle.settled().await;
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.role, None);
    }

    #[tokio::test]
    async fn sign_out_clears_session_and_role() {
        let (provider, events) = ScriptedProvider::new();
        let store = Arc::new(ScriptedStore::default());
        store.respond("uid-1", record("uid-1", Some(Role::Member)));

        let mut handle = IdentityResolver::start(&provider, store).await;
        events.send(signed_in("uid-1", "Ada")).await.unwrap();
        handle.settled().await;

        events.send(None).await.unwrap();
        loop {
            let snapshot = handle.settled().await;
            if !snapshot.is_authenticated() {
                assert_eq!(snapshot.role, None);
                break;
            }
            handle.changed().await;
        }
    }

    #[tokio::test]
    async fn superseded_lookup_is_discarded() {
        let (provider, events) = ScriptedProvider::new();
        let store = Arc::new(ScriptedStore::default());
        let release_first = store.block("uid-1");
        store.respond("uid-2", record("uid-2", Some(Role::Admin)));

        let mut handle = IdentityResolver::start(&provider, store).await;

        // Generation N: lookup for uid-1 parks on the blocked store call.
        events.send(signed_in("uid-1", "Ada")).await.unwrap();
        handle.changed().await;
        assert!(handle.current().loading);

        // Generation N+1 supersedes it and settles.
        events.send(signed_in("uid-2", "Grace")).await.unwrap();
        let snapshot = handle.settled().await;
        assert_eq!(snapshot.identity_id().unwrap().as_str(), "uid-2");
        assert_eq!(snapshot.role, Some(Role::Admin));

        // The stale lookup resolves afterwards and must be discarded.
        release_first.send(record("uid-1", Some(Role::Member))).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = handle.current();
        assert_eq!(snapshot.identity_id().unwrap().as_str(), "uid-2");
        assert_eq!(snapshot.role, Some(Role::Admin));
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn stale_lookup_never_overwrites_a_sign_out() {
        let (provider, events) = ScriptedProvider::new();
        let store = Arc::new(ScriptedStore::default());
        let release = store.block("uid-1");

        let mut handle = IdentityResolver::start(&provider, store).await;
        events.send(signed_in("uid-1", "Ada")).await.unwrap();
        handle.changed().await;

        events.send(None).await.unwrap();
        let snapshot = handle.settled().await;
        assert!(!snapshot.is_authenticated());

        release.send(record("uid-1", Some(Role::Member))).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snapshot = handle.current();
        assert!(!snapshot.is_authenticated());
        assert_eq!(snapshot.role, None);
    }

    #[tokio::test]
    async fn provider_unavailable_is_permanently_unauthenticated() {
        let store = Arc::new(ScriptedStore::default());
        let mut handle = IdentityResolver::start(&DownProvider, store).await;

        let snapshot = handle.settled().await;
        assert!(!snapshot.is_authenticated());
        assert_eq!(
            handle.authorize(&RouteRequirement::role(Role::Admin)),
            AccessDecision::Redirect(Destination::Login)
        );
    }
}
