use tokio::sync::{watch, Mutex};
use tracing::{error, info, warn};

use shared_types::{AuthError, LoginRequest, ProfileUpdate, Session};

use crate::backend::AuthBackend;
use crate::storage::{SessionStorage, StoredSession, SCHEMA_VERSION, SESSION_KEY};

/// Single source of truth for "who is logged in."
///
/// The current session lives in a `watch` channel: observers subscribe
/// once and re-read on every change, and a mutation is published before
/// the mutating future resolves, so a completed `login`/`logout` is never
/// followed by a stale read.
///
/// Mutations are serialized in call order by an internal lock — a logout
/// issued while a login is in flight queues behind it rather than
/// interleaving at the storage boundary.
///
/// Durable-storage writes follow browser local-storage semantics: a
/// failed write is logged and the in-memory mutation still takes effect,
/// so the store never leaves the UI in a half-logged-in state over an
/// I/O hiccup.
pub struct SessionStore<S, B> {
    storage: S,
    backend: B,
    sessions: watch::Sender<Option<Session>>,
    op_lock: Mutex<()>,
}

impl<S: SessionStorage, B: AuthBackend> SessionStore<S, B> {
    pub fn new(storage: S, backend: B) -> Self {
        let (sessions, _) = watch::channel(None);
        Self {
            storage,
            backend,
            sessions,
            op_lock: Mutex::new(()),
        }
    }

    /// Synchronous read of the in-memory session.
    pub fn current_session(&self) -> Option<Session> {
        self.sessions.borrow().clone()
    }

    /// Subscribe to session changes. The receiver always observes a
    /// completed mutation's final state.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }

    /// Restore a persisted session at process start.
    ///
    /// Anything unreadable — unparsable JSON, an unknown role string, a
    /// schema version this build does not understand, or a storage read
    /// failure — is discarded with a warning and treated as anonymous.
    /// Hydration never fails.
    pub async fn hydrate(&self) -> Option<Session> {
        let _guard = self.op_lock.lock().await;
        let raw = match self.storage.read(SESSION_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(%err, "session hydrate failed, starting anonymous");
                return None;
            }
        };

        let stored: StoredSession = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(%err, "discarding corrupt stored session");
                return None;
            }
        };
        if stored.schema_version != SCHEMA_VERSION {
            warn!(
                version = stored.schema_version,
                "discarding stored session with unknown schema version"
            );
            return None;
        }

        let session = stored.into_session();
        self.sessions.send_replace(Some(session.clone()));
        Some(session)
    }

    /// Authenticate against the backend and install the resulting session.
    ///
    /// Backend rejection surfaces as [`AuthError::InvalidCredentials`] and
    /// leaves the session state untouched.
    pub async fn login(&self, request: LoginRequest) -> Result<Session, AuthError> {
        let _guard = self.op_lock.lock().await;
        let session = self.backend.authenticate(&request).await?;
        self.persist(&session).await;
        self.sessions.send_replace(Some(session.clone()));
        info!(role = session.role.as_str(), "login succeeded");
        Ok(session)
    }

    /// Clear the session. Idempotent: with no active session this is a
    /// no-op and performs no storage write.
    pub async fn logout(&self) {
        let _guard = self.op_lock.lock().await;
        if self.sessions.borrow().is_none() {
            return;
        }
        if let Err(err) = self.storage.remove(SESSION_KEY).await {
            warn!(%err, "failed to clear persisted session");
        }
        self.sessions.send_replace(None);
        info!("logged out");
    }

    /// Merge profile fields into the active session and persist the
    /// merged record. The session is replaced wholesale; `role` and
    /// `user_id` never change here.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Session, AuthError> {
        let _guard = self.op_lock.lock().await;
        let mut session = match self.sessions.borrow().clone() {
            Some(session) => session,
            None => {
                error!("update_profile called with no active session");
                return Err(AuthError::NoActiveSession);
            }
        };

        if let Some(name) = update.name {
            session.name = name;
        }
        if let Some(email) = update.email {
            session.email = email;
        }

        self.persist(&session).await;
        self.sessions.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn persist(&self, session: &Session) {
        let stored = StoredSession::from_session(session);
        match serde_json::to_string(&stored) {
            Ok(raw) => {
                if let Err(err) = self.storage.write(SESSION_KEY, &raw).await {
                    warn!(%err, "failed to persist session");
                }
            }
            Err(err) => warn!(%err, "failed to serialize session"),
        }
    }
}
