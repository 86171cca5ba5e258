use std::{
    path::Path,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::instrument;

use crate::{
    auth::{AuthService, User},
    error::Result,
    store::persist::{Snapshot, SnapshotFile},
};

/// The session fields the view layer renders from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    busy: bool,
}

impl SessionState {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in. Derived from the presence of a user, so
    /// it can never disagree with [`SessionState::user`].
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether a call to the authentication service is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

/// Mediates every authentication state transition.
///
/// The store is an explicit, injectable container: the composition root
/// builds one around an [`AuthService`] implementation (usually
/// [`auth::Client`](crate::auth::Client)) and hands out references. State
/// lives behind a lock that is only held for the instant of a field write,
/// never across a call to the service, so the busy flag is observable while
/// a request is in flight.
///
/// Overlapping operations are not serialized; if two race, the state
/// reflects whichever completes last.
#[derive(Debug)]
pub struct SessionStore<S> {
    service: S,
    state: RwLock<SessionState>,
    storage: Option<SnapshotFile>,
}

impl<S> SessionStore<S> {
    /// Create a store with in-memory state only.
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RwLock::new(SessionState::default()),
            storage: None,
        }
    }

    /// Create a store that persists its session snapshot under `dir`,
    /// restoring any snapshot already present. The busy flag always starts
    /// false; a snapshot claiming authentication without a user restores as
    /// anonymous.
    pub fn with_storage(service: S, dir: impl AsRef<Path>) -> Self {
        let storage = SnapshotFile::new(dir);
        let snapshot = storage.load();
        Self {
            service,
            state: RwLock::new(SessionState {
                user: snapshot.user,
                busy: false,
            }),
            storage: Some(storage),
        }
    }

    /// The underlying authentication service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// A copy of the current session state.
    pub fn state(&self) -> SessionState {
        self.read().clone()
    }

    /// The signed-in user, if any (cloned).
    pub fn current_user(&self) -> Option<User> {
        self.read().user.clone()
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Whether a call to the authentication service is in flight.
    pub fn is_busy(&self) -> bool {
        self.read().busy
    }

    /// Set the busy flag directly, for callers that drive loading UI by
    /// hand. No other state is touched.
    pub fn set_busy(&self, busy: bool) {
        self.write().busy = busy;
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the user and authentication flag. Failures are logged and
    /// swallowed; they never reach the caller.
    fn save(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let snapshot = {
            let state = self.read();
            Snapshot {
                user: state.user.clone(),
                is_authenticated: state.is_authenticated(),
            }
        };
        if let Err(err) = storage.store(&snapshot) {
            tracing::warn!(%err, "failed to persist session snapshot");
        }
    }
}

impl<S> SessionStore<S>
where
    S: AuthService,
{
    /// Ask the service to email a one-time code.
    ///
    /// No session is established; the user and authentication flag are left
    /// untouched. Exactly one call goes out per invocation, with no retries,
    /// and the busy flag is cleared on both outcomes before any error is
    /// re-raised unchanged.
    #[instrument(skip(self))]
    pub async fn request_code(&self, email: &str) -> Result<()> {
        self.set_busy(true);
        let res = self.service.send_code(email).await;
        self.set_busy(false);
        res?;
        self.save();
        Ok(())
    }

    /// Exchange a one-time code for a session.
    ///
    /// On success the returned user and the cleared busy flag are written in
    /// one step and the user is handed back. On failure only the busy flag
    /// changes and the error is re-raised unchanged.
    #[instrument(skip(self, code))]
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<User> {
        self.set_busy(true);
        match self.service.verify_code(email, code).await {
            Ok(user) => {
                {
                    let mut state = self.write();
                    state.user = Some(user.clone());
                    state.busy = false;
                }
                self.save();
                Ok(user)
            }
            Err(err) => {
                self.set_busy(false);
                Err(err)
            }
        }
    }

    /// End the session.
    ///
    /// On success the local session is cleared. On failure it is kept: the
    /// remote session may or may not have ended, and the caller decides what
    /// to do with a signed-in view it could not sign out.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.set_busy(true);
        match self.service.end_session().await {
            Ok(()) => {
                {
                    let mut state = self.write();
                    state.user = None;
                    state.busy = false;
                }
                self.save();
                Ok(())
            }
            Err(err) => {
                self.set_busy(false);
                Err(err)
            }
        }
    }
}
