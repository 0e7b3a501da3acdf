//! Session state shared by the HTTP layer, the services and the pages.
//!
//! `Session` is created once by the application root and cloned into every
//! component that needs it. Observers subscribe to [`SessionSnapshot`]
//! changes through a `tokio::sync::watch` channel.

pub mod context;

pub use context::SessionContext;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::models::User;
use crate::storage::TokenStore;
use crate::utils::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_loading: bool,
    /// Set when a stored token was rejected, cleared on the next sign-in.
    pub expired: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
            expired: false,
        }
    }
}

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Box<dyn TokenStore>,
    state: watch::Sender<SessionSnapshot>,
    // Serializes token writes with snapshot updates.
    write: Mutex<()>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                state,
                write: Mutex::new(()),
            }),
        }
    }

    /// The persisted token. A store that cannot be read counts as logged out.
    pub fn token(&self) -> Option<String> {
        match self.inner.store.load() {
            Ok(token) => token,
            Err(e) => {
                e.log();
                None
            }
        }
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    pub(crate) fn persist_token(&self, token: &str) -> Result<(), ClientError> {
        let _guard = self.inner.write.lock();
        self.inner.store.save(token)
    }

    /// Marks `user` as signed in. Fails if no token is stored, since a user
    /// is never held without one.
    pub(crate) fn sign_in(&self, user: User) -> Result<(), ClientError> {
        let _guard = self.inner.write.lock();
        if !matches!(self.inner.store.load(), Ok(Some(_))) {
            return Err(ClientError::SessionExpired);
        }
        tracing::info!(user_id = %user.id, "Signed in");
        self.inner.state.send_replace(SessionSnapshot {
            user: Some(user),
            is_loading: false,
            expired: false,
        });
        Ok(())
    }

    pub(crate) fn set_loading(&self, is_loading: bool) {
        self.inner.state.send_if_modified(|snapshot| {
            let changed = snapshot.is_loading != is_loading;
            snapshot.is_loading = is_loading;
            changed
        });
    }

    /// Logs out: drops the token and the user together. If the token cannot
    /// be removed the user stays signed in and the error is returned.
    pub fn clear(&self) -> Result<(), ClientError> {
        let _guard = self.inner.write.lock();
        self.inner.store.remove()?;
        self.publish_logged_out(false);
        Ok(())
    }

    /// The API rejected the token. The user is dropped even when the token
    /// cannot be removed, since the next request would be rejected again.
    pub fn expire(&self) {
        let _guard = self.inner.write.lock();
        if let Err(e) = self.inner.store.remove() {
            e.log();
        }
        self.publish_logged_out(true);
    }

    fn publish_logged_out(&self, expired: bool) {
        self.inner.state.send_replace(SessionSnapshot {
            user: None,
            is_loading: false,
            expired,
        });
    }
}
