use tokio::sync::watch;

use super::{Session, SessionSnapshot};
use crate::models::User;
use crate::services::AuthService;
use crate::utils::error::ClientError;

/// Who is signed in, and the three ways that changes: the initial load,
/// login and logout.
#[derive(Clone)]
pub struct SessionContext {
    session: Session,
    auth: AuthService,
}

impl SessionContext {
    pub fn new(session: Session, auth: AuthService) -> Self {
        Self { session, auth }
    }

    /// Rehydrates the user from a stored token. Runs once when the
    /// application starts; `is_loading` stays true until it returns.
    pub async fn load(&self) -> SessionSnapshot {
        self.session.set_loading(true);

        match self.auth.get_current_user().await {
            Ok(Some(user)) => {
                if let Err(e) = self.session.sign_in(user) {
                    e.log();
                    self.clear_quietly();
                }
            }
            Ok(None) => self.session.set_loading(false),
            // The token is already gone and the snapshot marked expired.
            Err(ClientError::SessionExpired) => {}
            Err(e) => {
                e.log();
                self.clear_quietly();
            }
        }

        self.session.snapshot()
    }

    /// On failure the error goes back to the caller and the session is left
    /// as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let auth = self.auth.login(email, password).await?;
        self.session.sign_in(auth.user.clone())?;
        Ok(auth.user)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let auth = self.auth.register(email, password).await?;
        self.session.sign_in(auth.user.clone())?;
        Ok(auth.user)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.auth.logout()
    }

    fn clear_quietly(&self) {
        if let Err(e) = self.session.clear() {
            e.log();
            self.session.set_loading(false);
        }
    }

    pub fn user(&self) -> Option<User> {
        self.session.snapshot().user
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.snapshot().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.session.snapshot().is_loading
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.session.subscribe()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
