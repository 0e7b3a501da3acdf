use std::fmt::Write as _;

use super::{Generation, LoadTicket, Loadable};
use crate::models::User;
use crate::routes::Route;
use crate::session::SessionContext;
use crate::utils::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    Register,
}

// No Debug: the struct holds a password.
#[derive(Default)]
pub struct LoginPage {
    mode: LoginMode,
    email: String,
    password: String,
    state: Loadable<User>,
    generation: Generation,
}

impl LoginPage {
    pub fn new(mode: LoginMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn set_credentials(&mut self, email: impl Into<String>, password: impl Into<String>) {
        self.email = email.into();
        self.password = password.into();
    }

    pub fn state(&self) -> &Loadable<User> {
        &self.state
    }

    /// Returns the trimmed email when both fields are filled in.
    pub fn begin_submit(&mut self) -> Option<(LoadTicket, String)> {
        if self.state.is_loading() {
            return None;
        }

        let email = self.email.trim().to_string();
        if email.is_empty() || self.password.is_empty() {
            self.state = Loadable::settle(Err(ClientError::Validation(
                "Email and password are required".to_string(),
            )));
            return None;
        }

        self.state = Loadable::Loading;
        Some((self.generation.next(), email))
    }

    pub fn finish_submit(&mut self, ticket: LoadTicket, result: Result<User, ClientError>) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        if result.is_err() {
            self.password.clear();
        }
        self.state = Loadable::settle(result);
        true
    }

    /// On success the password is dropped and the caller is sent to the
    /// events page.
    pub async fn submit(&mut self, session: &SessionContext) -> Option<Route> {
        let (ticket, email) = self.begin_submit()?;

        let result = match self.mode {
            LoginMode::SignIn => session.login(&email, &self.password).await,
            LoginMode::Register => session.register(&email, &self.password).await,
        };
        let succeeded = result.is_ok();

        if self.finish_submit(ticket, result) && succeeded {
            self.password.clear();
            Some(Route::Events)
        } else {
            None
        }
    }

    pub fn leave(&mut self) {
        self.generation.invalidate();
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(match self.mode {
            LoginMode::SignIn => "Login\n",
            LoginMode::Register => "Create an account\n",
        });

        match &self.state {
            Loadable::Idle => {}
            Loadable::Loading => out.push_str("Signing in...\n"),
            Loadable::Loaded(user) => {
                let _ = writeln!(out, "Signed in as {}", user.email);
            }
            Loadable::Failed(message) => {
                let _ = writeln!(out, "Error: {message}");
            }
        }
        out
    }
}
