use crate::http::ApiClient;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::session::Session;
use crate::utils::error::ClientError;
use crate::utils::response::Envelope;

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &Session {
        self.api.session()
    }

    /// Exchanges credentials for a token and persists it.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let result = self
            .api
            .post_anonymous("/auth/login", &LoginRequest { email, password })
            .await;
        self.finish_auth(result, "Login failed")
    }

    /// Creates an account; the API answers like a login.
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let result = self
            .api
            .post_anonymous("/auth/register", &RegisterRequest { email, password })
            .await;
        self.finish_auth(result, "Registration failed")
    }

    fn finish_auth(
        &self,
        result: Result<Envelope<AuthResponse>, ClientError>,
        fallback: &str,
    ) -> Result<AuthResponse, ClientError> {
        let auth = match result {
            Ok(envelope) => envelope
                .into_required(fallback)
                .map_err(ClientError::Authentication),
            Err(ClientError::Api { message, .. }) | Err(ClientError::Unauthorized(message)) => {
                Err(ClientError::Authentication(message))
            }
            Err(e) => Err(e),
        }
        .inspect_err(ClientError::log)?;

        self.session().persist_token(&auth.token)?;
        tracing::info!(user_id = %auth.user.id, "Authenticated");
        Ok(auth)
    }

    /// Local only: drops the token and whoever was signed in. Fails, leaving
    /// the session as it was, when the stored token cannot be removed.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session().clear().inspect_err(ClientError::log)?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// `Ok(None)` when no token is stored, without touching the network.
    /// Any failure to fetch the profile clears the token and is reported as
    /// `SessionExpired`.
    pub async fn get_current_user(&self) -> Result<Option<User>, ClientError> {
        if !self.session().has_token() {
            return Ok(None);
        }

        let user = match self.api.get::<User>("/users/me").await {
            Ok(envelope) => envelope.into_required("Profile unavailable").ok(),
            Err(e) => {
                e.log();
                None
            }
        };

        match user {
            Some(user) => Ok(Some(user)),
            None => {
                self.session().expire();
                Err(ClientError::SessionExpired)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().has_token()
    }
}
