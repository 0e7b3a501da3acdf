use std::env;
use std::path::PathBuf;

use crate::utils::error::ClientError;

const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
const DEFAULT_SESSION_FILE: &str = ".ticketing/session.json";
const DEFAULT_TOKEN_SLOT: &str = "auth_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub token_slot: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            token_slot: DEFAULT_TOKEN_SLOT.to_string(),
        }
    }
}

impl Config {
    /// Reads `TICKETING_*` variables. The binary loads `.env` before calling
    /// this.
    pub fn from_env() -> Result<Self, ClientError> {
        Self {
            api_url: env::var("TICKETING_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            session_file: env::var("TICKETING_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE)),
            token_slot: env::var("TICKETING_TOKEN_SLOT")
                .unwrap_or_else(|_| DEFAULT_TOKEN_SLOT.to_string()),
        }
        .validated()
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self, ClientError> {
        self.api_url = api_url.into();
        self.validated()
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    fn validated(mut self) -> Result<Self, ClientError> {
        let trimmed = self.api_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        self.api_url = trimmed.to_string();

        if self.token_slot.trim().is_empty() {
            return Err(ClientError::Config(
                "token storage slot name must not be empty".to_string(),
            ));
        }

        tracing::debug!(api_url = %self.api_url, "Configuration loaded");
        Ok(self)
    }
}
