use reqwest::StatusCode;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Purchase error: {0}")]
    Purchase(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error")]
    Storage(#[from] std::io::Error),

    #[error("Storage format error")]
    StorageFormat(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Builds an `Api` error from a non-success status, falling back to the
    /// canonical reason phrase when the server sent no message.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        if status == StatusCode::UNAUTHORIZED {
            ClientError::Unauthorized(message)
        } else {
            ClientError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Authentication(_) => "AUTH_ERROR",
            ClientError::SessionExpired => "SESSION_EXPIRED",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::Purchase(_) => "PURCHASE_ERROR",
            ClientError::Unauthorized(_) => "UNAUTHORIZED",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Storage(_) => "STORAGE_ERROR",
            ClientError::StorageFormat(_) => "STORAGE_FORMAT_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// The single message a page shows for this failure. Transport, decode
    /// and storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ClientError::Validation(msg)
            | ClientError::Authentication(msg)
            | ClientError::NotFound(msg)
            | ClientError::Purchase(msg)
            | ClientError::Unauthorized(msg)
            | ClientError::Config(msg) => msg.clone(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::SessionExpired => {
                "Your session has expired. Please log in again.".to_string()
            }
            ClientError::Transport(_) => {
                "Unable to reach the ticketing service. Please try again.".to_string()
            }
            ClientError::Decode(_) => {
                "The ticketing service sent an unexpected response.".to_string()
            }
            ClientError::Storage(_) | ClientError::StorageFormat(_) => {
                "Unable to access the saved session.".to_string()
            }
        }
    }

    pub fn log(&self) {
        match self {
            ClientError::Validation(msg) => {
                warn!(code = self.code(), message = %msg, "Rejected input");
            }
            ClientError::SessionExpired => {
                warn!(code = self.code(), "Session token rejected");
            }
            ClientError::Authentication(msg)
            | ClientError::NotFound(msg)
            | ClientError::Purchase(msg)
            | ClientError::Unauthorized(msg)
            | ClientError::Decode(msg)
            | ClientError::Config(msg) => {
                error!(error = ?self, message = %msg, "Client error");
            }
            ClientError::Api { status, message } => {
                error!(code = self.code(), status = *status, message = %message, "API error");
            }
            ClientError::Transport(e) => {
                error!(error = ?e, "Transport error");
            }
            ClientError::Storage(e) => {
                error!(error = ?e, "Session storage error");
            }
            ClientError::StorageFormat(e) => {
                error!(error = ?e, "Session storage format error");
            }
        }
    }
}
