use crate::config::Config;
use crate::http::ApiClient;
use crate::services::{AuthService, EventService, TicketService};
use crate::session::{Session, SessionContext};
use crate::storage::{FileTokenStore, TokenStore};
use crate::utils::error::ClientError;

/// Application root: owns the one session and the services built on it.
#[derive(Clone)]
pub struct App {
    session: SessionContext,
    events: EventService,
    tickets: TicketService,
}

impl App {
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let store = FileTokenStore::new(&config.session_file, &config.token_slot);
        Self::with_store(&config.api_url, store)
    }

    pub fn with_store(
        api_url: &str,
        store: impl TokenStore + 'static,
    ) -> Result<Self, ClientError> {
        let session = Session::new(store);
        let api = ApiClient::new(api_url, session.clone())?;

        Ok(Self {
            session: SessionContext::new(session, AuthService::new(api.clone())),
            events: EventService::new(api.clone()),
            tickets: TicketService::new(api),
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn events(&self) -> &EventService {
        &self.events
    }

    pub fn tickets(&self) -> &TicketService {
        &self.tickets
    }
}
