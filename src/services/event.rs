use serde::Serialize;

use crate::http::ApiClient;
use crate::models::{Event, EventDetail, EventList};
use crate::utils::error::ClientError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Serialize)]
struct PageQuery {
    page: u32,
    page_size: u32,
}

#[derive(Clone)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Events on the API's default page. A response without data is an
    /// empty list.
    pub async fn get_events(&self) -> Result<Vec<Event>, ClientError> {
        let envelope = self
            .api
            .get::<EventList>("/events")
            .await
            .inspect_err(ClientError::log)?;
        Ok(envelope.into_optional().map(|list| list.events).unwrap_or_default())
    }

    pub async fn get_events_page(&self, page: u32, page_size: u32) -> Result<EventList, ClientError> {
        let query = PageQuery {
            page: page.max(1),
            page_size: page_size.max(1),
        };
        let envelope = self
            .api
            .get_with_query::<EventList, _>("/events", &query)
            .await
            .inspect_err(ClientError::log)?;
        Ok(envelope.into_optional().unwrap_or(EventList {
            page: query.page,
            ..EventList::default()
        }))
    }

    pub async fn get_event_by_id(&self, id: &str) -> Result<Event, ClientError> {
        let not_found = || ClientError::NotFound("Event not found".to_string());

        let envelope = match self
            .api
            .get::<EventDetail>(&format!("/events/{id}"))
            .await
        {
            Ok(envelope) => envelope,
            Err(ClientError::Api { status: 404, .. }) => return Err(not_found()),
            Err(e) => {
                e.log();
                return Err(e);
            }
        };

        envelope
            .into_optional()
            .and_then(|detail| detail.event)
            .ok_or_else(|| {
                tracing::debug!(event_id = %id, "Event missing from response");
                not_found()
            })
    }
}
