use std::fmt::Write as _;

use super::format::{format_date, format_price};
use super::{Generation, LoadTicket, Loadable};
use crate::models::{Event, EventList};
use crate::routes::Route;
use crate::services::EventService;
use crate::utils::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub total: u64,
}

#[derive(Debug, Default)]
pub struct EventsPage {
    events: Loadable<Vec<Event>>,
    page_info: Option<PageInfo>,
    generation: Generation,
}

impl EventsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &Loadable<Vec<Event>> {
        &self.events
    }

    pub fn page_info(&self) -> Option<PageInfo> {
        self.page_info
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.events = Loadable::Loading;
        self.generation.next()
    }

    /// Returns whether the result was applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Event>, ClientError>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale event list");
            return false;
        }
        self.events = Loadable::settle(result);
        true
    }

    pub async fn load(&mut self, service: &EventService) {
        let ticket = self.begin_load();
        let result = service.get_events().await;
        self.page_info = None;
        self.finish_load(ticket, result);
    }

    pub async fn load_page(&mut self, service: &EventService, page: u32, page_size: u32) {
        let ticket = self.begin_load();
        let result = service.get_events_page(page, page_size).await;
        if self.generation.is_current(ticket) {
            self.page_info = result.as_ref().ok().map(|list: &EventList| PageInfo {
                page: list.page,
                total: list.total,
            });
        }
        self.finish_load(ticket, result.map(|list| list.events));
    }

    /// The retry button.
    pub async fn retry(&mut self, service: &EventService) {
        self.load(service).await;
    }

    /// Navigating away; any load still in flight is ignored when it lands.
    pub fn leave(&mut self) {
        self.generation.invalidate();
    }

    /// Clicking a card opens the purchase form with that event preselected.
    pub fn select(&self, event_id: &str) -> Option<Route> {
        self.events
            .value()?
            .iter()
            .find(|event| event.id == event_id)
            .map(|event| Route::Purchase {
                event_id: Some(event.id.clone()),
            })
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Available Events\n");
        out.push_str("Browse our upcoming events and book your tickets today!\n\n");

        match &self.events {
            Loadable::Idle => {}
            Loadable::Loading => out.push_str("Loading events...\n"),
            Loadable::Failed(message) => {
                let _ = writeln!(out, "Error: {message}");
                out.push_str("[Retry]\n");
            }
            Loadable::Loaded(events) if events.is_empty() => {
                out.push_str("No events available right now.\n");
            }
            Loadable::Loaded(events) => {
                for event in events {
                    out.push_str(&render_event_card(event));
                    out.push('\n');
                }
                if let Some(info) = self.page_info {
                    let _ = writeln!(
                        out,
                        "Page {} - showing {} of {} events",
                        info.page,
                        events.len(),
                        info.total
                    );
                }
            }
        }

        out
    }
}

pub fn render_event_card(event: &Event) -> String {
    let mut card = String::new();
    let _ = writeln!(card, "{}  [{}]", event.title, event.id);
    if !event.description.is_empty() {
        let _ = writeln!(card, "{}", event.description);
    }
    let _ = writeln!(card, "  Date:      {}", format_date(&event.event_date));
    let _ = writeln!(card, "  Location:  {}", event.venue);
    let _ = writeln!(card, "  Price:     {}", format_price(event.ticket_price));
    if event.is_sold_out() {
        let _ = writeln!(card, "  Available: sold out");
    } else {
        let _ = writeln!(card, "  Available: {} tickets", event.available_tickets);
    }
    card
}
