use std::fmt::Write as _;

use rust_decimal::Decimal;

use super::format::format_price;
use super::{Generation, LoadTicket, Loadable};
use crate::models::ticket::{MAX_QUANTITY, MIN_QUANTITY};
use crate::models::{Event, PurchaseRequest, PurchaseResponse, User};
use crate::services::{EventService, TicketService};
use crate::utils::error::ClientError;

#[derive(Debug)]
pub struct PurchasePage {
    events: Loadable<Vec<Event>>,
    selected_event_id: Option<String>,
    quantity: u32,
    submission: Loadable<PurchaseResponse>,
    validation_error: Option<String>,
    load_generation: Generation,
    submit_generation: Generation,
}

impl Default for PurchasePage {
    fn default() -> Self {
        Self {
            events: Loadable::Idle,
            selected_event_id: None,
            quantity: MIN_QUANTITY,
            submission: Loadable::Idle,
            validation_error: None,
            load_generation: Generation::default(),
            submit_generation: Generation::default(),
        }
    }
}

impl PurchasePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(event_id: Option<String>) -> Self {
        Self {
            selected_event_id: event_id,
            ..Self::default()
        }
    }

    pub fn events(&self) -> &Loadable<Vec<Event>> {
        &self.events
    }

    pub fn submission(&self) -> &Loadable<PurchaseResponse> {
        &self.submission
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn select_event(&mut self, event_id: impl Into<String>) {
        self.selected_event_id = Some(event_id.into()).filter(|id: &String| !id.is_empty());
        self.validation_error = None;
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.validation_error = None;
    }

    pub fn selected_event(&self) -> Option<&Event> {
        let id = self.selected_event_id.as_deref()?;
        self.events.value()?.iter().find(|event| event.id == id)
    }

    /// Price preview from the already loaded event; no request is made.
    pub fn total_price(&self) -> Option<Decimal> {
        if self.quantity < MIN_QUANTITY {
            return None;
        }
        self.selected_event()
            .map(|event| event.total_price(self.quantity))
    }

    /// The submit control is disabled while a purchase is in flight.
    pub fn can_submit(&self) -> bool {
        !self.submission.is_loading()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.events = Loadable::Loading;
        self.load_generation.next()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Event>, ClientError>) -> bool {
        if !self.load_generation.is_current(ticket) {
            tracing::debug!("Discarding stale event list");
            return false;
        }
        self.events = Loadable::settle(result);
        true
    }

    pub async fn load_events(&mut self, service: &EventService) {
        let ticket = self.begin_load();
        let result = service.get_events().await;
        self.finish_load(ticket, result);
    }

    /// The retry button shown when the event list failed to load. The
    /// selection and quantity are kept.
    pub async fn retry(&mut self, service: &EventService) {
        self.load_events(service).await;
    }

    fn validate(&self) -> Result<PurchaseRequest, ClientError> {
        let event_id = self
            .selected_event_id
            .clone()
            .ok_or_else(|| ClientError::Validation("Please select an event".to_string()))?;

        if self.quantity < MIN_QUANTITY {
            return Err(ClientError::Validation(format!(
                "Quantity must be at least {MIN_QUANTITY}"
            )));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(ClientError::Validation(format!(
                "Quantity cannot exceed {MAX_QUANTITY}"
            )));
        }

        Ok(PurchaseRequest {
            event_id,
            quantity: self.quantity,
        })
    }

    /// Validates the form and marks it as submitting. `None` means nothing
    /// should be sent: the input was invalid or a submission is in flight.
    pub fn begin_submit(&mut self) -> Option<(LoadTicket, PurchaseRequest)> {
        if !self.can_submit() {
            return None;
        }

        match self.validate() {
            Ok(request) => {
                self.validation_error = None;
                self.submission = Loadable::Loading;
                Some((self.submit_generation.next(), request))
            }
            Err(e) => {
                e.log();
                self.validation_error = Some(e.public_message());
                None
            }
        }
    }

    pub fn finish_submit(
        &mut self,
        ticket: LoadTicket,
        result: Result<PurchaseResponse, ClientError>,
    ) -> bool {
        if !self.submit_generation.is_current(ticket) {
            tracing::debug!("Discarding stale purchase result");
            return false;
        }
        self.submission = Loadable::settle(result);
        true
    }

    /// Submits the form, then reloads the event list so availability
    /// reflects the purchase. Returns whether the purchase succeeded.
    pub async fn submit(&mut self, tickets: &TicketService, events: &EventService) -> bool {
        let Some((ticket, request)) = self.begin_submit() else {
            return false;
        };

        let result = tickets.purchase_ticket(&request).await;
        let succeeded = result.is_ok();
        let applied = self.finish_submit(ticket, result);

        if succeeded && applied {
            self.load_events(events).await;
        }
        succeeded
    }

    pub fn leave(&mut self) {
        self.load_generation.invalidate();
        self.submit_generation.invalidate();
    }

    pub fn render(&self, user: Option<&User>) -> String {
        let mut out = String::from("Purchase Tickets\n");
        if let Some(user) = user {
            let _ = writeln!(out, "Welcome, {}!", user.email);
        }
        out.push('\n');

        match &self.events {
            Loadable::Loading => out.push_str("Loading events...\n"),
            Loadable::Failed(message) => {
                let _ = writeln!(out, "Error: {message}");
                out.push_str("[Retry]\n");
            }
            Loadable::Idle | Loadable::Loaded(_) => {}
        }

        match (self.selected_event(), self.selected_event_id.as_deref()) {
            (Some(event), _) => {
                let _ = writeln!(
                    out,
                    "Event:     {} ({} per ticket, {} available)",
                    event.title,
                    format_price(event.ticket_price),
                    event.available_tickets
                );
            }
            (None, Some(id)) if self.events.value().is_some() => {
                let _ = writeln!(out, "Event:     {id} (not in the current listing)");
            }
            (None, Some(id)) => {
                let _ = writeln!(out, "Event:     {id}");
            }
            (None, None) => out.push_str("Event:     (none selected)\n"),
        }
        let _ = writeln!(out, "Quantity:  {}", self.quantity);
        if let Some(total) = self.total_price() {
            let _ = writeln!(out, "Total:     {}", format_price(total));
        }

        if let Some(message) = &self.validation_error {
            let _ = writeln!(out, "\n{message}");
        }

        match &self.submission {
            Loadable::Idle => {}
            Loadable::Loading => out.push_str("\nProcessing purchase...\n"),
            Loadable::Loaded(response) => {
                let _ = writeln!(
                    out,
                    "\nPurchase successful! Order {} ({})",
                    response.order_id, response.status
                );
                let _ = writeln!(out, "Transaction: {}", response.transaction_id);
                if let Some(message) = &response.message {
                    let _ = writeln!(out, "{message}");
                }
            }
            Loadable::Failed(message) => {
                let _ = writeln!(out, "\nPurchase failed: {message}");
            }
        }

        out
    }
}
