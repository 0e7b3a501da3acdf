use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub ticket_price: Decimal,
    pub total_tickets: u32,
    pub available_tickets: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_sold_out(&self) -> bool {
        self.available_tickets == 0
    }

    /// Price preview for `quantity` tickets. Availability is the API's call.
    pub fn total_price(&self, quantity: u32) -> Decimal {
        self.ticket_price * Decimal::from(quantity)
    }
}

/// Payload of `GET /events`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
}

/// Payload of `GET /events/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetail {
    #[serde(default)]
    pub event: Option<Event>,
}
