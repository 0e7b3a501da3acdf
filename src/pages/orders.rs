use std::fmt::Write as _;

use super::format::{format_date, format_price};
use super::{Generation, LoadTicket, Loadable};
use crate::models::TicketOrder;
use crate::services::TicketService;
use crate::utils::error::ClientError;

/// The signed-in user's order history.
#[derive(Debug, Default)]
pub struct OrdersPage {
    orders: Loadable<Vec<TicketOrder>>,
    generation: Generation,
}

impl OrdersPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &Loadable<Vec<TicketOrder>> {
        &self.orders
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.orders = Loadable::Loading;
        self.generation.next()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<TicketOrder>, ClientError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        self.orders = Loadable::settle(result);
        true
    }

    pub async fn load(&mut self, service: &TicketService) {
        let ticket = self.begin_load();
        let result = service.get_my_orders().await;
        self.finish_load(ticket, result);
    }

    /// The retry button.
    pub async fn retry(&mut self, service: &TicketService) {
        self.load(service).await;
    }

    pub fn leave(&mut self) {
        self.generation.invalidate();
    }

    pub fn render(&self) -> String {
        let mut out = String::from("My Orders\n\n");
        match &self.orders {
            Loadable::Idle => {}
            Loadable::Loading => out.push_str("Loading orders...\n"),
            Loadable::Failed(message) => {
                let _ = writeln!(out, "Error: {message}");
                out.push_str("[Retry]\n");
            }
            Loadable::Loaded(orders) if orders.is_empty() => {
                out.push_str("You have no orders yet.\n");
            }
            Loadable::Loaded(orders) => {
                for order in orders {
                    let _ = writeln!(
                        out,
                        "{}  event {}  x{}  {}  {}  {}",
                        order.id,
                        order.event_id,
                        order.quantity,
                        format_price(order.total_price),
                        order.status.as_str(),
                        format_date(&order.created_at)
                    );
                }
            }
        }
        out
    }
}
