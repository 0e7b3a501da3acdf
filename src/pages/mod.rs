//! Page state machines.
//!
//! Every page moves through `idle → loading → (loaded | failed)` and can be
//! re-entered by an explicit user action. Each request takes a [`LoadTicket`]
//! from the page's [`Generation`]; a result presented with an outdated ticket
//! (the page was reloaded or left in the meantime) is dropped.

pub mod events;
pub mod format;
pub mod login;
pub mod navbar;
pub mod orders;
pub mod purchase;

pub use events::EventsPage;
pub use login::{LoginMode, LoginPage};
pub use navbar::Navbar;
pub use orders::OrdersPage;
pub use purchase::PurchasePage;

use crate::utils::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Idle
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn settle(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(e) => Loadable::Failed(e.public_message()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(&mut self) -> LoadTicket {
        self.0 += 1;
        LoadTicket(self.0)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.0 == ticket.0
    }

    /// Outstanding tickets stop being current.
    pub fn invalidate(&mut self) {
        self.0 += 1;
    }
}
