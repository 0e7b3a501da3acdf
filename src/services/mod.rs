//! Domain services: each turns one API resource into typed outcomes.

pub mod auth;
pub mod event;
pub mod ticket;

pub use auth::AuthService;
pub use event::EventService;
pub use ticket::TicketService;
