pub mod event;
pub mod ticket;
pub mod user;

pub use event::{Event, EventDetail, EventList};
pub use ticket::{OrderList, OrderStatus, PurchaseRequest, PurchaseResponse, TicketOrder};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, Role, User};
