//! Client for the ticketing API: session handling, typed domain services and
//! the page state machines the `ticketing` binary renders.

pub mod app;
pub mod config;
pub mod handlers;
pub mod http;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod utils;

pub use app::App;
pub use config::Config;
pub use utils::error::ClientError;
