//! axum による Transport Adapter と HTTP API

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
