//! Command-line peer for the deai relay.

pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
pub mod session;
pub mod ui;

pub use runner::run_client;
