//! deai signaling relay server.
//!
//! Rooms, presence and relay of peer-to-peer negotiation messages over WebSocket.
//! Each namespace is an independent relay core with its own connection registry
//! and room table.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
