//! Data Transfer Objects (DTOs) for the signaling relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (inbound and outbound)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
