//! HTTP / WebSocket handlers.

mod http;
mod websocket;

pub use http::{get_namespaces, get_room_detail, get_rooms, health_check};
pub use websocket::{default_websocket_handler, namespaced_websocket_handler};
