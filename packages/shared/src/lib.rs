//! Utilities shared by the deai relay server and CLI client.

pub mod logger;
pub mod time;
