//! Repository 実装
//!
//! - `inmemory`: プロセス内の `PresenceState` をそのまま保持する実装

pub mod inmemory;

pub use inmemory::InMemoryPresenceRepository;
