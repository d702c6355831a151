mod presence;

pub use presence::InMemoryPresenceRepository;
