//! In-memory adapters for mechanic profiles.

mod directory;

pub use directory::InMemoryMechanicDirectory;
