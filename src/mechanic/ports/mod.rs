//! Port contracts for the mechanic directory.

pub mod directory;

pub use directory::{MechanicDirectory, MechanicDirectoryError, MechanicDirectoryResult};
