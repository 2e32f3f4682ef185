//! Mechanic directory and proximity matching.
//!
//! Customers without a chosen mechanic are offered every mechanic registered
//! for the requested service category within the search radius, nearest
//! first, each decorated with distance and rating statistics.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Matching service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
