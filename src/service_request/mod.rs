//! Service request lifecycle, expiry and chat.
//!
//! A request is raised by a customer, answered by a mechanic and moves
//! through the status graph in [`domain::RequestStatus`]. Every status write
//! is a compare-and-set against the status the caller observed, so two
//! mechanics racing to accept the same request cannot both win.
//!
//! - Domain types and the access policy in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
