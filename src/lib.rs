//! Roadside: service-request matching and lifecycle engine.
//!
//! The crate routes customer help requests to nearby mechanics, drives each
//! request through its status lifecycle, expires requests nobody answered,
//! gates chat on request state and aggregates mechanic ratings. Web handlers
//! sit outside the crate and call the services here with an authenticated
//! [`identity::Actor`].
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and delivery
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over ports, generic over adapters
//!
//! # Modules
//!
//! - [`mechanic`]: Mechanic directory and proximity matching
//! - [`service_request`]: Request lifecycle, expiry sweep and chat
//! - [`rating`]: Ratings, completion feedback and statistics
//! - [`notification`]: Inbox notifications for lifecycle events
//! - [`identity`]: Caller identity and roles
//! - [`config`]: Engine tunables
//! - [`error`]: Caller-facing failure categories

pub mod config;
pub mod error;
pub mod identity;
pub mod mechanic;
pub mod notification;
pub mod rating;
pub mod service_request;

#[cfg(test)]
mod test_support;
