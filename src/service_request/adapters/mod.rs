//! Adapter implementations of the request and chat ports.

pub mod memory;
pub mod postgres;
