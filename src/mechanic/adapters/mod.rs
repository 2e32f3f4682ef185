//! Adapter implementations of the mechanic directory port.

pub mod memory;
pub mod postgres;
