//! Adapter implementations of the rating repository port.

pub mod memory;
pub mod postgres;
