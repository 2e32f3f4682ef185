//! Adapter implementations of the notification ports.

pub mod memory;
pub mod postgres;
