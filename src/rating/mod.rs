//! Mechanic ratings, legacy feedback and rating statistics.
//!
//! Customers rate the mechanic assigned to their request. Each request holds
//! at most one rating, revised in place on re-submission. Statistics power
//! the matcher results and the mechanic profile page.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
