//! Proximity matching service.

mod matcher;

pub use matcher::{MatcherError, MatcherResult, ProximityMatcher};
