//! Caller-facing failure categories shared by every service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a service failure.
///
/// Web handlers map each category to a distinct user-visible message:
/// "check your input", "you can't do that", "that's not allowed right now"
/// and "that no longer exists". [`ErrorCategory::Infrastructure`] covers
/// storage failures that are not the caller's fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing or out-of-range input.
    Validation,
    /// The actor lacks the role or relationship the action requires.
    Authorization,
    /// The action is not valid in the current lifecycle state.
    State,
    /// A referenced entity does not exist.
    NotFound,
    /// Storage or runtime failure.
    Infrastructure,
}

impl ErrorCategory {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::State => "state",
            Self::NotFound => "not_found",
            Self::Infrastructure => "infrastructure",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
