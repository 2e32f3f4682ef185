//! Request content: issue text, location and service category.

use super::ServiceRequestDomainError;
use crate::mechanic::domain::{Coordinates, MechanicType};
use serde::{Deserialize, Serialize};

/// Customer description of the problem, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueDescription(String);

impl IssueDescription {
    /// Creates a validated issue description.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRequestDomainError::EmptyIssueDescription`] when the
    /// text is blank.
    pub fn new(text: impl Into<String>) -> Result<Self, ServiceRequestDomainError> {
        let raw = text.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ServiceRequestDomainError::EmptyIssueDescription);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IssueDescription {
    type Error = ServiceRequestDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueDescription> for String {
    fn from(value: IssueDescription) -> Self {
        value.0
    }
}

/// Where the customer needs help.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLocation {
    label: String,
    coordinates: Option<Coordinates>,
}

impl RequestLocation {
    /// Creates a location from a free-text label and optional coordinates.
    #[must_use]
    pub fn new(label: impl Into<String>, coordinates: Option<Coordinates>) -> Self {
        Self {
            label: label.into().trim().to_owned(),
            coordinates,
        }
    }

    /// Returns the free-text label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the coordinates, if pinned.
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// Validated request content shared by fresh and re-raised requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDraft {
    issue: IssueDescription,
    location: RequestLocation,
    mechanic_type: MechanicType,
}

impl RequestDraft {
    /// Bundles request content.
    #[must_use]
    pub const fn new(
        issue: IssueDescription,
        location: RequestLocation,
        mechanic_type: MechanicType,
    ) -> Self {
        Self {
            issue,
            location,
            mechanic_type,
        }
    }

    /// Returns the issue description.
    #[must_use]
    pub const fn issue(&self) -> &IssueDescription {
        &self.issue
    }

    /// Returns the location.
    #[must_use]
    pub const fn location(&self) -> &RequestLocation {
        &self.location
    }

    /// Returns the requested service category.
    #[must_use]
    pub const fn mechanic_type(&self) -> MechanicType {
        self.mechanic_type
    }
}
