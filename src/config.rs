//! Engine configuration.
//!
//! Hosts load an [`EngineConfig`] from any serde format; fields left out of
//! the source document keep their defaults. Every constructor validates, so
//! a value that reaches a service is always usable.
//!
//! # Examples
//!
//! ```
//! use roadside::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{"search_radius_km": 5.0}"#)
//!     .expect("valid configuration");
//! assert!((config.search_radius_km() - 5.0).abs() < f64::EPSILON);
//! assert_eq!(config.expiry_threshold_secs(), 300);
//! ```

use chrono::TimeDelta;
use serde::Deserialize;
use thiserror::Error;

/// Default proximity search radius in kilometres.
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 10.0;

/// Default age after which an unanswered pending request expires.
pub const DEFAULT_EXPIRY_THRESHOLD_SECS: u64 = 300;

/// Validated tunables for matching and expiry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "EngineConfigDocument")]
pub struct EngineConfig {
    search_radius_km: f64,
    expiry_threshold_secs: u64,
}

/// Raw document shape before validation.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct EngineConfigDocument {
    search_radius_km: f64,
    expiry_threshold_secs: u64,
}

impl Default for EngineConfigDocument {
    fn default() -> Self {
        Self {
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            expiry_threshold_secs: DEFAULT_EXPIRY_THRESHOLD_SECS,
        }
    }
}

impl TryFrom<EngineConfigDocument> for EngineConfig {
    type Error = ConfigError;

    fn try_from(document: EngineConfigDocument) -> Result<Self, Self::Error> {
        let config = Self {
            search_radius_km: document.search_radius_km,
            expiry_threshold_secs: document.expiry_threshold_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            expiry_threshold_secs: DEFAULT_EXPIRY_THRESHOLD_SECS,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or the validation
    /// error for an unusable value.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let document: EngineConfigDocument = serde_json::from_str(source)?;
        Self::try_from(document)
    }

    /// Returns a copy with the search radius replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSearchRadius`] unless `radius_km` is a
    /// positive finite number.
    pub fn with_search_radius_km(self, radius_km: f64) -> Result<Self, ConfigError> {
        let config = Self {
            search_radius_km: radius_km,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with the expiry threshold replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroExpiryThreshold`] when `seconds` is zero.
    pub fn with_expiry_threshold_secs(self, seconds: u64) -> Result<Self, ConfigError> {
        let config = Self {
            expiry_threshold_secs: seconds,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Maximum great-circle distance between a customer and a candidate
    /// mechanic.
    #[must_use]
    pub const fn search_radius_km(&self) -> f64 {
        self.search_radius_km
    }

    /// Age in seconds at which a pending request is swept to expired.
    #[must_use]
    pub const fn expiry_threshold_secs(&self) -> u64 {
        self.expiry_threshold_secs
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.search_radius_km.is_finite() || self.search_radius_km <= 0.0 {
            return Err(ConfigError::InvalidSearchRadius(self.search_radius_km));
        }
        if self.expiry_threshold_secs == 0 {
            return Err(ConfigError::ZeroExpiryThreshold);
        }
        Ok(())
    }

    /// Returns the expiry threshold as a duration, saturating at the largest
    /// representable value.
    #[must_use]
    pub fn expiry_threshold(&self) -> TimeDelta {
        i64::try_from(self.expiry_threshold_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The search radius is zero, negative or not finite.
    #[error("search radius must be a positive number of kilometres, got {0}")]
    InvalidSearchRadius(f64),

    /// The expiry threshold is zero.
    #[error("expiry threshold must be at least one second")]
    ZeroExpiryThreshold,
}
