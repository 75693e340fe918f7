//! Verification Config: concurrency, timeouts and matching thresholds
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Thresholds used by the evidence matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Minimum agreement score for a Supported verdict
    pub acceptance_threshold: f64,
    /// Minimum disagreement score (1 - agreement) for a Contradicted verdict
    pub contradiction_threshold: f64,
    /// Relative tolerance for money comparisons
    pub numeric_tolerance: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.85,
            contradiction_threshold: 0.5,
            numeric_tolerance: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Max claims checked at the same time within one request
    pub concurrency_limit: usize,
    /// Budget for lookup + verification of a single claim
    pub claim_timeout_ms: u64,
    pub matching: MatchThresholds,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 4,
            claim_timeout_ms: 10_000,
            matching: MatchThresholds::default(),
        }
    }
}

impl VerificationConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    pub fn claim_timeout(&self) -> Duration {
        Duration::from_millis(self.claim_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency_limit == 0 {
            return Err(ConfigError::Invalid("concurrency_limit must be >= 1".into()));
        }
        if self.claim_timeout_ms == 0 {
            return Err(ConfigError::Invalid("claim_timeout_ms must be > 0".into()));
        }
        let m = &self.matching;
        for (name, v) in [
            ("acceptance_threshold", m.acceptance_threshold),
            ("contradiction_threshold", m.contradiction_threshold),
            ("numeric_tolerance", m.numeric_tolerance),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid(format!("{} must be within [0, 1], got {}", name, v)));
            }
        }
        Ok(())
    }
}
