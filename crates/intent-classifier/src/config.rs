use crate::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the decision pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Statistical results scoring strictly below this are replaced by the
    /// heuristic fallback
    pub confidence_threshold: f32,
    /// Whether low-confidence statistical results may be replaced
    pub use_rules_fallback: bool,
    /// `top_k` used by [`crate::IntentClassifier::predict`]
    pub default_top_k: usize,
    /// Deadline for one statistical inference call
    pub adapter_timeout_ms: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            use_rules_fallback: true,
            default_top_k: 1,
            adapter_timeout_ms: None,
        }
    }
}

impl ClassifierConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.confidence_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.confidence_threshold)
        {
            return Err(ClassifierError::InvalidConfig(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.default_top_k == 0 {
            return Err(ClassifierError::InvalidConfig(
                "default_top_k must be at least 1".to_string(),
            ));
        }
        if self.adapter_timeout_ms == Some(0) {
            return Err(ClassifierError::InvalidConfig(
                "adapter_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
