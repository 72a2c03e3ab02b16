//! Intent classification for robot voice commands
//!
//! This crate decides which intent a transcribed utterance maps to. Safety
//! commands such as "stop" are recognized by deterministic rules before any
//! statistical model is consulted; a keyword classifier is the floor whenever
//! the model is absent or not confident enough.

mod error;
pub use error::{AdapterError, ClassifierError, Result};

mod config;
pub use config::ClassifierConfig;

mod taxonomy;
pub use taxonomy::{IntentDomain, IntentLabel, SAFETY_CRITICAL};

mod types;
pub use types::{Prediction, RankedCandidate};

pub mod normalization;
pub use normalization::{NormalizationTable, Normalized};

pub mod safety;
pub use safety::{SafetyRule, SafetyRuleEngine};

pub mod heuristic;
pub use heuristic::HeuristicClassifier;

mod traits;
pub use traits::{LogitsBackend, StatisticalClassifier, TopK};

pub mod adapter;
pub use adapter::{LogitsClassifier, TimeBoundedClassifier};

mod classifier;
pub use classifier::{IntentClassifier, IntentClassifierBuilder};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::MockClassifier;

/// Initialize the intent classification system
pub fn init() -> Result<()> {
    tracing::info!(
        labels = IntentLabel::labels().len(),
        aliases = NormalizationTable::shared().len(),
        safety_rules = SafetyRuleEngine::shared().rules().len(),
        "Initializing intent classifier"
    );
    Ok(())
}

/// Create a rules-only classifier with default configuration
pub fn create_classifier() -> Result<IntentClassifier> {
    IntentClassifier::new(ClassifierConfig::default())
}

/// Classify a single utterance without a statistical model
pub fn classify(text: &str) -> Result<Prediction> {
    let classifier = create_classifier()?;
    Ok(classifier.predict(text))
}
