use crate::IntentLabel;
use serde::{Deserialize, Serialize};

/// One entry of a ranked candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// Label as produced by the classifier that ranked it; may be an alias.
    pub label: String,
    pub confidence: f32,
}

impl RankedCandidate {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

impl From<(IntentLabel, f32)> for RankedCandidate {
    fn from((label, confidence): (IntentLabel, f32)) -> Self {
        Self::new(label.as_str(), confidence)
    }
}

/// The decision for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: IntentLabel,
    /// In `[0, 1]`.
    pub confidence: f32,
    pub is_safety_critical: bool,
    /// True when the label came from a deterministic rule rather than the
    /// statistical model.
    pub used_fallback: bool,
    /// Raw label before alias rewriting, when a rewrite happened.
    pub normalized_from: Option<String>,
    /// Top-k list, at most `k` long.
    pub ranked_candidates: Vec<RankedCandidate>,
}

impl Prediction {
    /// Rule-engine override: full confidence, always safety-critical.
    pub fn safety_override(label: IntentLabel) -> Self {
        Self {
            label,
            confidence: 1.0,
            is_safety_critical: true,
            used_fallback: true,
            normalized_from: None,
            ranked_candidates: vec![RankedCandidate::from((label, 1.0))],
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.label.is_unknown()
    }

    pub fn top_candidate(&self) -> Option<&RankedCandidate> {
        self.ranked_candidates.first()
    }
}
