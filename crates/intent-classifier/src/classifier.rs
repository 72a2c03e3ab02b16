//! Hybrid decision pipeline
//!
//! Each call runs four stages in order:
//! 1. safety rules, final when they match;
//! 2. the statistical classifier, if one is configured and has an answer;
//! 3. the confidence gate, which may swap in the heuristic fallback;
//! 4. alias normalization and taxonomy validation.

use crate::{
    ClassifierConfig, HeuristicClassifier, IntentLabel, NormalizationTable, Prediction,
    RankedCandidate, Result, SafetyRuleEngine, StatisticalClassifier, TimeBoundedClassifier, TopK,
};
use std::sync::Arc;
use std::time::Duration;

/// Where the primary label came from before validation.
enum Choice {
    Rule(IntentLabel),
    Model(String),
}

/// Intent classifier combining safety rules, an optional statistical model
/// and a keyword fallback.
///
/// Holds only immutable state, so one instance can serve concurrent callers
/// as long as the injected model is safe for concurrent inference.
pub struct IntentClassifier {
    config: ClassifierConfig,
    safety: Arc<SafetyRuleEngine>,
    normalization: Arc<NormalizationTable>,
    heuristic: HeuristicClassifier,
    model: Option<Arc<dyn StatisticalClassifier>>,
}

impl IntentClassifier {
    /// Rules-only classifier.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Classifier backed by a statistical model.
    pub fn with_model(config: ClassifierConfig, model: Arc<dyn StatisticalClassifier>) -> Result<Self> {
        Self::builder().config(config).model(model).build()
    }

    pub fn builder() -> IntentClassifierBuilder {
        IntentClassifierBuilder::default()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Decide with the configured `default_top_k`.
    pub fn predict(&self, text: &str) -> Prediction {
        self.decide(text, self.config.default_top_k)
    }

    /// Classify one utterance. Never fails; a `top_k` of 0 is treated as 1.
    pub fn decide(&self, text: &str, top_k: usize) -> Prediction {
        let k = top_k.max(1);

        if let Some(label) = self.safety.check(text) {
            return Prediction::safety_override(label);
        }

        let (choice, confidence, used_fallback, mut ranked_candidates) =
            match self.ranked_by_model(text, k) {
                Some(topk) => {
                    let top = topk.best();
                    let ranked = topk.into_candidates();
                    let score = clamp_confidence(top.confidence);
                    if score < self.config.confidence_threshold && self.config.use_rules_fallback {
                        tracing::info!(
                            model_label = %top.label,
                            "Low confidence ({:.2}), using rule-based fallback",
                            score
                        );
                        let (label, confidence) = self.heuristic.classify(text);
                        (Choice::Rule(label), confidence, true, ranked)
                    } else {
                        (Choice::Model(top.label), score, false, ranked)
                    }
                }
                None => {
                    let (label, confidence) = self.heuristic.classify(text);
                    let candidates = vec![RankedCandidate::from((label, confidence))];
                    (Choice::Rule(label), confidence, true, candidates)
                }
            };

        let (label, normalized_from) = match choice {
            Choice::Rule(label) => (label, None),
            Choice::Model(raw) => {
                let normalized = self.normalization.normalize(&raw);
                let label = IntentLabel::parse(&normalized.canonical);
                if label.is_unknown() {
                    tracing::warn!(raw = %raw, canonical = %normalized.canonical, "Unmapped intent label");
                }
                (label, normalized.original)
            }
        };

        ranked_candidates.truncate(k);
        for candidate in &mut ranked_candidates {
            candidate.confidence = clamp_confidence(candidate.confidence);
        }

        let prediction = Prediction {
            label,
            confidence: clamp_confidence(confidence),
            is_safety_critical: label.is_safety_critical(),
            used_fallback,
            normalized_from,
            ranked_candidates,
        };

        tracing::debug!(
            intent = %prediction.label,
            confidence = prediction.confidence,
            used_fallback = prediction.used_fallback,
            safety_critical = prediction.is_safety_critical,
            "Intent decided"
        );

        prediction
    }

    /// Model ranking, or `None` when there is no model or it has no answer.
    fn ranked_by_model(&self, text: &str, k: usize) -> Option<TopK> {
        let model = self.model.as_ref()?;
        let topk = model.predict_topk(text, k);
        if !topk.is_available() {
            tracing::debug!(model = model.name(), "Statistical classifier unavailable");
            return None;
        }
        Some(topk)
    }
}

/// Non-finite scores count as zero.
fn clamp_confidence(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Builder for [`IntentClassifier`]. Unset tables use the shared builtins.
#[derive(Default)]
pub struct IntentClassifierBuilder {
    config: ClassifierConfig,
    model: Option<Arc<dyn StatisticalClassifier>>,
    normalization: Option<Arc<NormalizationTable>>,
    safety: Option<Arc<SafetyRuleEngine>>,
}

impl IntentClassifierBuilder {
    pub fn config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(mut self, model: Arc<dyn StatisticalClassifier>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn normalization(mut self, table: Arc<NormalizationTable>) -> Self {
        self.normalization = Some(table);
        self
    }

    pub fn safety_rules(mut self, engine: Arc<SafetyRuleEngine>) -> Self {
        self.safety = Some(engine);
        self
    }

    pub fn build(self) -> Result<IntentClassifier> {
        self.config.validate()?;

        let model = match (self.model, self.config.adapter_timeout_ms) {
            (Some(model), Some(ms)) => Some(Arc::new(TimeBoundedClassifier::new(
                model,
                Duration::from_millis(ms),
            )?) as Arc<dyn StatisticalClassifier>),
            (model, _) => model,
        };

        tracing::info!(
            model = model.as_ref().map(|m| m.name()).unwrap_or("rules-only"),
            threshold = self.config.confidence_threshold,
            "Intent classifier initialized"
        );

        Ok(IntentClassifier {
            config: self.config,
            safety: self.safety.unwrap_or_else(SafetyRuleEngine::shared),
            normalization: self.normalization.unwrap_or_else(NormalizationTable::shared),
            heuristic: HeuristicClassifier::new(),
            model,
        })
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::MockClassifier;

    fn with_mock(scores: Vec<(&str, f32)>) -> IntentClassifier {
        IntentClassifier::with_model(ClassifierConfig::default(), Arc::new(MockClassifier::new(scores)))
            .unwrap()
    }

    #[test]
    fn test_rules_only_uses_heuristic() {
        let clf = IntentClassifier::new(ClassifierConfig::default()).unwrap();
        let p = clf.decide("tell me the news", 3);
        assert_eq!(p.label, IntentLabel::GetNews);
        assert!(p.used_fallback);
        assert_eq!(p.ranked_candidates, vec![RankedCandidate::new("get_news", 0.8)]);
    }

    #[test]
    fn test_confident_model_is_kept() {
        let clf = with_mock(vec![("find_object", 0.91), ("where_is", 0.05)]);
        let p = clf.decide("where did my keys go", 2);
        assert_eq!(p.label, IntentLabel::FindObject);
        assert_eq!(p.confidence, 0.91);
        assert!(!p.used_fallback);
        assert_eq!(p.ranked_candidates.len(), 2);
    }

    #[test]
    fn test_model_alias_is_normalized() {
        let clf = with_mock(vec![("Go_To", 0.95)]);
        let p = clf.decide("head to the kitchen", 1);
        assert_eq!(p.label, IntentLabel::NavigateTo);
        assert_eq!(p.normalized_from.as_deref(), Some("Go_To"));
        assert_eq!(p.ranked_candidates[0].label, "Go_To");
    }

    #[test]
    fn test_model_alias_can_land_on_safety_label() {
        let clf = with_mock(vec![("drop", 0.88)]);
        let p = clf.decide("put that cup down gently", 1);
        assert_eq!(p.label, IntentLabel::Release);
        assert!(p.is_safety_critical);
        assert!(!p.used_fallback);
    }

    #[test]
    fn test_fallback_disabled_keeps_low_confidence_model() {
        let config = ClassifierConfig {
            use_rules_fallback: false,
            ..Default::default()
        };
        let clf = IntentClassifier::with_model(
            config,
            Arc::new(MockClassifier::new(vec![("tell_joke", 0.3)])),
        )
        .unwrap();
        let p = clf.decide("hello there", 1);
        assert_eq!(p.label, IntentLabel::TellJoke);
        assert_eq!(p.confidence, 0.3);
        assert!(!p.used_fallback);
    }

    #[test]
    fn test_empty_model_matches_absent_model() {
        let with_empty =
            IntentClassifier::with_model(ClassifierConfig::default(), Arc::new(MockClassifier::empty()))
                .unwrap();
        let without = IntentClassifier::new(ClassifierConfig::default()).unwrap();
        for text in ["what time is it", "bring me a towel", "I'm feeling sad today"] {
            assert_eq!(with_empty.decide(text, 3), without.decide(text, 3));
        }
    }

    #[test]
    fn test_zero_top_k_is_one() {
        let clf = with_mock(vec![("greeting", 0.9), ("goodbye", 0.1)]);
        assert_eq!(clf.decide("hi", 0).ranked_candidates.len(), 1);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let clf = with_mock(vec![("greeting", 1.7)]);
        let p = clf.decide("hi", 1);
        assert_eq!(p.confidence, 1.0);
        assert_eq!(p.ranked_candidates[0].confidence, 1.0);

        let clf = with_mock(vec![("greeting", f32::NAN)]);
        let p = clf.decide("good evening", 1);
        assert!(p.used_fallback);
        assert_eq!(p.ranked_candidates[0].confidence, 0.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ClassifierConfig {
            confidence_threshold: -0.1,
            ..Default::default()
        };
        assert!(IntentClassifier::new(config).is_err());
    }

    #[test]
    fn test_timeout_wraps_model() {
        let config = ClassifierConfig {
            adapter_timeout_ms: Some(250),
            ..Default::default()
        };
        let clf = IntentClassifier::with_model(
            config,
            Arc::new(MockClassifier::new(vec![("status", 0.99)])),
        )
        .unwrap();
        assert!(clf.has_model());
        assert_eq!(clf.decide("how are your systems", 1).label, IntentLabel::Status);
    }
}
