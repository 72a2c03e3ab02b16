//! Deterministic safety rules evaluated before any classification

use crate::{ClassifierError, IntentLabel, Result};
use regex::Regex;
use std::sync::{Arc, OnceLock};

const EMERGENCY_STOP_PATTERNS: &[&str] = &[
    r"\b(stop|halt|freeze|emergency)\b",
    r"\b(e-?stop|estop)\b",
];

const RELEASE_PATTERNS: &[&str] = &[r"\b(drop|release|let go)\b.*\b(now|immediately|right now)\b"];

/// One safety rule: a label and the patterns that trigger it.
#[derive(Debug, Clone)]
pub struct SafetyRule {
    label: IntentLabel,
    patterns: Vec<Regex>,
}

impl SafetyRule {
    /// Compile a rule. Patterns are matched against lowercased text and `.`
    /// spans line breaks.
    pub fn new<S: AsRef<str>>(label: IntentLabel, patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("(?s){}", p.as_ref())).map_err(|source| {
                    ClassifierError::InvalidPattern {
                        label: label.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { label, patterns })
    }

    pub fn label(&self) -> IntentLabel {
        self.label
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|r| r.as_str())
    }

    fn first_match(&self, text_lower: &str) -> Option<&Regex> {
        self.patterns.iter().find(|r| r.is_match(text_lower))
    }
}

/// Ordered rule set. The first rule with any matching pattern wins.
#[derive(Debug, Clone)]
pub struct SafetyRuleEngine {
    rules: Vec<SafetyRule>,
}

impl SafetyRuleEngine {
    pub fn new(rules: Vec<SafetyRule>) -> Self {
        Self { rules }
    }

    /// Process-wide instance of the builtin rules.
    pub fn shared() -> Arc<SafetyRuleEngine> {
        static SHARED: OnceLock<Arc<SafetyRuleEngine>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(SafetyRuleEngine::new(builtin_rules().to_vec())))
            .clone()
    }

    /// Label of the first rule matching `text`, in declaration order.
    pub fn check(&self, text: &str) -> Option<IntentLabel> {
        let text_lower = text.to_lowercase();
        for rule in &self.rules {
            if let Some(pattern) = rule.first_match(&text_lower) {
                tracing::warn!(
                    intent = %rule.label,
                    pattern = pattern.as_str(),
                    "Safety-critical intent detected"
                );
                return Some(rule.label);
            }
        }
        None
    }

    pub fn rules(&self) -> &[SafetyRule] {
        &self.rules
    }
}

impl Default for SafetyRuleEngine {
    fn default() -> Self {
        Self::new(builtin_rules().to_vec())
    }
}

/// Emergency stop first, then immediate release.
#[allow(clippy::expect_used)]
pub fn builtin_rules() -> &'static [SafetyRule] {
    static RULES: OnceLock<Vec<SafetyRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            SafetyRule::new(IntentLabel::EmergencyStop, EMERGENCY_STOP_PATTERNS)
                .expect("Invalid builtin safety pattern - this is a bug"),
            SafetyRule::new(IntentLabel::Release, RELEASE_PATTERNS)
                .expect("Invalid builtin safety pattern - this is a bug"),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_stop_words() {
        let engine = SafetyRuleEngine::default();
        for text in [
            "STOP RIGHT NOW",
            "please halt",
            "Freeze!",
            "this is an emergency",
            "hit the e-stop",
            "ESTOP",
            "estop now",
        ] {
            assert_eq!(engine.check(text), Some(IntentLabel::EmergencyStop), "{text}");
        }
    }

    #[test]
    fn test_whole_words_only() {
        let engine = SafetyRuleEngine::default();
        assert_eq!(engine.check("the bus stops here"), None);
        assert_eq!(engine.check("unstoppable"), None);
        assert_eq!(engine.check("freezer is full"), None);
    }

    #[test]
    fn test_release_needs_immediacy() {
        let engine = SafetyRuleEngine::default();
        assert_eq!(engine.check("drop it immediately"), Some(IntentLabel::Release));
        assert_eq!(engine.check("Let go of the cup right now"), Some(IntentLabel::Release));
        assert_eq!(engine.check("release the ball now"), Some(IntentLabel::Release));
        assert_eq!(engine.check("drop the ball in the box"), None);
        assert_eq!(engine.check("now drop it"), None);
    }

    #[test]
    fn test_declaration_order_wins() {
        let engine = SafetyRuleEngine::default();
        assert_eq!(engine.check("stop and drop it now"), Some(IntentLabel::EmergencyStop));
    }

    #[test]
    fn test_release_across_lines() {
        let engine = SafetyRuleEngine::default();
        assert_eq!(engine.check("drop it\nnow"), Some(IntentLabel::Release));
    }

    #[test]
    fn test_custom_rules() {
        let rule = SafetyRule::new(IntentLabel::StopMoving, &[r"\bwait\b"]).unwrap();
        let engine = SafetyRuleEngine::new(vec![rule]);
        assert_eq!(engine.check("WAIT there"), Some(IntentLabel::StopMoving));
        assert_eq!(engine.check("stop"), None);
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let err = SafetyRule::new(IntentLabel::StopMoving, &["(unclosed"]).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidPattern { .. }));
    }
}
