//! Keyword-based fallback classifier
//!
//! Deterministic and dependency-free, so it is always available as the floor
//! of the decision pipeline.

use crate::IntentLabel;

/// Result when no check matches: treat the utterance as conversation.
pub const DEFAULT_LABEL: IntentLabel = IntentLabel::SmallTalk;
pub const DEFAULT_CONFIDENCE: f32 = 0.5;

/// One ordered check: any keyword found in the text maps to
/// `label` with a fixed confidence.
#[derive(Debug, Clone, Copy)]
pub struct KeywordCheck {
    pub label: IntentLabel,
    pub confidence: f32,
    pub keywords: &'static [&'static str],
}

const BUILTIN_CHECKS: &[KeywordCheck] = &[
    KeywordCheck {
        label: IntentLabel::Greeting,
        confidence: 0.9,
        keywords: &["hello", "hi", "hey", "greetings"],
    },
    KeywordCheck {
        label: IntentLabel::Goodbye,
        confidence: 0.9,
        keywords: &["bye", "goodbye", "see you", "later"],
    },
    KeywordCheck {
        label: IntentLabel::HowAreYou,
        confidence: 0.9,
        keywords: &["how are you"],
    },
    KeywordCheck {
        label: IntentLabel::FetchObject,
        confidence: 0.7,
        keywords: &["bring", "get", "fetch"],
    },
    KeywordCheck {
        label: IntentLabel::GetWeather,
        confidence: 0.8,
        keywords: &["weather", "forecast"],
    },
    KeywordCheck {
        label: IntentLabel::GetNews,
        confidence: 0.8,
        keywords: &["news", "headlines"],
    },
    KeywordCheck {
        label: IntentLabel::TellTime,
        confidence: 0.8,
        keywords: &["time", "clock"],
    },
    KeywordCheck {
        label: IntentLabel::Help,
        confidence: 0.85,
        keywords: &["help", "what can you do"],
    },
];

/// First-match keyword classifier.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    checks: &'static [KeywordCheck],
}

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self {
            checks: BUILTIN_CHECKS,
        }
    }

    /// Classify `text`. Never fails; unmatched text is small talk.
    ///
    /// Keywords match as substrings of the lowercased text, so "bringing"
    /// counts as "bring" and "this" counts as "hi".
    pub fn classify(&self, text: &str) -> (IntentLabel, f32) {
        let lower = text.to_lowercase();

        for check in self.checks {
            if check.keywords.iter().any(|&keyword| lower.contains(keyword)) {
                return (check.label, check.confidence);
            }
        }

        (DEFAULT_LABEL, DEFAULT_CONFIDENCE)
    }

    pub fn checks(&self) -> &[KeywordCheck] {
        self.checks
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> (IntentLabel, f32) {
        HeuristicClassifier::new().classify(text)
    }

    #[test]
    fn test_observed_constants() {
        assert_eq!(classify("hey robot"), (IntentLabel::Greeting, 0.9));
        assert_eq!(classify("ok, see you tomorrow"), (IntentLabel::Goodbye, 0.9));
        assert_eq!(classify("how are you doing"), (IntentLabel::HowAreYou, 0.9));
        assert_eq!(classify("Fetch the red ball"), (IntentLabel::FetchObject, 0.7));
        assert_eq!(classify("What's the weather like today?"), (IntentLabel::GetWeather, 0.8));
        assert_eq!(classify("Tell me the latest news"), (IntentLabel::GetNews, 0.8));
        assert_eq!(classify("What time is it?"), (IntentLabel::TellTime, 0.8));
        assert_eq!(classify("Help me understand what you can do"), (IntentLabel::Help, 0.85));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(classify("Hello! How are you?"), (IntentLabel::Greeting, 0.9));
        assert_eq!(classify("can you get me the forecast"), (IntentLabel::FetchObject, 0.7));
    }

    #[test]
    fn test_default_is_small_talk() {
        assert_eq!(classify("I'm feeling sad today"), (DEFAULT_LABEL, DEFAULT_CONFIDENCE));
        assert_eq!(classify(""), (IntentLabel::SmallTalk, 0.5));
    }

    #[test]
    fn test_keywords_match_inside_words() {
        assert_eq!(classify("Bringing me water please"), (IntentLabel::FetchObject, 0.7));
        assert_eq!(classify("any weather's update"), (IntentLabel::GetWeather, 0.8));
        assert_eq!(classify("forecasting rain?"), (IntentLabel::GetWeather, 0.8));
        assert_eq!(classify("What times work?"), (IntentLabel::TellTime, 0.8));
        // "this" contains "hi"
        assert_eq!(classify("this is odd"), (IntentLabel::Greeting, 0.9));
    }
}
