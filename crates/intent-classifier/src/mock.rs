//! Scripted statistical classifier for development and testing

use crate::{RankedCandidate, StatisticalClassifier, TopK};
use std::time::Duration;

/// Returns the same ranking for every utterance.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    candidates: Vec<RankedCandidate>,
    delay: Option<Duration>,
}

impl MockClassifier {
    /// Scores are sorted descending; they are not renormalized.
    pub fn new<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let mut candidates: Vec<RankedCandidate> = scores
            .into_iter()
            .map(|(label, score)| RankedCandidate::new(label, score))
            .collect();
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Self {
            candidates,
            delay: None,
        }
    }

    /// A model that never has an answer.
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            delay: None,
        }
    }

    /// Sleep before answering, to simulate slow inference.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl StatisticalClassifier for MockClassifier {
    fn predict_topk(&self, _text: &str, k: usize) -> TopK {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        TopK::Ranked(self.candidates.iter().take(k).cloned().collect())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
