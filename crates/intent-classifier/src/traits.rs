use crate::{AdapterError, IntentLabel, RankedCandidate};

/// Output of a statistical classifier call.
#[derive(Debug, Clone, PartialEq)]
pub enum TopK {
    /// Candidates ordered by descending score.
    Ranked(Vec<RankedCandidate>),
    /// No model, or the model failed. Carries a reason for logging.
    Unavailable(String),
}

impl TopK {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        TopK::Unavailable(reason.into())
    }

    /// An empty ranking counts as unavailable.
    pub fn is_available(&self) -> bool {
        matches!(self, TopK::Ranked(c) if !c.is_empty())
    }

    /// Top candidate, or `unknown` at confidence 0 when unavailable.
    pub fn best(&self) -> RankedCandidate {
        match self {
            TopK::Ranked(c) if !c.is_empty() => c[0].clone(),
            _ => RankedCandidate::from((IntentLabel::Unknown, 0.0)),
        }
    }

    pub fn into_candidates(self) -> Vec<RankedCandidate> {
        match self {
            TopK::Ranked(c) => c,
            TopK::Unavailable(_) => Vec::new(),
        }
    }
}

/// A ranked statistical intent classifier, injected into the orchestrator.
///
/// Implementations must not panic or return errors: any internal fault is
/// reported as [`TopK::Unavailable`]. Scores should form a probability
/// distribution so the confidence threshold is meaningful.
pub trait StatisticalClassifier: Send + Sync {
    /// At most `k` candidates, highest score first.
    fn predict_topk(&self, text: &str, k: usize) -> TopK;

    fn name(&self) -> &str {
        "statistical"
    }
}

/// Raw inference backend producing one logit per label.
///
/// Wrap it in [`crate::LogitsClassifier`] to get a [`StatisticalClassifier`].
pub trait LogitsBackend: Send + Sync {
    fn logits(&self, text: &str) -> Result<Vec<f32>, AdapterError>;

    fn name(&self) -> &str {
        "logits"
    }
}
