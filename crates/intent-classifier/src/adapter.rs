//! Adapters that turn inference backends into a [`StatisticalClassifier`]
//!
//! The adapter boundary is where backend faults stop: everything below it may
//! fail, everything above it only ever sees a ranking or `Unavailable`.

use crate::{
    AdapterError, IntentLabel, LogitsBackend, RankedCandidate, Result, StatisticalClassifier, TopK,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Exponential normalization onto the probability simplex.
///
/// Subtracts the max before exponentiating for numerical stability.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Indices of the `k` highest scores, highest first. Ties keep index order.
pub fn rank_top_k(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}

/// Classifier over a [`LogitsBackend`] whose output index `i` corresponds to
/// `labels[i]`.
pub struct LogitsClassifier<B> {
    backend: B,
    labels: Vec<String>,
}

impl<B: LogitsBackend> LogitsClassifier<B> {
    /// Use the taxonomy's declaration order as the label vocabulary.
    pub fn new(backend: B) -> Self {
        let labels = IntentLabel::labels()
            .iter()
            .map(|l| l.as_str().to_string())
            .collect();
        Self { backend, labels }
    }

    /// Use a model-specific label vocabulary. Labels may be aliases; the
    /// orchestrator normalizes them.
    pub fn with_labels<I, S>(backend: B, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            backend,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn try_predict(
        &self,
        text: &str,
        k: usize,
    ) -> std::result::Result<Vec<RankedCandidate>, AdapterError> {
        let logits = panic::catch_unwind(AssertUnwindSafe(|| self.backend.logits(text)))
            .map_err(|payload| AdapterError::Backend(panic_message(payload.as_ref())))??;
        if logits.len() != self.labels.len() {
            return Err(AdapterError::Shape {
                expected: self.labels.len(),
                actual: logits.len(),
            });
        }
        if logits.iter().any(|x| !x.is_finite()) {
            return Err(AdapterError::Backend("non-finite logits".to_string()));
        }

        let probs = softmax(&logits);
        Ok(rank_top_k(&probs, k)
            .into_iter()
            .map(|(i, p)| RankedCandidate::new(self.labels[i].clone(), p))
            .collect())
    }
}

impl<B: LogitsBackend> StatisticalClassifier for LogitsClassifier<B> {
    fn predict_topk(&self, text: &str, k: usize) -> TopK {
        match self.try_predict(text, k) {
            Ok(candidates) => TopK::Ranked(candidates),
            Err(e) => {
                tracing::error!(backend = self.backend.name(), "Model inference error: {}", e);
                TopK::unavailable(e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        self.backend.name()
    }
}

/// Describe a caught panic for logs.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("inference panicked: {detail}")
}

struct InferenceJob {
    text: String,
    k: usize,
    deadline: Option<Instant>,
    reply: SyncSender<TopK>,
}

/// Bounds each inference call with a deadline.
///
/// Inference runs on one long-lived worker thread fed by a single-slot queue.
/// While the worker is busy and the slot is taken, further calls report
/// unavailable immediately instead of piling up behind a slow backend. Jobs
/// whose caller already gave up are skipped. The worker exits when the
/// classifier is dropped.
pub struct TimeBoundedClassifier {
    inner: Arc<dyn StatisticalClassifier>,
    jobs: SyncSender<InferenceJob>,
    timeout: Duration,
    timeout_ms: u64,
}

impl TimeBoundedClassifier {
    pub fn new(inner: Arc<dyn StatisticalClassifier>, timeout: Duration) -> Result<Self> {
        let (jobs, queue) = mpsc::sync_channel::<InferenceJob>(1);
        let worker = Arc::clone(&inner);

        std::thread::Builder::new()
            .name("intent-inference".to_string())
            .spawn(move || {
                for job in queue {
                    if job.deadline.is_some_and(|d| Instant::now() >= d) {
                        continue;
                    }
                    let topk = panic::catch_unwind(AssertUnwindSafe(|| {
                        worker.predict_topk(&job.text, job.k)
                    }))
                    .unwrap_or_else(|payload| {
                        let reason = panic_message(payload.as_ref());
                        tracing::error!(classifier = worker.name(), "{}", reason);
                        TopK::unavailable(reason)
                    });
                    let _ = job.reply.try_send(topk);
                }
            })?;

        Ok(Self {
            inner,
            jobs,
            timeout,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn run(&self, text: &str, k: usize) -> std::result::Result<TopK, AdapterError> {
        let (reply, answer) = mpsc::sync_channel(1);
        let job = InferenceJob {
            text: text.to_string(),
            k,
            deadline: Instant::now().checked_add(self.timeout),
            reply,
        };

        self.jobs.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => AdapterError::Busy,
            TrySendError::Disconnected(_) => AdapterError::Disconnected,
        })?;

        answer.recv_timeout(self.timeout).map_err(|e| match e {
            mpsc::RecvTimeoutError::Timeout => AdapterError::Timeout(self.timeout_ms),
            mpsc::RecvTimeoutError::Disconnected => AdapterError::Disconnected,
        })
    }
}

impl StatisticalClassifier for TimeBoundedClassifier {
    fn predict_topk(&self, text: &str, k: usize) -> TopK {
        match self.run(text, k) {
            Ok(topk) => topk,
            Err(e) => {
                tracing::error!(classifier = self.inner.name(), "Statistical classifier unavailable: {}", e);
                TopK::unavailable(e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
