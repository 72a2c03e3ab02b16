use thiserror::Error;

pub type Result<T, E = ClassifierError> = core::result::Result<T, E>;

/// Construction-time failures. Classification itself never fails.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid safety pattern for {label}: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Faults raised inside a statistical backend.
///
/// These never reach the orchestrator: the adapter layer logs them and
/// reports the model as unavailable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdapterError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("output shape mismatch: expected {expected} scores, got {actual}")]
    Shape { expected: usize, actual: usize },
    #[error("inference timed out after {0} ms")]
    Timeout(u64),
    #[error("inference worker busy with an earlier request")]
    Busy,
    #[error("inference worker disconnected")]
    Disconnected,
}
