use thiserror::Error;

/// A fault raised while processing a single character of the input.
///
/// Faults never abort a scan: the scanner reports them to a [`FaultSink`]
/// and moves on to the next character, so callers always get a best-effort
/// processed statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("character {position}: {message}")]
pub struct ScanFault {
    /// Character index (not byte offset) into the scanned text.
    pub position: usize,
    pub message: &'static str,
}

/// Receiver for per-character scan faults.
///
/// Invoked zero or more times during a scan, purely as a side effect; the
/// scanner never consults it for control flow.
pub trait FaultSink {
    fn report(&self, context: &str, fault: &ScanFault);
}

/// Default sink: forwards faults to the active tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFaultSink;

impl FaultSink for LogFaultSink {
    fn report(&self, context: &str, fault: &ScanFault) {
        tracing::warn!("{context}: {fault}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// No distinct parameter carries this name.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),
}

pub type BindResult<T> = Result<T, BindError>;

/// Failures while loading a variables catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read variables catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed variables catalog: {0}")]
    Json(#[from] serde_json::Error),
}
