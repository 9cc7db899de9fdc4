//! Log sinks: the single ordered write interface everything funnels into.
//!
//! A sink performs one synchronous, externally-visible write per call, in
//! call order. Any append-only target works behind this trait without
//! touching the sequencing logic.

use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, trace, warn};

use causeway_common::Severity;

/// One ordered, synchronous write per record.
pub trait LogSink: Send + Sync {
    fn write(&self, severity: Severity, label: &str, payload: &serde_json::Value);
}

// ---------------------------------------------------------------------------
// TracingSink (production — routes to the tracing subscriber)
// ---------------------------------------------------------------------------

/// Writes each record as a `tracing` event at the matching level.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, label: &str, payload: &serde_json::Value) {
        match severity {
            Severity::Trace => trace!(target: "causeway", payload = %payload, "{label}"),
            Severity::Debug => debug!(target: "causeway", payload = %payload, "{label}"),
            Severity::Info => info!(target: "causeway", payload = %payload, "{label}"),
            Severity::Warn => warn!(target: "causeway", payload = %payload, "{label}"),
            Severity::Error => error!(target: "causeway", payload = %payload, "{label}"),
        }
    }
}

// ---------------------------------------------------------------------------
// MemorySink (tests — capture lines for assertions)
// ---------------------------------------------------------------------------

/// A line as captured by `MemorySink`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub severity: Severity,
    pub label: String,
    pub payload: serde_json::Value,
}

/// In-memory sink for testing. Thread-safe.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<LogLine>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read all captured lines (for test assertions).
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap().clone()
    }

    /// Just the labels, in write order.
    pub fn labels(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.label.clone())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, severity: Severity, label: &str, payload: &serde_json::Value) {
        self.lines.lock().unwrap().push(LogLine {
            severity,
            label: label.to_string(),
            payload: payload.clone(),
        });
    }
}

// ---------------------------------------------------------------------------
// Arc<T> blanket — lets tests share the sink for assertions
// ---------------------------------------------------------------------------

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn write(&self, severity: Severity, label: &str, payload: &serde_json::Value) {
        (**self).write(severity, label, payload)
    }
}
