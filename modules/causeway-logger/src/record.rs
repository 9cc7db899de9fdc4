//! Log record types. One dispatch cycle produces an ordered run of up to
//! four records; suppressed kinds are dropped by the formatter without
//! disturbing the order of the rest.

use serde::Serialize;

use causeway_common::Severity;

/// The four record kinds of a dispatch cycle, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    PrevState,
    Action,
    Error,
    NextState,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::PrevState => "prev_state",
            RecordKind::Action => "action",
            RecordKind::Error => "error",
            RecordKind::NextState => "next_state",
        }
    }
}

/// Emission decision for one record kind: write at a severity, or drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    At(Severity),
    Suppressed,
}

/// A single log record, self-contained so it can be held in the sequence
/// queue without borrowing its frame.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Sequence number of the owning dispatch frame.
    pub seq: u64,
    pub kind: RecordKind,
    pub emission: Emission,
    /// Type label of the action this dispatch cycle carries.
    pub action_type: String,
    pub payload: serde_json::Value,
}

impl LogRecord {
    pub fn new(
        seq: u64,
        kind: RecordKind,
        emission: Emission,
        action_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            seq,
            kind,
            emission,
            action_type: action_type.into(),
            payload,
        }
    }
}
