//! The ordering engine.
//!
//! Every dispatch opens a frame here; every record passes through the
//! ordering gate; every frame closes when its dispatch returns. Because
//! dispatch is synchronous and single-threaded, natural call-stack order
//! already nests record runs correctly — a nested dispatch's entire run
//! lands between its trigger's `action` and `next_state` records. The
//! gate's hold queue only fills if a host ever emits from a frame that is
//! not the innermost open one (asynchronous re-entrancy); held records
//! flush in arrival order as frames close.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::format::Formatter;
use crate::record::{Emission, LogRecord, RecordKind};

// ---------------------------------------------------------------------------
// DispatchFrame
// ---------------------------------------------------------------------------

/// One in-flight dispatch call, registered with the sequencer at entry.
#[derive(Debug)]
pub struct DispatchFrame {
    /// Ordinal sequence number, assigned at entry, never reused.
    pub seq: u64,
    /// Nesting depth relative to the call that entered from outside (1 =
    /// outermost).
    pub depth: usize,
    /// Type label of the action this frame carries.
    pub action_type: String,
}

impl DispatchFrame {
    /// Build a record belonging to this frame.
    pub fn record(
        &self,
        kind: RecordKind,
        emission: Emission,
        payload: serde_json::Value,
    ) -> LogRecord {
        LogRecord::new(self.seq, kind, emission, &self.action_type, payload)
    }
}

// ---------------------------------------------------------------------------
// CausalSequencer
// ---------------------------------------------------------------------------

#[derive(Default)]
struct GateState {
    /// Open frames, innermost last. Mirrors the dispatch call stack.
    open: Vec<u64>,
    /// The sequence queue: records held back by the gate, arrival order.
    held: VecDeque<LogRecord>,
}

/// Tracks re-entrancy depth and forces causally-correct emission order.
pub struct CausalSequencer {
    next_seq: AtomicU64,
    formatter: Formatter,
    gate: Mutex<GateState>,
}

impl CausalSequencer {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            next_seq: AtomicU64::new(1),
            formatter,
            gate: Mutex::new(GateState::default()),
        }
    }

    /// Open a frame for a dispatch that just entered the interceptor.
    /// Assigns the next sequence number; depth is the number of frames now
    /// on the stack.
    pub fn open(&self, action_type: impl Into<String>) -> DispatchFrame {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.lock().unwrap();
        gate.open.push(seq);
        DispatchFrame {
            seq,
            depth: gate.open.len(),
            action_type: action_type.into(),
        }
    }

    /// The ordering gate. A record from the innermost open frame (the
    /// only case under synchronous re-entrancy) is written immediately;
    /// anything else is held until frames close.
    pub fn submit(&self, record: LogRecord) {
        let mut gate = self.gate.lock().unwrap();
        if must_hold(&gate.open, record.seq) {
            gate.held.push_back(record);
        } else {
            self.formatter.write(&record);
        }
    }

    /// Close a frame; its dispatch has returned. Flushes any held records
    /// that are no longer blocked, in arrival order.
    pub fn close(&self, frame: &DispatchFrame) {
        let mut gate = self.gate.lock().unwrap();
        if let Some(pos) = gate.open.iter().rposition(|&seq| seq == frame.seq) {
            gate.open.remove(pos);
        }

        while let Some(head) = gate.held.front() {
            if must_hold(&gate.open, head.seq) {
                break;
            }
            let record = gate.held.pop_front().unwrap();
            self.formatter.write(&record);
        }
    }
}

/// A record is held only while its frame is open but not innermost.
/// Records of the innermost frame, or of frames that already closed,
/// emit in arrival order.
fn must_hold(open: &[u64], seq: u64) -> bool {
    open.contains(&seq) && open.last() != Some(&seq)
}
