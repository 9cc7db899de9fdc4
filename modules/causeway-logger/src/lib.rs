//! Causal diagnostic logging for a unidirectional store.
//!
//! `ActionLogger` intercepts every dispatch and emits a structured record
//! run — `prev_state`, `action`, `error`/`next_state` — in the exact
//! causal order actions were triggered. Actions dispatched re-entrantly
//! while an earlier dispatch is still in flight are logged as a
//! contiguous, correctly nested sequence: a trigger's records land before
//! its parent's `next_state`, and independent dispatches never interleave.
//!
//! Ordering is enforced by the `CausalSequencer`; severity per record
//! kind comes from `LevelConfig` and resolves once at construction.

pub mod format;
pub mod level;
pub mod middleware;
pub mod record;
pub mod sequence;
pub mod sink;

pub use format::Formatter;
pub use level::ResolvedLevels;
pub use middleware::ActionLogger;
pub use record::{Emission, LogRecord, RecordKind};
pub use sequence::{CausalSequencer, DispatchFrame};
pub use sink::{LogLine, LogSink, MemorySink, TracingSink};
