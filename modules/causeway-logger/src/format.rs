//! Record formatting: one sink write per non-suppressed record, in the
//! order invoked. Ordering is the sequencer's job; this component never
//! reorders anything.

use std::fmt::Debug;

use serde::Serialize;

use crate::record::{Emission, LogRecord};
use crate::sink::LogSink;

pub struct Formatter {
    sink: Box<dyn LogSink>,
}

impl Formatter {
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Write one record, or nothing if its kind is suppressed.
    pub fn write(&self, record: &LogRecord) {
        let severity = match record.emission {
            Emission::At(severity) => severity,
            Emission::Suppressed => return,
        };

        let label = format!("{} {}", record.kind.label(), record.action_type);
        self.sink.write(severity, &label, &record.payload);
    }
}

/// Best-effort JSON conversion. A value that cannot serialize (say, a map
/// with non-string keys) degrades to its `Debug` rendering instead of
/// failing the dispatch.
pub fn to_payload<T: Serialize + Debug>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|_| serde_json::Value::String(format!("{value:?}")))
}
