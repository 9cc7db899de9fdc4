//! The dispatch interceptor: a store middleware that logs every dispatch
//! cycle as an ordered record run.

use std::fmt::Debug;

use anyhow::Result;
use serde::Serialize;

use causeway_common::{CausewayError, LevelConfig};
use causeway_store::{Dispatchable, Middleware, MiddlewareCtx};

use crate::format::{to_payload, Formatter};
use crate::level::ResolvedLevels;
use crate::record::RecordKind;
use crate::sequence::CausalSequencer;
use crate::sink::{LogSink, TracingSink};

/// Diagnostic middleware. Install it ahead of any middleware whose
/// dispatches should be captured — re-entrant dispatches pass back
/// through it from the top of the chain.
///
/// Transparent to the store's error contract: callers of `dispatch`
/// observe exactly the same success or failure as without the logger
/// installed; the only addition is log output.
pub struct ActionLogger {
    levels: ResolvedLevels,
    sequencer: CausalSequencer,
}

impl ActionLogger {
    /// Build the middleware. Fails fast on an unknown severity name,
    /// before any dispatch occurs.
    pub fn new(config: LevelConfig, sink: impl LogSink + 'static) -> Result<Self, CausewayError> {
        Ok(Self {
            levels: ResolvedLevels::resolve(&config)?,
            sequencer: CausalSequencer::new(Formatter::new(sink)),
        })
    }

    /// Build against the `tracing` subscriber stack.
    pub fn with_tracing(config: LevelConfig) -> Result<Self, CausewayError> {
        Self::new(config, TracingSink)
    }
}

impl<A, S> Middleware<A, S> for ActionLogger
where
    A: Dispatchable + Serialize + Debug,
    S: Send + Clone + Serialize + Debug,
{
    fn handle(&self, action: A, ctx: MiddlewareCtx<'_, A, S>) -> Result<A> {
        // Entry: capture the state ahead of this action, open the frame.
        let prev = ctx.state();
        let frame = self.sequencer.open(action.action_type());

        self.sequencer.submit(frame.record(
            RecordKind::PrevState,
            self.levels.prev_state,
            to_payload(&prev),
        ));
        self.sequencer.submit(frame.record(
            RecordKind::Action,
            self.levels.action,
            to_payload(&action),
        ));

        // Downstream may re-enter the store any number of times; every
        // nested frame opens and fully emits before this call returns.
        let result = ctx.next(action);

        match &result {
            Ok(_) => {
                let next = ctx.state();
                self.sequencer.submit(frame.record(
                    RecordKind::NextState,
                    self.levels.next_state,
                    to_payload(&next),
                ));
            }
            Err(err) => {
                // Error record in place of next_state; the error itself
                // propagates to the dispatch caller unchanged.
                self.sequencer.submit(frame.record(
                    RecordKind::Error,
                    self.levels.error,
                    serde_json::Value::String(format!("{err:#}")),
                ));
            }
        }

        self.sequencer.close(&frame);
        result
    }
}
