//! Demo: a toy task board wired with the causal action logger.
//!
//! Every `Added` action triggers a nested `Audited` dispatch from the
//! audit middleware, so the log output shows a nested record run landing
//! between its trigger's `action` and `next_state` records.
//!
//! Run with `RUST_LOG=causeway=debug` to see state snapshots too.

use anyhow::Result;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use causeway_common::LevelConfig;
use causeway_logger::ActionLogger;
use causeway_store::{Dispatchable, Middleware, MiddlewareCtx, Reducer, Store};

// ---------------------------------------------------------------------------
// Board domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BoardAction {
    Added { title: String },
    Completed { index: usize },
    Audited,
}

impl Dispatchable for BoardAction {
    fn action_type(&self) -> String {
        match self {
            BoardAction::Added { .. } => "board:added".into(),
            BoardAction::Completed { .. } => "board:completed".into(),
            BoardAction::Audited => "board:audited".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct BoardState {
    tasks: Vec<String>,
    done: Vec<usize>,
    audits: u32,
}

struct BoardReducer;

impl Reducer<BoardAction, BoardState> for BoardReducer {
    fn reduce(&self, state: &mut BoardState, action: &BoardAction) {
        match action {
            BoardAction::Added { title } => state.tasks.push(title.clone()),
            BoardAction::Completed { index } => state.done.push(*index),
            BoardAction::Audited => state.audits += 1,
        }
    }
}

/// Dispatches an `Audited` follow-up for every task added — a re-entrant
/// dispatch while the `Added` action is still in flight.
struct AuditTrail;

impl Middleware<BoardAction, BoardState> for AuditTrail {
    fn handle(
        &self,
        action: BoardAction,
        ctx: MiddlewareCtx<'_, BoardAction, BoardState>,
    ) -> Result<BoardAction> {
        let added = matches!(action, BoardAction::Added { .. });
        let out = ctx.next(action)?;
        if added {
            ctx.dispatch(BoardAction::Audited)?;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("causeway=info".parse()?))
        .init();

    info!("Causeway demo starting...");

    let logger = ActionLogger::with_tracing(LevelConfig::from_env())?;

    let store = Store::builder(BoardState::default(), BoardReducer)
        .with_middleware(logger)
        .with_middleware(AuditTrail)
        .build();

    store.dispatch(BoardAction::Added {
        title: "water the plants".into(),
    })?;
    store.dispatch(BoardAction::Added {
        title: "fix the gate".into(),
    })?;
    store.dispatch(BoardAction::Completed { index: 0 })?;

    let state = store.state();
    println!("\n=== Board ===");
    for (index, title) in state.tasks.iter().enumerate() {
        let mark = if state.done.contains(&index) { "x" } else { " " };
        println!("[{mark}] {title}");
    }
    println!("Audits recorded: {}", state.audits);

    Ok(())
}
