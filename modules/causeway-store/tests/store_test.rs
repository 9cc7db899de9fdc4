//! Integration tests for the store substrate: chain order, reducer
//! application, and synchronous re-entrant dispatch.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use causeway_store::{Dispatchable, Middleware, MiddlewareCtx, Reducer, Store};

// ---------------------------------------------------------------------------
// Test action type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum CounterAction {
    Add { amount: i64 },
    Note { label: String },
    Explode,
}

impl Dispatchable for CounterAction {
    fn action_type(&self) -> String {
        match self {
            CounterAction::Add { .. } => "counter:add".into(),
            CounterAction::Note { .. } => "counter:note".into(),
            CounterAction::Explode => "counter:explode".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Test state + reducer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct CounterState {
    total: i64,
    notes: Vec<String>,
}

struct CounterReducer;

impl Reducer<CounterAction, CounterState> for CounterReducer {
    fn reduce(&self, state: &mut CounterState, action: &CounterAction) {
        match action {
            CounterAction::Add { amount } => state.total += amount,
            CounterAction::Note { label } => state.notes.push(label.clone()),
            CounterAction::Explode => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tap middleware: records every action it sees, forwards unchanged
// ---------------------------------------------------------------------------

struct Tap {
    name: &'static str,
    seen: Arc<Mutex<Vec<String>>>,
}

impl Middleware<CounterAction, CounterState> for Tap {
    fn handle(
        &self,
        action: CounterAction,
        ctx: MiddlewareCtx<'_, CounterAction, CounterState>,
    ) -> Result<CounterAction> {
        self.seen
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, action.action_type()));
        ctx.next(action)
    }
}

// ---------------------------------------------------------------------------
// Follow-up middleware: every Add triggers a nested Note dispatch
// ---------------------------------------------------------------------------

struct FollowUp;

impl Middleware<CounterAction, CounterState> for FollowUp {
    fn handle(
        &self,
        action: CounterAction,
        ctx: MiddlewareCtx<'_, CounterAction, CounterState>,
    ) -> Result<CounterAction> {
        let is_add = matches!(action, CounterAction::Add { .. });
        let out = ctx.next(action)?;
        if is_add {
            ctx.dispatch(CounterAction::Note {
                label: "follow-up".into(),
            })?;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Failing middleware: rejects Explode before it reaches the reducer
// ---------------------------------------------------------------------------

struct Fuse;

impl Middleware<CounterAction, CounterState> for Fuse {
    fn handle(
        &self,
        action: CounterAction,
        ctx: MiddlewareCtx<'_, CounterAction, CounterState>,
    ) -> Result<CounterAction> {
        if matches!(action, CounterAction::Explode) {
            bail!("fuse blown");
        }
        ctx.next(action)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn reducer_applies_actions_in_dispatch_order() {
    let store = Store::builder(CounterState::default(), CounterReducer).build();

    store.dispatch(CounterAction::Add { amount: 2 }).unwrap();
    store.dispatch(CounterAction::Add { amount: 3 }).unwrap();
    store
        .dispatch(CounterAction::Note { label: "done".into() })
        .unwrap();

    let state = store.state();
    assert_eq!(state.total, 5);
    assert_eq!(state.notes, vec!["done"]);
}

#[test]
fn middlewares_run_in_registration_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let store = Store::builder(CounterState::default(), CounterReducer)
        .with_middleware(Tap {
            name: "outer",
            seen: seen.clone(),
        })
        .with_middleware(Tap {
            name: "inner",
            seen: seen.clone(),
        })
        .build();

    store.dispatch(CounterAction::Add { amount: 1 }).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["outer:counter:add", "inner:counter:add"]
    );
}

#[test]
fn dispatch_returns_the_action() {
    let store = Store::builder(CounterState::default(), CounterReducer).build();

    let returned = store.dispatch(CounterAction::Add { amount: 7 }).unwrap();
    assert_eq!(returned, CounterAction::Add { amount: 7 });
}

#[test]
fn state_reflects_reduction_when_next_returns() {
    // A middleware that checks the state transition across next().
    struct Probe {
        before: Arc<Mutex<Vec<i64>>>,
        after: Arc<Mutex<Vec<i64>>>,
    }

    impl Middleware<CounterAction, CounterState> for Probe {
        fn handle(
            &self,
            action: CounterAction,
            ctx: MiddlewareCtx<'_, CounterAction, CounterState>,
        ) -> Result<CounterAction> {
            self.before.lock().unwrap().push(ctx.state().total);
            let out = ctx.next(action)?;
            self.after.lock().unwrap().push(ctx.state().total);
            Ok(out)
        }
    }

    let before = Arc::new(Mutex::new(Vec::new()));
    let after = Arc::new(Mutex::new(Vec::new()));
    let store = Store::builder(CounterState::default(), CounterReducer)
        .with_middleware(Probe {
            before: before.clone(),
            after: after.clone(),
        })
        .build();

    store.dispatch(CounterAction::Add { amount: 4 }).unwrap();
    store.dispatch(CounterAction::Add { amount: 6 }).unwrap();

    assert_eq!(*before.lock().unwrap(), vec![0, 4]);
    assert_eq!(*after.lock().unwrap(), vec![4, 10]);
}

#[test]
fn reentrant_dispatch_completes_before_outer_returns() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let store = Store::builder(CounterState::default(), CounterReducer)
        .with_middleware(Tap {
            name: "tap",
            seen: seen.clone(),
        })
        .with_middleware(FollowUp)
        .build();

    store.dispatch(CounterAction::Add { amount: 1 }).unwrap();

    // The nested Note passed back through the full chain.
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["tap:counter:add", "tap:counter:note"]
    );

    let state = store.state();
    assert_eq!(state.total, 1);
    assert_eq!(state.notes, vec!["follow-up"]);
}

#[test]
fn middleware_error_propagates_and_skips_the_reducer() {
    let store = Store::builder(CounterState::default(), CounterReducer)
        .with_middleware(Fuse)
        .build();

    let err = store.dispatch(CounterAction::Explode).unwrap_err();
    assert_eq!(err.to_string(), "fuse blown");

    // A failed dispatch leaves state untouched; later dispatches work.
    store.dispatch(CounterAction::Add { amount: 9 }).unwrap();
    assert_eq!(store.state().total, 9);
}
