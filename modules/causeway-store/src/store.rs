//! The store: owned state, a reducer, and an ordered middleware chain.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::traits::{Dispatchable, Middleware, Reducer};

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Single source of truth for one state value. Dispatch is synchronous:
/// every call runs the full chain and the reducer before returning.
///
/// Re-entrancy is supported — a middleware may dispatch again while the
/// current dispatch is on the stack. The state lock is only held while the
/// reducer runs or a snapshot is taken, never across a chain call, so
/// nested dispatches cannot deadlock.
pub struct Store<A: Dispatchable, S: Send> {
    state: Mutex<S>,
    reducer: Box<dyn Reducer<A, S>>,
    chain: Vec<Arc<dyn Middleware<A, S>>>,
}

impl<A: Dispatchable, S: Send> Store<A, S> {
    pub fn builder(initial: S, reducer: impl Reducer<A, S> + 'static) -> StoreBuilder<A, S> {
        StoreBuilder {
            initial,
            reducer: Box::new(reducer),
            chain: Vec::new(),
        }
    }

    /// Dispatch an action through the middleware chain and the reducer.
    /// Returns the action as it reached the end of the chain, or the first
    /// error a middleware produced.
    pub fn dispatch(&self, action: A) -> Result<A> {
        self.dispatch_from(0, action)
    }

    /// Run the chain from `index`. Past the last middleware, apply the
    /// reducer — the core state-update step.
    pub(crate) fn dispatch_from(&self, index: usize, action: A) -> Result<A> {
        match self.chain.get(index) {
            Some(middleware) => middleware.handle(
                action,
                MiddlewareCtx {
                    store: self,
                    index,
                },
            ),
            None => {
                let mut state = self.state.lock().unwrap();
                self.reducer.reduce(&mut state, &action);
                Ok(action)
            }
        }
    }
}

impl<A: Dispatchable, S: Send + Clone> Store<A, S> {
    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        self.state.lock().unwrap().clone()
    }
}

// ---------------------------------------------------------------------------
// StoreBuilder
// ---------------------------------------------------------------------------

/// Assembles the middleware chain. Middlewares run in registration order;
/// the reducer always runs last.
pub struct StoreBuilder<A: Dispatchable, S: Send> {
    initial: S,
    reducer: Box<dyn Reducer<A, S>>,
    chain: Vec<Arc<dyn Middleware<A, S>>>,
}

impl<A: Dispatchable, S: Send> StoreBuilder<A, S> {
    pub fn with_middleware(mut self, middleware: impl Middleware<A, S> + 'static) -> Self {
        self.chain.push(Arc::new(middleware));
        self
    }

    /// Register an already-shared middleware (for callers that keep a
    /// handle to it, e.g. to read captured output after dispatching).
    pub fn with_shared_middleware(mut self, middleware: Arc<dyn Middleware<A, S>>) -> Self {
        self.chain.push(middleware);
        self
    }

    pub fn build(self) -> Store<A, S> {
        Store {
            state: Mutex::new(self.initial),
            reducer: self.reducer,
            chain: self.chain,
        }
    }
}

// ---------------------------------------------------------------------------
// MiddlewareCtx
// ---------------------------------------------------------------------------

/// Context handed to one middleware for one dispatch. Scoped to the
/// middleware's position in the chain.
pub struct MiddlewareCtx<'a, A: Dispatchable, S: Send> {
    store: &'a Store<A, S>,
    index: usize,
}

impl<'a, A: Dispatchable, S: Send> MiddlewareCtx<'a, A, S> {
    /// Forward the action to the rest of the chain (and ultimately the
    /// reducer). Returns once every downstream step has completed.
    pub fn next(&self, action: A) -> Result<A> {
        self.store.dispatch_from(self.index + 1, action)
    }

    /// Re-enter the store from the top of the chain. The nested dispatch,
    /// including everything it triggers in turn, runs to completion
    /// before this call returns.
    pub fn dispatch(&self, action: A) -> Result<A> {
        self.store.dispatch(action)
    }
}

impl<'a, A: Dispatchable, S: Send + Clone> MiddlewareCtx<'a, A, S> {
    /// Snapshot of the current state. Callable both before and after
    /// `next` to observe the state transition.
    pub fn state(&self) -> S {
        self.store.state()
    }
}
