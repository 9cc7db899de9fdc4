//! Core traits for the store substrate.

use anyhow::Result;

use crate::store::MiddlewareCtx;

/// Actions carry a discriminating type label; otherwise their shape is
/// opaque to the store.
pub trait Dispatchable: Clone + Send + Sync + 'static {
    /// The action's type label, used for logging and diagnostics.
    fn action_type(&self) -> String;
}

/// Pure state updates. No I/O, no side effects.
///
/// Called exactly once per dispatch, after every middleware has forwarded
/// the action. Use for counters, accumulators, and other state derived
/// from the action stream.
pub trait Reducer<A: Dispatchable, S: Send>: Send + Sync {
    fn reduce(&self, state: &mut S, action: &A);
}

/// An interceptor in the dispatch chain.
///
/// `handle` receives the action plus a context scoped to this link of the
/// chain. Forwarding via `ctx.next(action)` is the middleware's choice;
/// dropping the call swallows the action. `ctx.dispatch(action)` re-enters
/// the store from the top while this dispatch is still in flight; the
/// nested call runs to completion before it returns.
pub trait Middleware<A: Dispatchable, S: Send>: Send + Sync {
    fn handle(&self, action: A, ctx: MiddlewareCtx<'_, A, S>) -> Result<A>;
}
