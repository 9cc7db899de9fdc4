//! Unidirectional-data-flow store substrate.
//!
//! Provides the dispatch entry point and a composable middleware chain:
//! `dispatch(action)` runs every middleware in registration order, ending
//! at the reducer. Each middleware receives a context that can forward to
//! the rest of the chain (`next`) or re-enter the store from the top
//! (`dispatch`), synchronously, while the current dispatch is still on the
//! stack.
//!
//! Consumers define their domain by implementing `Reducer` (pure state
//! updates) and `Middleware` (interceptors that observe, replace, or
//! trigger further actions).

pub mod store;
pub mod traits;

pub use store::{MiddlewareCtx, Store, StoreBuilder};
pub use traits::{Dispatchable, Middleware, Reducer};
