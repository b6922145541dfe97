//! Core traits and types for store-dispatch
//!
//! This crate provides the foundational abstractions for building
//! event-driven controllers with centralized state management, following a
//! Redux/Elm-inspired architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **EffectStore**: State container whose reducer returns declarative effects
//! - **TaskManager**: Keyed async tasks with cancellation scopes and debounce
//! - **EffectRuntime**: Loop that dispatches actions, runs effects and
//!   publishes state snapshots
//!
//! # Async Handler Pattern
//!
//! Async work uses a two-phase action pattern:
//!
//! 1. **Intent actions** make the reducer declare an effect (e.g. `SearchQueryDidDebounce`)
//! 2. **Result actions** carry the outcome back (e.g. `SearchDidComplete`)
//!
//! ```ignore
//! fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
//!     match effect {
//!         Effect::Search { query } => {
//!             let client = client.clone();
//!             ctx.tasks().spawn("location", async move {
//!                 Action::SearchDidComplete(client.search(&query).await)
//!             });
//!         }
//!     }
//! }
//! ```
//!
//! The `Did*` naming convention clearly identifies result actions. With
//! `#[action(infer_categories)]`, these are grouped with their intent
//! (e.g. `SearchResultSelect` and `SearchDidComplete`).

pub mod action;
pub mod effect;
#[cfg(feature = "tasks")]
pub mod runtime;
pub mod store;
#[cfg(feature = "tasks")]
pub mod tasks;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionCategory, ActionSummary};

// Store exports
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware};

// Effect exports
pub use effect::{
    DispatchResult, EffectReducer, EffectStore, EffectStoreLike, EffectStoreWithMiddleware,
};

// Task exports (requires "tasks" feature)
#[cfg(feature = "tasks")]
pub use runtime::{EffectContext, EffectRuntime};
#[cfg(feature = "tasks")]
pub use tasks::{TaskKey, TaskManager, TaskOutput};

// Testing exports
pub use testing::{EffectAssertions, EffectStoreTestHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory, ActionSummary};
    pub use crate::effect::{
        DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware,
    };
    #[cfg(feature = "tasks")]
    pub use crate::runtime::{EffectContext, EffectRuntime};
    pub use crate::store::{LoggingMiddleware, Middleware, NoopMiddleware};
    #[cfg(feature = "tasks")]
    pub use crate::tasks::{TaskKey, TaskManager};
}
