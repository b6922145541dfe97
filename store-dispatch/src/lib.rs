//! store-dispatch: centralized state management with declarative effects
//!
//! Like Redux/Elm: all state mutations happen in a reducer, side effects are
//! returned as values and executed by a runtime that owns the async tasks.
//!
//! # Example
//! ```ignore
//! use store_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum Action {
//!     SearchQueryChange(String),
//!     SearchDidComplete(Vec<String>),
//! }
//! ```

// Re-export everything from core
pub use store_dispatch_core::*;

// Re-export derive macros
pub use store_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    pub use store_dispatch_core::prelude::*;

    // Derive macros
    pub use store_dispatch_macros::Action;
}
