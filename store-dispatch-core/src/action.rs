//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: For async dispatch across tasks
///
/// Use `#[derive(Action)]` from `store-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Category information generated by `#[action(infer_categories)]`
pub trait ActionCategory: Action {
    /// Generated category enum
    type Category: Copy + Debug + Eq;

    /// Category name, `None` for uncategorized actions
    fn category(&self) -> Option<&'static str>;

    /// Category as enum value
    fn category_enum(&self) -> Self::Category;
}

/// Short, log-friendly description of an action.
///
/// Data-heavy actions (API responses) should override this so logs stay
/// readable. The default falls back to `Debug`.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
