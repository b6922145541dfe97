//! Middleware hooks around reducer dispatch

use crate::action::{Action, ActionCategory, ActionSummary};

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging, auditing, or other
/// cross-cutting concerns to your store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
///
/// Action names and categories go out at `debug`, so `RUST_LOG` output can
/// be grepped per category. The full [`ActionSummary`] is only rendered when
/// `trace` is enabled.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

/// Category field value for log lines.
fn category_label<A: ActionCategory>(action: &A) -> &'static str {
    action.category().unwrap_or("uncategorized")
}

impl<A: ActionSummary + ActionCategory> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(
                action = %action.name(),
                category = category_label(action),
                "Dispatching action"
            );
            if tracing::enabled!(tracing::Level::TRACE) {
                tracing::trace!(summary = %action.summary(), "Action payload");
            }
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                category = category_label(action),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}
