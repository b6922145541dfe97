//! Test utilities for store-dispatch applications
//!
//! - [`EffectStoreTestHarness`]: drives an effect reducer synchronously,
//!   collects the effects it declares and feeds simulated async completions
//!   back in
//! - Assertion macros for verifying emitted actions and effects
//!
//! # Example
//!
//! ```ignore
//! use store_dispatch::testing::EffectStoreTestHarness;
//!
//! let mut harness = EffectStoreTestHarness::new(SearchState::default(), reducer);
//!
//! harness.dispatch_collect(Action::SearchQueryChange("kyiv".into()));
//! harness.dispatch_collect(Action::SearchQueryDidDebounce);
//! let effects = harness.drain_effects();
//! assert_eq!(effects.len(), 1);
//!
//! // Simulate the search task finishing
//! harness.complete_action(Action::SearchDidComplete(Ok(response)));
//! harness.process_emitted();
//! harness.assert_state(|s| s.results.len() == 3);
//! ```

use std::fmt::Debug;

use tokio::sync::mpsc;

use crate::effect::{EffectReducer, EffectStore};
use crate::Action;

/// Test harness around an [`EffectStore`].
///
/// Effects returned by the reducer are accumulated instead of executed, and
/// "completed" actions are queued on a channel the way finished tasks would
/// queue them, so tests can interleave dispatches and completions in any
/// order.
pub struct EffectStoreTestHarness<S, A: Action, E> {
    store: EffectStore<S, A, E>,
    effects: Vec<E>,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action, E> EffectStoreTestHarness<S, A, E> {
    /// Create a harness with initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store: EffectStore::new(state, reducer),
            effects: Vec::new(),
            tx,
            rx,
        }
    }

    /// Dispatch an action, keeping its effects for later inspection.
    ///
    /// Returns whether the state changed.
    pub fn dispatch_collect(&mut self, action: A) -> bool {
        let result = self.store.dispatch(action);
        self.effects.extend(result.effects);
        result.changed
    }

    /// Take all effects collected so far.
    pub fn drain_effects(&mut self) -> Vec<E> {
        std::mem::take(&mut self.effects)
    }

    /// Queue an action as if an async task had finished with it.
    pub fn complete_action(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Clone the completion sender (for handing to fake clients).
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Dispatch every queued completion.
    ///
    /// Returns `(changed, total)`: how many dispatches changed state and how
    /// many were processed.
    pub fn process_emitted(&mut self) -> (usize, usize) {
        let mut changed = 0;
        let mut total = 0;
        while let Ok(action) = self.rx.try_recv() {
            if self.dispatch_collect(action) {
                changed += 1;
            }
            total += 1;
        }
        (changed, total)
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Mutable state access for seeding fixtures.
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    /// Assert a predicate over the current state.
    #[track_caller]
    pub fn assert_state<F>(&self, predicate: F)
    where
        F: FnOnce(&S) -> bool,
        S: Debug,
    {
        assert!(
            predicate(self.store.state()),
            "State assertion failed, state: {:#?}",
            self.store.state()
        );
    }
}

/// Fluent assertions over a list of emitted effects or actions.
pub trait EffectAssertions<E> {
    /// Assert the exact number of items.
    fn effects_count(&self, expected: usize);
    /// Assert that nothing was emitted.
    fn effects_empty(&self);
    /// Assert that the first item matches a predicate.
    fn effects_first_matches<F: Fn(&E) -> bool>(&self, predicate: F);
    /// Assert that some item matches a predicate.
    fn effects_any_matches<F: Fn(&E) -> bool>(&self, predicate: F);
}

impl<E: Debug> EffectAssertions<E> for Vec<E> {
    #[track_caller]
    fn effects_count(&self, expected: usize) {
        assert_eq!(
            self.len(),
            expected,
            "Expected {} effects, got {}: {:?}",
            expected,
            self.len(),
            self
        );
    }

    #[track_caller]
    fn effects_empty(&self) {
        assert!(self.is_empty(), "Expected no effects, got: {:?}", self);
    }

    #[track_caller]
    fn effects_first_matches<F: Fn(&E) -> bool>(&self, predicate: F) {
        match self.first() {
            Some(first) => assert!(predicate(first), "First effect did not match: {:?}", first),
            None => panic!("Expected at least one effect, got none"),
        }
    }

    #[track_caller]
    fn effects_any_matches<F: Fn(&E) -> bool>(&self, predicate: F) {
        assert!(
            self.iter().any(predicate),
            "No effect matched predicate, got: {:?}",
            self
        );
    }
}

/// Assert that a specific action (or effect) was emitted.
///
/// ```ignore
/// let effects = harness.drain_effects();
/// assert_emitted!(effects, Effect::Search { query } if query == "kyiv");
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected item matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action (or effect) was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected item matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first item matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many items match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
