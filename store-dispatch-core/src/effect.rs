//! Effect-based state management
//!
//! Reducers mutate state and declare side effects alongside the change.
//! Effects are descriptions of work to be done, not the work itself: the
//! runtime hands them to an effect handler which spawns the async tasks.
//!
//! ```ignore
//! fn reducer(state: &mut S, action: A) -> DispatchResult<E>
//! ```
//!
//! # Example
//!
//! ```ignore
//! use store_dispatch::{Action, DispatchResult, EffectStore};
//!
//! enum Effect {
//!     Search { query: String },
//! }
//!
//! #[derive(Default)]
//! struct State { query: String, hits: Vec<String> }
//!
//! #[derive(Clone, Debug, Action)]
//! enum AppAction {
//!     QueryChange(String),
//!     QueryDidLoad(Vec<String>),
//! }
//!
//! fn reducer(state: &mut State, action: AppAction) -> DispatchResult<Effect> {
//!     match action {
//!         AppAction::QueryChange(query) => {
//!             state.query = query.clone();
//!             DispatchResult::changed_with(Effect::Search { query })
//!         }
//!         AppAction::QueryDidLoad(hits) => {
//!             state.hits = hits;
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//!
//! let mut store = EffectStore::new(State::default(), reducer);
//! let result = store.dispatch(AppAction::QueryChange("kyiv".into()));
//! for effect in result.effects {
//!     // spawn async task
//! }
//! ```

use std::marker::PhantomData;

use crate::action::Action;
use crate::store::Middleware;

/// Result of dispatching an action to an effect-aware store.
///
/// Contains both the state change indicator and any effects to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// A single effect without a state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed, with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// A store that owns state and an effect-emitting reducer.
///
/// The reducer is the only place state is mutated; callers get
/// [`DispatchResult<E>`] back and decide how to execute the effects.
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a new effect store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state.
    ///
    /// Use sparingly - prefer dispatching actions for state changes.
    /// This is mainly useful for seeding test fixtures.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Dispatch an action to the store.
    #[inline]
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        (self.reducer)(&mut self.state, action)
    }
}

/// An effect store with middleware support.
///
/// Calls middleware hooks before and after each dispatch. The middleware
/// receives action references and the state change indicator, but not the
/// effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    /// Create a new effect store with middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch an action through middleware and store.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}

/// Store interface used by [`EffectRuntime`](crate::runtime::EffectRuntime).
pub trait EffectStoreLike<S, A: Action, E> {
    /// Dispatch an action and return state changes plus effects.
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;
    /// Get the current state.
    fn state(&self) -> &S;
}

impl<S, A: Action, E> EffectStoreLike<S, A, E> for EffectStore<S, A, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStore::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStore::state(self)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Type(char),
        Clear,
        Submit,
        NoOp,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Type(_) => "Type",
                TestAction::Clear => "Clear",
                TestAction::Submit => "Submit",
                TestAction::NoOp => "NoOp",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Lookup(String),
        Cancel,
    }

    #[derive(Default)]
    struct TestState {
        input: String,
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Type(c) => {
                state.input.push(c);
                DispatchResult::changed()
            }
            TestAction::Clear => {
                state.input.clear();
                DispatchResult::changed_with(TestEffect::Cancel)
            }
            TestAction::Submit if state.input.is_empty() => DispatchResult::unchanged(),
            TestAction::Submit => DispatchResult::effect(TestEffect::Lookup(state.input.clone())),
            TestAction::NoOp => DispatchResult::unchanged(),
        }
    }

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r: DispatchResult<TestEffect> = DispatchResult::changed();
        assert!(r.changed);
        assert!(r.effects.is_empty());

        let r = DispatchResult::effect(TestEffect::Cancel);
        assert!(!r.changed);
        assert_eq!(r.effects, vec![TestEffect::Cancel]);

        let r =
            DispatchResult::changed_with(TestEffect::Cancel).with(TestEffect::Lookup("x".into()));
        assert!(r.changed);
        assert_eq!(
            r,
            DispatchResult {
                changed: true,
                effects: vec![TestEffect::Cancel, TestEffect::Lookup("x".into())],
            }
        );
    }

    #[test]
    fn test_effect_store_emits_effects() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);

        assert!(!store.dispatch(TestAction::Submit).has_effects());

        store.dispatch(TestAction::Type('n'));
        store.dispatch(TestAction::Type('y'));
        assert_eq!(store.state().input, "ny");

        let result = store.dispatch(TestAction::Submit);
        assert!(!result.changed);
        assert_eq!(result.effects, vec![TestEffect::Lookup("ny".into())]);

        let result = store.dispatch(TestAction::Clear);
        assert!(result.changed);
        assert_eq!(result.effects, vec![TestEffect::Cancel]);
        assert!(store.state().input.is_empty());

        assert!(!store.dispatch(TestAction::NoOp).changed);
    }

    #[test]
    fn test_effect_store_state_mut() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);
        store.state_mut().input = "seed".into();
        assert_eq!(store.state().input, "seed");
    }

    #[derive(Default)]
    struct RecordingMiddleware {
        seen: Vec<(&'static str, bool)>,
    }

    impl Middleware<TestAction> for RecordingMiddleware {
        fn before(&mut self, _action: &TestAction) {}

        fn after(&mut self, action: &TestAction, state_changed: bool) {
            self.seen.push((action.name(), state_changed));
        }
    }

    #[test]
    fn test_effect_store_with_middleware() {
        let mut store = EffectStoreWithMiddleware::new(
            TestState::default(),
            test_reducer,
            RecordingMiddleware::default(),
        );

        store.dispatch(TestAction::Type('a'));
        let result = store.dispatch(TestAction::Submit);

        assert_eq!(result.effects, vec![TestEffect::Lookup("a".into())]);
        assert_eq!(
            store.middleware().seen,
            vec![("Type", true), ("Submit", false)]
        );
    }
}
