//! Headless runtime for effect-based stores.
//!
//! Wires together the store, the [`TaskManager`] and the state observers:
//!
//! 1. Actions arrive via [`EffectRuntime::dispatch`] or from finished tasks
//! 2. The store's reducer updates state and returns effects
//! 3. Effects are handed to a handler together with an [`EffectContext`]
//! 4. If state changed, a snapshot is published to every subscriber
//!
//! The runtime never blocks inside a dispatch; async work only happens in
//! tasks spawned by the effect handler.

use tokio::sync::{mpsc, watch};

use crate::effect::{EffectReducer, EffectStore, EffectStoreLike};
use crate::tasks::{TaskManager, TaskOutput};
use crate::Action;

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime helper for effect-based stores.
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E> = EffectStore<S, A, E>> {
    store: St,
    tasks: TaskManager<A>,
    task_rx: mpsc::UnboundedReceiver<TaskOutput<A>>,
    state_tx: watch::Sender<S>,
    _effect: std::marker::PhantomData<E>,
}

impl<S: Clone, A: Action, E> EffectRuntime<S, A, E, EffectStore<S, A, E>> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S: Clone, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Create a runtime from an existing effect store.
    pub fn from_store(store: St) -> Self {
        let (tasks, task_rx) = TaskManager::channel();
        let (state_tx, _) = watch::channel(store.state().clone());

        Self {
            store,
            tasks,
            task_rx,
            state_tx,
            _effect: std::marker::PhantomData,
        }
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Subscribe to state snapshots.
    ///
    /// The receiver starts out holding the current state and is notified
    /// after every dispatch that changed it.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state_tx.subscribe()
    }

    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    /// Read-only access to the task manager.
    pub fn task_manager(&self) -> &TaskManager<A> {
        &self.tasks
    }

    /// Wait for the next action produced by a finished task.
    ///
    /// Outputs whose scope was cancelled or re-spawned in the meantime are
    /// dropped here. Returns `None` as soon as no task is outstanding, so
    /// an idle runtime never blocks.
    pub async fn next_action(&mut self) -> Option<A> {
        while !self.tasks.is_empty() {
            let output = self.task_rx.recv().await?;
            if let Some(action) = self.tasks.accept(output) {
                return Some(action);
            }
        }
        None
    }

    /// Dispatch one action, run its effects and notify subscribers.
    ///
    /// Returns whether the state changed.
    pub fn dispatch<F>(&mut self, action: A, mut handle_effect: F) -> bool
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        let name = action.name();
        let result = self.store.dispatch(action);
        tracing::trace!(
            action = name,
            changed = result.changed,
            effects = result.effects.len(),
            "Dispatched"
        );

        if result.has_effects() {
            let mut ctx = EffectContext {
                tasks: &mut self.tasks,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }

        if result.changed {
            self.state_tx.send_replace(self.store.state().clone());
        }
        result.changed
    }
}
