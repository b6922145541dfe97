//! Task manager for async operations
//!
//! Provides lifecycle management for async tasks with support for:
//! - Cancellation scopes: spawning under a key cancels the previous task
//! - Debounced execution
//! - Generation tagging, so output of a superseded task is never applied
//!
//! Every key owns a generation counter. Spawning or cancelling under a key
//! bumps it, and each task captures the generation it was spawned with.
//! Finished tasks do not send actions directly: they send a [`TaskOutput`]
//! which the owner passes back through [`TaskManager::accept`]. Outputs from
//! an older generation are dropped there, which also covers outputs that
//! were already queued when the scope was cancelled.
//!
//! # Example
//!
//! ```ignore
//! use store_dispatch::tasks::TaskManager;
//! use std::time::Duration;
//!
//! let (mut tasks, mut outputs) = TaskManager::channel();
//!
//! // Debounced task - waits before executing, resets on each call
//! tasks.debounce("location", Duration::from_millis(300), async {
//!     Action::SearchQueryDidDebounce
//! });
//!
//! // Spawn a task - any existing task with same key is cancelled
//! tasks.spawn("weather", async move {
//!     Action::ForecastDidComplete(id, client.forecast(&location).await)
//! });
//!
//! while let Some(output) = outputs.recv().await {
//!     if let Some(action) = tasks.accept(output) {
//!         store.dispatch(action);
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::Action;

/// Identifies a cancellation scope.
///
/// Tasks with the same key are mutually exclusive - spawning a new task
/// with a key that's already running will cancel the existing task.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    /// Create a new task key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&TaskKey> for TaskKey {
    fn from(key: &TaskKey) -> Self {
        key.clone()
    }
}

/// Completion of a task, tagged with its scope and generation.
///
/// `action` is `None` when the task finished with nothing to report; the
/// output still travels back so the scope is released.
#[derive(Debug)]
pub struct TaskOutput<A> {
    key: TaskKey,
    generation: u64,
    action: Option<A>,
}

impl<A> TaskOutput<A> {
    pub fn key(&self) -> &TaskKey {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    handle: Option<AbortHandle>,
}

impl Slot {
    /// Invalidate whatever is outstanding and return the new generation.
    fn advance(&mut self) -> u64 {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation += 1;
        self.generation
    }
}

/// Manages async task lifecycle with automatic cancellation.
///
/// # Type Parameters
///
/// - `A`: The action type that tasks produce
pub struct TaskManager<A> {
    slots: HashMap<TaskKey, Slot>,
    output_tx: mpsc::UnboundedSender<TaskOutput<A>>,
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// Create a new task manager sending finished outputs to `output_tx`.
    pub fn new(output_tx: mpsc::UnboundedSender<TaskOutput<A>>) -> Self {
        Self {
            slots: HashMap::new(),
            output_tx,
        }
    }

    /// Create a task manager together with the receiving end of its outputs.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TaskOutput<A>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Spawn a task, cancelling any existing task with the same key.
    ///
    /// The future resolves to an action, or to `None` when it has nothing to
    /// report (e.g. the underlying call was cancelled). Either way the scope
    /// stays outstanding until its output is accepted. If the task is
    /// cancelled before completion, no output is sent.
    pub fn spawn<F, R>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = R> + Send + 'static,
        R: Into<Option<A>>,
    {
        self.start(key.into(), None, future)
    }

    /// Spawn a task with debounce - waits for duration before executing.
    ///
    /// If called again with the same key before the duration expires,
    /// the previous task is cancelled and the timer resets.
    pub fn debounce<F, R>(
        &mut self,
        key: impl Into<TaskKey>,
        duration: Duration,
        future: F,
    ) -> &mut Self
    where
        F: Future<Output = R> + Send + 'static,
        R: Into<Option<A>>,
    {
        self.start(key.into(), Some(duration), future)
    }

    fn start<F, R>(&mut self, key: TaskKey, delay: Option<Duration>, future: F) -> &mut Self
    where
        F: Future<Output = R> + Send + 'static,
        R: Into<Option<A>>,
    {
        let slot = self.slots.entry(key.clone()).or_default();
        let generation = slot.advance();
        tracing::debug!(task = %key, generation, ?delay, "Spawning task");

        let tx = self.output_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let action = future.await.into();
            let _ = tx.send(TaskOutput {
                key,
                generation,
                action,
            });
        });

        slot.handle = Some(handle.abort_handle());
        self
    }

    /// Cancel a task by key.
    ///
    /// Bumps the key's generation even if the task already finished, so an
    /// output still waiting in the channel is rejected by [`accept`](Self::accept).
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(slot) = self.slots.get_mut(key) {
            let had_task = slot.handle.is_some();
            let generation = slot.advance();
            if had_task {
                tracing::debug!(task = %key, generation, "Cancelled task");
            }
        }
    }

    /// Cancel all running tasks.
    pub fn cancel_all(&mut self) {
        for slot in self.slots.values_mut() {
            slot.advance();
        }
    }

    /// Release the scope of a finished task and take its action if the
    /// generation is still current. Stale outputs are dropped.
    pub fn accept(&mut self, output: TaskOutput<A>) -> Option<A> {
        match self.slots.get_mut(&output.key) {
            Some(slot) if slot.generation == output.generation => {
                slot.handle = None;
                output.action
            }
            current => {
                tracing::debug!(
                    task = %output.key,
                    generation = output.generation,
                    current = current.map(|slot| slot.generation),
                    action = ?output.action.as_ref().map(Action::name),
                    "Dropping stale task output"
                );
                None
            }
        }
    }

    /// Current generation of a key (0 if nothing was ever spawned under it).
    pub fn generation(&self, key: &TaskKey) -> u64 {
        self.slots.get(key).map_or(0, |slot| slot.generation)
    }

    /// Check if a task with the given key is outstanding: spawned, not
    /// cancelled, and its output not yet accepted.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.slots
            .get(key)
            .is_some_and(|slot| slot.handle.is_some())
    }

    /// Get the number of outstanding tasks.
    pub fn len(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.handle.is_some())
            .count()
    }

    /// Check if there are no outstanding tasks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the keys of all outstanding tasks.
    pub fn running_keys(&self) -> impl Iterator<Item = &TaskKey> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.handle.is_some())
            .map(|(key, _)| key)
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for slot in self.slots.values_mut() {
            if let Some(handle) = slot.handle.take() {
                handle.abort();
            }
        }
    }
}
