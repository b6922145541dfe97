//! Search controller: runtime, effect handling and debounce
//!
//! Wraps an [`EffectRuntime`] around the [`reducer`] and executes its effects
//! with an injected [`WeatherClient`]. Async work runs in two cancellation
//! scopes:
//!
//! - [`LOCATION_SCOPE`]: the debounce timer, then the search call
//! - [`WEATHER_SCOPE`]: the forecast call for the selected result
//!
//! Restarting or cancelling a scope bumps its generation, so a response from
//! an abandoned call never reaches the reducer.

use std::sync::Arc;
use std::time::Duration;

use store_dispatch::{
    EffectContext, EffectRuntime, EffectStoreWithMiddleware, LoggingMiddleware, TaskKey,
};
use tokio::sync::{mpsc, watch};

use crate::action::Action;
use crate::client::WeatherClient;
use crate::effect::Effect;
use crate::error::ClientError;
use crate::reducer::reducer;
use crate::state::SearchState;

/// Scope of the debounce timer and search call
pub const LOCATION_SCOPE: &str = "location";
/// Scope of the forecast call
pub const WEATHER_SCOPE: &str = "weather";

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Quiet period after the last keystroke before searching
    pub debounce: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

type SearchStore = EffectStoreWithMiddleware<SearchState, Action, Effect, LoggingMiddleware>;

/// Owns the search state and drives the async work it requests.
pub struct SearchController {
    runtime: EffectRuntime<SearchState, Action, Effect, SearchStore>,
    client: Arc<dyn WeatherClient>,
    config: ControllerConfig,
}

impl SearchController {
    pub fn new(client: Arc<dyn WeatherClient>, config: ControllerConfig) -> Self {
        Self::with_state(SearchState::default(), client, config)
    }

    /// Start from an existing state (e.g. restored fixtures in tests).
    pub fn with_state(
        state: SearchState,
        client: Arc<dyn WeatherClient>,
        config: ControllerConfig,
    ) -> Self {
        let store = EffectStoreWithMiddleware::new(state, reducer, LoggingMiddleware::new());
        Self {
            runtime: EffectRuntime::from_store(store),
            client,
            config,
        }
    }

    pub fn state(&self) -> &SearchState {
        self.runtime.state()
    }

    /// Subscribe to state snapshots, published after every change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.runtime.subscribe()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Whether a task is outstanding in `scope`.
    pub fn is_pending(&self, scope: &str) -> bool {
        self.runtime.task_manager().is_running(&TaskKey::new(scope))
    }

    /// Handle a UI event.
    ///
    /// A non-empty query restarts the debounce timer in the location scope,
    /// which also abandons a search still in flight.
    ///
    /// Returns whether the state changed.
    pub fn send(&mut self, action: Action) -> bool {
        if let Action::SearchQueryChange(query) = &action {
            if !query.is_empty() {
                self.runtime.tasks().debounce(
                    LOCATION_SCOPE,
                    self.config.debounce,
                    async { Action::SearchQueryDidDebounce },
                );
            }
        }
        self.apply(action)
    }

    /// Wait for the next finished task and apply it.
    ///
    /// Returns false without waiting when no task is outstanding in either
    /// scope, so `while controller.step().await {}` settles all work.
    pub async fn step(&mut self) -> bool {
        match self.runtime.next_action().await {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    /// Process UI events and task results until `events` closes.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<Action>) {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(action) => {
                        self.send(action);
                    }
                    None => break,
                },
                // Disabled for this iteration while no task is outstanding
                Some(action) = self.runtime.next_action() => {
                    self.apply(action);
                }
            }
        }

        self.runtime.tasks().cancel_all();
        tracing::debug!("Search controller stopped");
    }

    fn apply(&mut self, action: Action) -> bool {
        let client = &self.client;
        self.runtime
            .dispatch(action, |effect, ctx| handle_effect(effect, ctx, client))
    }
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &Arc<dyn WeatherClient>) {
    match effect {
        Effect::CancelSearch => ctx.tasks().cancel(&TaskKey::new(LOCATION_SCOPE)),

        Effect::Search { query } => {
            let client = Arc::clone(client);
            ctx.tasks().spawn(LOCATION_SCOPE, async move {
                match client.search(&query).await {
                    Err(ClientError::Canceled) => None,
                    result => Some(Action::SearchDidComplete(result)),
                }
            });
        }

        Effect::FetchForecast { location } => {
            let client = Arc::clone(client);
            ctx.tasks().spawn(WEATHER_SCOPE, async move {
                match client.forecast(&location).await {
                    Err(ClientError::Canceled) => None,
                    result => Some(Action::ForecastDidComplete(location.id, result)),
                }
            });
        }
    }
}
