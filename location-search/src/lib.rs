//! Location search controller
//!
//! Debounced location search, result selection and multi-day forecasts,
//! coordinated by a reducer over [`state::SearchState`] and executed by
//! [`controller::SearchController`].
//!
//! Flow:
//! 1. The UI sends [`action::Action`]s to the controller
//! 2. The reducer updates state and returns [`effect::Effect`]s
//! 3. Effects run as tasks in the `location` and `weather` scopes
//! 4. Task results come back as `*Did*` actions; stale ones are dropped

pub mod action;
pub mod api;
pub mod cli;
pub mod client;
pub mod controller;
pub mod effect;
pub mod error;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use api::{ClientConfig, OpenMeteoClient};
pub use client::{ForecastResponse, SearchResponse, WeatherClient};
pub use controller::{ControllerConfig, SearchController, LOCATION_SCOPE, WEATHER_SCOPE};
pub use effect::Effect;
pub use error::ClientError;
pub use state::{ForecastDay, ResultId, SearchResult, SearchState, Weather};
